//! Tests fuzz safe : robustesse + déterminisme + limites contrôlées.
//!
//! But : marteler le pipeline sans brûler la machine.
//! - RNG déterministe (seed fixe)
//! - profondeur bornée
//! - budget temps global
//! - invariant clé : toute entrée donne soit un f64 FINI, soit une erreur typée
//!   (jamais de panique, jamais de NaN/∞ “silencieux”)

use std::time::{Duration, Instant};

use super::erreurs::{EvalError, EvaluationError};
use super::evaluate;
use super::rpn::MAX_PROFONDEUR;

/* ------------------------ RNG déterministe minimal ------------------------ */

#[derive(Clone)]
struct Rng {
    state: u64,
}
impl Rng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }
    fn next_u32(&mut self) -> u32 {
        // LCG simple (déterministe)
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }
    fn pick(&mut self, n: u32) -> u32 {
        if n == 0 {
            0
        } else {
            self.next_u32() % n
        }
    }
    fn coin(&mut self) -> bool {
        (self.next_u32() & 1) == 1
    }
}

/* ------------------------ Budget anti-gel ------------------------ */

fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Helpers fuzz ------------------------ */

fn check_invariant(expr: &str, r: &Result<f64, EvaluationError>) {
    if let Ok(v) = r {
        assert!(v.is_finite(), "résultat non fini pour {expr:?}: {v}");
    }
}

/* ------------------------ Génération d’expressions (bornée) ------------------------ */

/// Entiers + - * avec valeur de référence calculée en même temps.
/// Petits entiers, profondeur ≤ 4 : |valeur| ≤ 9^16 < 2^53, tout reste exact en f64.
fn gen_entier(rng: &mut Rng, prof: u32) -> (String, i64) {
    if prof == 0 || rng.pick(3) == 0 {
        let n = rng.pick(10) as i64;
        return (format!("{n}"), n);
    }

    let (a, va) = gen_entier(rng, prof - 1);
    let (b, vb) = gen_entier(rng, prof - 1);

    match rng.pick(4) {
        0 => (format!("({a} + {b})"), va + vb),
        1 => (format!("({a} - {b})"), va - vb),
        2 => (format!("{a} * ({b})"), va * vb),
        _ => (format!("-({a})"), -va),
    }
}

/// Grammaire complète (toutes fonctions, constantes, division, puissance).
fn gen_libre(rng: &mut Rng, prof: u32) -> String {
    if prof == 0 {
        return match rng.pick(6) {
            0 => "π".to_string(),
            1 => "e".to_string(),
            2 => format!("{}.{}", rng.pick(10), rng.pick(100)),
            _ => format!("{}", rng.pick(400)),
        };
    }

    match rng.pick(9) {
        0 => format!("sin({})", gen_libre(rng, prof - 1)),
        1 => format!("cos({})", gen_libre(rng, prof - 1)),
        2 => format!("tan({})", gen_libre(rng, prof - 1)),
        3 => format!("log({})", gen_libre(rng, prof - 1)),
        4 => format!("√({})", gen_libre(rng, prof - 1)),
        5 => format!("-{}", gen_libre(rng, prof - 1)),
        _ => {
            let op = match rng.pick(5) {
                0 => "+",
                1 => "-",
                2 => "*",
                3 => "/",
                _ => "^",
            };
            let a = gen_libre(rng, prof - 1);
            let b = gen_libre(rng, prof - 1);
            if rng.coin() {
                format!("({a}{op}{b})")
            } else {
                format!("{a} {op} {b}")
            }
        }
    }
}

/// Soupe de caractères : alphabet reconnu + intrus.
fn gen_soupe(rng: &mut Rng, len: u32) -> String {
    const ALPHABET: &[char] = &[
        '0', '1', '9', '.', '+', '-', '*', '/', '^', '(', ')', 'π', '√', 'e', 's', 'i', 'n', ' ',
        'x', '#', '=',
    ];
    (0..len)
        .map(|_| ALPHABET[rng.pick(ALPHABET.len() as u32) as usize])
        .collect()
}

/* ------------------------ Campagnes ------------------------ */

/// Imbrication profonde : chaque niveau ajoute exactement un noeud sur le chemin
/// le plus long ("-", "cos(", "(…)+1") ou aucun ("(…)").
/// Renvoie (expression, profondeur de l’arbre).
fn gen_profond(rng: &mut Rng, niveaux: u32) -> (String, usize) {
    let mut avant = String::new();
    let mut apres: Vec<&str> = Vec::new();
    let mut prof = 1;

    for _ in 0..niveaux {
        match rng.pick(4) {
            0 => {
                avant.push('-');
                prof += 1;
            }
            1 => {
                avant.push_str("cos(");
                apres.push(")");
                prof += 1;
            }
            2 => {
                avant.push('(');
                apres.push(")+1");
                prof += 1;
            }
            _ => {
                avant.push('(');
                apres.push(")");
            }
        }
    }

    avant.push('2');
    for s in apres.iter().rev() {
        avant.push_str(s);
    }
    (avant, prof)
}

/* ------------------------ Tests ------------------------ */

#[test]
fn fuzz_safe_imbrication_profonde() {
    let t0 = Instant::now();
    let max = Duration::from_secs(3);

    let limite = MAX_PROFONDEUR as u32;
    let mut rng = Rng::new(2024);
    for _ in 0..40 {
        // de la moitié de la limite à 4x la limite
        let niveaux = limite / 2 + rng.pick(limite * 4);
        let (expr, prof) = gen_profond(&mut rng, niveaux);
        let r = evaluate(&expr);
        check_invariant(&expr, &r);

        if prof <= MAX_PROFONDEUR {
            assert!(r.is_ok(), "prof={prof} : {:?}", r.err());
        } else {
            assert_eq!(
                r,
                Err(EvaluationError::Eval(EvalError::Overflow)),
                "prof={prof}"
            );
        }
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_entiers_contre_reference() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(0xC1E3_2024);
    for _ in 0..300 {
        let (expr, attendu) = gen_entier(&mut rng, 4);
        let v = evaluate(&expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"));
        assert_eq!(v, attendu as f64, "expr={expr:?}");
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_grammaire_complete() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(42);
    for _ in 0..300 {
        let expr = gen_libre(&mut rng, 4);
        let r = evaluate(&expr);
        check_invariant(&expr, &r);

        // toute erreur ici vient du calcul, jamais de la syntaxe
        if let Err(e) = &r {
            assert!(
                matches!(e, EvaluationError::Eval(_)),
                "erreur non attendue: expr={expr:?} err={e}"
            );
        }
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_soupe_sans_panique() {
    let t0 = Instant::now();
    let max = Duration::from_millis(500);

    let mut rng = Rng::new(7);
    for _ in 0..1000 {
        let len = rng.pick(24);
        let s = gen_soupe(&mut rng, len);
        let r = evaluate(&s);
        check_invariant(&s, &r);
        budget(t0, max);
    }
}

#[test]
fn fuzz_safe_determinisme() {
    let mut rng = Rng::new(1234);
    for _ in 0..100 {
        let expr = gen_libre(&mut rng, 3);
        assert_eq!(evaluate(&expr), evaluate(&expr), "expr={expr:?}");
    }
}
