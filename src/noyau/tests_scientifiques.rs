//! Tests scientifiques (campagne) : propriétés arithmétiques + limites contrôlées.
//!
//! But : vérifier le noyau contre l’arithmétique attendue sans faire chauffer la machine.
//! - budget temps global
//! - tailles bornées (profondeur, longueur)
//!
//! Notes :
//! - Les angles sont en degrés : sin(90) = 1, pas sin(π/2).
//! - Le moins unaire lie plus fort que ^ : -2^2 = 4.
//! - Stress : profondeur raisonnable (eval est récursif).

use std::time::{Duration, Instant};

use super::erreurs::{EvalError, EvaluationError, ParseErrorKind};
use super::evaluate;
use super::jetons::{format_tokens, tokenize};

fn eval_ok(expr: &str) -> f64 {
    evaluate(expr).unwrap_or_else(|e| panic!("expr={expr:?} err={e}"))
}

fn assert_proche(expr: &str, attendu: f64) {
    let v = eval_ok(expr);
    assert!(
        (v - attendu).abs() <= 1e-9 * attendu.abs().max(1.0),
        "expr={expr:?} v={v} attendu={attendu}"
    );
}

fn assert_eval_err(expr: &str, attendu: EvalError) {
    assert_eq!(
        evaluate(expr),
        Err(EvaluationError::Eval(attendu)),
        "expr={expr:?}"
    );
}

fn assert_parse_err(expr: &str, attendu: ParseErrorKind) {
    let e = evaluate(expr).expect_err(expr);
    assert_eq!(e.genre_parse(), Some(attendu), "expr={expr:?} err={e}");
}

/// Budget global anti-gel (scientifique + safe).
fn budget(start: Instant, max: Duration) {
    if start.elapsed() > max {
        panic!("budget temps dépassé: {:?}", max);
    }
}

/* ------------------------ Propriétés de référence ------------------------ */

#[test]
fn sci_proprietes_de_reference() {
    assert_eq!(eval_ok("2+3*4"), 14.0);
    assert_eval_err("1/0", EvalError::DivisionByZero);
    assert_eval_err("log(-1)", EvalError::DomainError);
    assert_eval_err("sqrt(-4)", EvalError::DomainError);
    assert_parse_err("(2+3", ParseErrorKind::UnbalancedParens);
    assert_parse_err("", ParseErrorKind::EmptyExpression);
    assert_proche("2^0.5", std::f64::consts::SQRT_2);
    assert_eq!(eval_ok("sin(90)"), 1.0);
}

/* ------------------------ Arithmétique entière = référence ------------------------ */

/// Mini-générateur déterministe (table fixe) : chaque cas est calculé à la main.
#[test]
fn sci_infixe_standard() {
    let cas: &[(&str, f64)] = &[
        ("1+2+3", 6.0),
        ("1-2-3", -4.0),
        ("2*3+4*5", 26.0),
        ("2+3*4-5", 9.0),
        ("100/4/5", 5.0),
        ("(1+2)*(3+4)", 21.0),
        ("((2))", 2.0),
        ("8/2*4", 16.0),
        ("2*(3+4)*5", 70.0),
        ("1-(2-(3-(4-5)))", 3.0),
        ("0.5+0.25", 0.75),
    ];
    for (expr, attendu) in cas {
        assert_eq!(eval_ok(expr), *attendu, "expr={expr:?}");
    }
}

/* ------------------------ Identités (trig en degrés) ------------------------ */

#[test]
fn sci_identites_trig() {
    // sin(-x) = -sin(x)
    assert_eq!(eval_ok("sin(-30)"), -0.5);
    // cos(-x) = cos(x)
    assert_eq!(eval_ok("cos(-60)"), eval_ok("cos(60)"));
    // sin² + cos² = 1 (hors table)
    assert_proche("sin(17)^2 + cos(17)^2", 1.0);
    // tan = sin/cos
    assert_proche("tan(20) - sin(20)/cos(20)", 0.0);
}

#[test]
fn sci_periodicite() {
    assert_eq!(eval_ok("sin(90+360)"), 1.0);
    assert_eq!(eval_ok("cos(720)"), 1.0);
    assert_eval_err("tan(90+180)", EvalError::DomainError);
}

#[test]
fn sci_log_et_puissances() {
    assert_proche("log(2) + log(5)", 1.0);
    assert_proche("10^log(7)", 7.0);
    assert_proche("√2 * √2", 2.0);
    assert_proche("4^0.5", 2.0);
    assert_proche("e^0", 1.0);
}

/* ------------------------ Aller-retour jetons ------------------------ */

#[test]
fn sci_aller_retour_jetons() {
    let cas = ["1 + 2 * 3", "(4 - 1) ^ 2", "√(9) / 3", "log(100) * -2"];
    for s in cas {
        let j = tokenize(s).unwrap();
        let recon = format_tokens(&j);
        // la reconstruction se ré-évalue à l’identique
        assert_eq!(evaluate(&recon), evaluate(s), "s={s:?} recon={recon:?}");
        assert_eq!(
            recon.replace(' ', ""),
            s.replace(' ', ""),
            "s={s:?}"
        );
    }
}

/* ------------------------ Stress contrôlé (sans brûler) ------------------------ */

#[test]
fn sci_stress_parentheses_imbriquees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let n = 200;
    let expr = format!("{}1{}", "(".repeat(n), ")".repeat(n));
    assert_eq!(eval_ok(&expr), 1.0);

    budget(t0, max);
}

#[test]
fn sci_stress_somme_longue() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = vec!["0.5"; 2000].join("+");
    assert_eq!(eval_ok(&expr), 1000.0);

    budget(t0, max);
}

#[test]
fn sci_stress_negations_chainees() {
    let t0 = Instant::now();
    let max = Duration::from_millis(200);

    let expr = format!("{}7", "-".repeat(101));
    assert_eq!(eval_ok(&expr), -7.0);

    budget(t0, max);
}
