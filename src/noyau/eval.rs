//! Noyau: évaluation (pipeline réel)
//!
//! tokenize -> RPN -> Expr -> valeur f64
//!
//! Chaque étage est une fonction pure ; la première erreur interrompt tout.
//! Aucun interpréteur générique : seul l’alphabet de jetons.rs est accepté.

use super::erreurs::{EvalError, EvaluationError};
use super::expr::Expr;
use super::jetons::{format_tokens, tokenize, Fonction, Operateur};
use super::rpn::{borner, format_rpn, from_rpn, parse, to_rpn};
use super::trig::{trig_degres, TrigFn};

/// Démarche (panneau d’explication) : chaque étape du pipeline en texte.
#[derive(Default, Clone, Debug, PartialEq)]
pub struct Demarche {
    pub jetons: String,
    pub rpn: String,
    pub arbre: String,
    pub valeur: f64,
}

/// API publique : évalue une expression arithmétique.
pub fn evaluate(text: &str) -> Result<f64, EvaluationError> {
    let jetons = tokenize(text)?;
    let expr = parse(&jetons)?;
    Ok(normalise_zero(eval(&expr)?))
}

/// Comme `evaluate`, en gardant la trace de chaque étape.
pub fn evaluate_detail(text: &str) -> Result<Demarche, EvaluationError> {
    // 1) Jetons
    let jetons = tokenize(text)?;

    // 2) RPN (+ garde-fous de taille)
    let rpn = to_rpn(&jetons)?;
    borner(&rpn)?;

    // 3) AST (Expr)
    let expr = from_rpn(&rpn)?;

    // 4) Valeur
    let valeur = normalise_zero(eval(&expr)?);

    Ok(Demarche {
        jetons: format_tokens(&jetons),
        rpn: format_rpn(&rpn),
        arbre: expr.to_string(),
        valeur,
    })
}

/// -0 => 0 (affichage)
fn normalise_zero(v: f64) -> f64 {
    if v == 0.0 {
        0.0
    } else {
        v
    }
}

/// Parcours de l’AST.
/// Chaque noeud est vérifié : NaN => DomainError, ±∞ => Overflow.
pub fn eval(expr: &Expr) -> Result<f64, EvalError> {
    let v = match expr {
        Expr::Lit(v) => *v,
        Expr::Neg(x) => -eval(x)?,
        Expr::Bin(op, a, b) => {
            let a = eval(a)?;
            let b = eval(b)?;
            binaire(*op, a, b)?
        }
        Expr::Func(f, x) => fonction(*f, eval(x)?)?,
    };
    fini(v)
}

fn fini(v: f64) -> Result<f64, EvalError> {
    if v.is_nan() {
        Err(EvalError::DomainError)
    } else if v.is_infinite() {
        Err(EvalError::Overflow)
    } else {
        Ok(v)
    }
}

fn binaire(op: Operateur, a: f64, b: f64) -> Result<f64, EvalError> {
    match op {
        Operateur::Plus => Ok(a + b),
        Operateur::Minus => Ok(a - b),
        Operateur::Star => Ok(a * b),
        Operateur::Slash => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            Ok(a / b)
        }
        Operateur::Caret => puissance(a, b),
    }
}

/// a^b général (exposants fractionnaires/négatifs).
fn puissance(a: f64, b: f64) -> Result<f64, EvalError> {
    if a == 0.0 && b < 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    // base négative + exposant non entier : pas de valeur réelle
    if a < 0.0 && b.fract() != 0.0 {
        return Err(EvalError::DomainError);
    }
    Ok(a.powf(b))
}

fn fonction(f: Fonction, x: f64) -> Result<f64, EvalError> {
    match f {
        Fonction::Sin => trig_degres(x, TrigFn::Sin),
        Fonction::Cos => trig_degres(x, TrigFn::Cos),
        Fonction::Tan => trig_degres(x, TrigFn::Tan),
        Fonction::Log => {
            if x <= 0.0 {
                return Err(EvalError::DomainError);
            }
            Ok(x.log10())
        }
        Fonction::Sqrt => {
            if x < 0.0 {
                return Err(EvalError::DomainError);
            }
            Ok(x.sqrt())
        }
    }
}
