//! Noyau d’évaluation sûr (sans interpréteur générique)
//!
//! Organisation interne :
//! - erreurs.rs  : LexError / ParseError / EvalError (+ EvaluationError)
//! - jetons.rs   : tokenisation paresseuse (Lexer)
//! - rpn.rs      : shunting-yard + construction Expr
//! - expr.rs     : AST flottant
//! - trig.rs     : trig en degrés + angles spéciaux
//! - eval.rs     : pipeline complet
//! - format.rs   : affichage (ré-saisissable) d’un résultat

pub mod erreurs;
pub mod eval;
pub mod expr;
pub mod format;
pub mod jetons;
pub mod rpn;
pub mod trig;

#[cfg(test)]
mod tests_scientifiques;

#[cfg(test)]
mod tests_fuzz_safe;

// API publique minimale
pub use erreurs::EvaluationError;
pub use eval::{evaluate, evaluate_detail, Demarche};
pub use format::format_resultat;
