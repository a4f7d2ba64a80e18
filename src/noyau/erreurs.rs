//! Taxonomie d’erreurs du noyau.
//!
//! Trois étages, trois familles :
//! - LexError   : caractère non reconnu (jetons.rs)
//! - ParseError : structure invalide (rpn.rs)
//! - EvalError  : calcul impossible (eval.rs)
//!
//! Contrat : toujours renvoyées comme valeurs, jamais de panique,
//! jamais de valeur “par défaut” à la place d’un résultat.

use thiserror::Error;

/// Caractère (ou mot) hors de l’alphabet reconnu.
/// `position` = index en caractères (pas en octets) dans l’entrée.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("caractère inattendu '{caractere}' (position {position})")]
pub struct LexError {
    pub position: usize,
    pub caractere: char,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnbalancedParens,
    UnexpectedToken,
    EmptyExpression,
    MissingOperand,
}

impl ParseErrorKind {
    fn message(self) -> &'static str {
        match self {
            ParseErrorKind::UnbalancedParens => "parenthèses non équilibrées",
            ParseErrorKind::UnexpectedToken => "jeton inattendu",
            ParseErrorKind::EmptyExpression => "entrée vide",
            ParseErrorKind::MissingOperand => "opérande manquant",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
#[error("{} (position {position})", .genre.message())]
pub struct ParseError {
    pub genre: ParseErrorKind,
    pub position: usize,
}

impl ParseError {
    pub fn new(genre: ParseErrorKind, position: usize) -> Self {
        Self { genre, position }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division par zéro")]
    DivisionByZero,
    #[error("hors domaine")]
    DomainError,
    #[error("dépassement de capacité")]
    Overflow,
}

/// Erreur du pipeline complet (jetons -> RPN -> Expr -> valeur).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum EvaluationError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
impl EvaluationError {
    /// Raccourci tests : genre de l’erreur de parsing, si c’en est une.
    pub fn genre_parse(&self) -> Option<ParseErrorKind> {
        match self {
            EvaluationError::Parse(p) => Some(p.genre),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_lisibles() {
        let e = EvaluationError::from(LexError {
            position: 3,
            caractere: '$',
        });
        assert_eq!(e.to_string(), "caractère inattendu '$' (position 3)");

        let e = EvaluationError::from(ParseError::new(ParseErrorKind::UnbalancedParens, 0));
        assert_eq!(e.to_string(), "parenthèses non équilibrées (position 0)");

        let e = EvaluationError::from(EvalError::DivisionByZero);
        assert_eq!(e.to_string(), "division par zéro");
    }

    #[test]
    fn genre_parse_seulement_pour_parse() {
        let e = EvaluationError::from(ParseError::new(ParseErrorKind::MissingOperand, 2));
        assert_eq!(e.genre_parse(), Some(ParseErrorKind::MissingOperand));
        assert_eq!(EvaluationError::from(EvalError::Overflow).genre_parse(), None);
    }
}
