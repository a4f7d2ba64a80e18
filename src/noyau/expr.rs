// src/noyau/expr.rs
//
// AST flottant.
// - Lit  : valeur (π et e y arrivent déjà résolus)
// - Bin  : opérateur binaire
// - Func : fonction unaire (sin/cos/tan/log/√)
// - Neg  : moins unaire
//
// Arbre possédé, construit une fois par évaluation.

use std::fmt;

use super::jetons::{Fonction, Operateur};

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Lit(f64),
    Bin(Operateur, Box<Expr>, Box<Expr>),
    Func(Fonction, Box<Expr>),
    Neg(Box<Expr>),
}

impl Expr {
    pub fn bin(op: Operateur, a: Expr, b: Expr) -> Expr {
        Expr::Bin(op, Box::new(a), Box::new(b))
    }

    pub fn func(f: Fonction, x: Expr) -> Expr {
        Expr::Func(f, Box::new(x))
    }

    pub fn neg(x: Expr) -> Expr {
        Expr::Neg(Box::new(x))
    }
}

/// Affichage totalement parenthésé : la structure se lit sans ambiguïté.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Lit(v) => write!(f, "{v}"),
            Expr::Bin(op, a, b) => write!(f, "({a} {} {b})", op.symbole()),
            Expr::Func(fun, x) => write!(f, "{}({x})", fun.nom()),
            Expr::Neg(x) => write!(f, "-{x}"),
        }
    }
}
