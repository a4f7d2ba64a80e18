// src/noyau/jetons.rs

use std::f64::consts::{E, PI};
use std::fmt;

use super::erreurs::LexError;

/// Opérateurs binaires (le moins unaire est décidé par le parseur).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operateur {
    Plus,
    Minus,
    Star,
    Slash,
    Caret, // ^
}

impl Operateur {
    pub fn symbole(self) -> char {
        match self {
            Operateur::Plus => '+',
            Operateur::Minus => '-',
            Operateur::Star => '*',
            Operateur::Slash => '/',
            Operateur::Caret => '^',
        }
    }
}

/// Fonctions unaires exposées par le pavé.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fonction {
    Sin,
    Cos,
    Tan,
    Log,  // base 10
    Sqrt, // √
}

impl Fonction {
    pub fn nom(self) -> &'static str {
        match self {
            Fonction::Sin => "sin",
            Fonction::Cos => "cos",
            Fonction::Tan => "tan",
            Fonction::Log => "log",
            Fonction::Sqrt => "√",
        }
    }

    /// Découpe "sinpi", "loge", "sqrte"… en (fonction, constante).
    fn prefixe_de(w: &str) -> Option<(Fonction, usize, f64)> {
        ["sqrt", "sin", "cos", "tan", "log"].iter().find_map(|nom| {
            let reste = w.strip_prefix(nom)?;
            let c = constante(reste)?;
            Some((Fonction::depuis_mot(nom)?, nom.len(), c))
        })
    }

    fn depuis_mot(w: &str) -> Option<Fonction> {
        match w {
            "sin" => Some(Fonction::Sin),
            "cos" => Some(Fonction::Cos),
            "tan" => Some(Fonction::Tan),
            "log" => Some(Fonction::Log),
            "sqrt" => Some(Fonction::Sqrt),
            _ => None,
        }
    }
}

fn constante(w: &str) -> Option<f64> {
    match w {
        "pi" => Some(PI),
        "e" => Some(E),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tok {
    // π et e arrivent ici déjà résolus
    Num(f64),
    Op(Operateur),
    Func(Fonction),
    LPar,
    RPar,
}

/// Jeton + position (index en caractères) du premier caractère.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Jeton {
    pub tok: Tok,
    pub pos: usize,
}

impl fmt::Display for Tok {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tok::Num(v) => write!(f, "{v}"),
            Tok::Op(op) => write!(f, "{}", op.symbole()),
            Tok::Func(fun) => f.write_str(fun.nom()),
            Tok::LPar => f.write_str("("),
            Tok::RPar => f.write_str(")"),
        }
    }
}

/// Tokeniseur paresseux : produit les jetons un par un.
/// Après la première erreur, l’itérateur est épuisé.
pub struct Lexer {
    chars: Vec<char>,
    i: usize,
    fini: bool,
    // constante collée à une fonction ("sinpi") : sort au tour suivant
    suivant: Option<Jeton>,
}

impl Lexer {
    pub fn new(s: &str) -> Self {
        Self {
            chars: s.chars().collect(),
            i: 0,
            fini: false,
            suivant: None,
        }
    }

    fn erreur(&mut self, position: usize) -> Option<Result<Jeton, LexError>> {
        self.fini = true;
        Some(Err(LexError {
            position,
            caractere: self.chars[position],
        }))
    }

    /// Nombre décimal : chiffres avec au plus un point (".5" et "5." acceptés).
    fn lire_nombre(&mut self) -> Result<f64, usize> {
        let start = self.i;
        let mut point = false;

        while self.i < self.chars.len() {
            let c = self.chars[self.i];
            if c.is_ascii_digit() {
                self.i += 1;
            } else if c == '.' {
                if point {
                    // deuxième point : c’est lui le fautif
                    return Err(self.i);
                }
                point = true;
                self.i += 1;
            } else {
                break;
            }
        }

        let txt: String = self.chars[start..self.i].iter().collect();
        if txt == "." {
            // point isolé
            return Err(start);
        }
        txt.parse::<f64>().map_err(|_| start)
    }
}

impl Iterator for Lexer {
    type Item = Result<Jeton, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fini {
            return None;
        }
        if let Some(j) = self.suivant.take() {
            return Some(Ok(j));
        }

        while self.i < self.chars.len() && self.chars[self.i].is_whitespace() {
            self.i += 1;
        }
        if self.i >= self.chars.len() {
            self.fini = true;
            return None;
        }

        let pos = self.i;
        let c = self.chars[pos];

        let simple = match c {
            '(' => Some(Tok::LPar),
            ')' => Some(Tok::RPar),
            '+' => Some(Tok::Op(Operateur::Plus)),
            '-' => Some(Tok::Op(Operateur::Minus)),
            '*' => Some(Tok::Op(Operateur::Star)),
            '/' => Some(Tok::Op(Operateur::Slash)),
            '^' => Some(Tok::Op(Operateur::Caret)),
            'π' => Some(Tok::Num(PI)),
            '√' => Some(Tok::Func(Fonction::Sqrt)),
            _ => None,
        };
        if let Some(tok) = simple {
            self.i += 1;
            return Some(Ok(Jeton { tok, pos }));
        }

        if c.is_ascii_digit() || c == '.' {
            return match self.lire_nombre() {
                Ok(v) => Some(Ok(Jeton {
                    tok: Tok::Num(v),
                    pos,
                })),
                Err(p) => self.erreur(p),
            };
        }

        // Mots : constantes (pi, e) et fonctions, insensibles à la casse
        if c.is_ascii_alphabetic() {
            while self.i < self.chars.len() && self.chars[self.i].is_ascii_alphabetic() {
                self.i += 1;
            }
            let w: String = self.chars[pos..self.i]
                .iter()
                .collect::<String>()
                .to_lowercase();

            if let Some(c) = constante(&w) {
                return Some(Ok(Jeton {
                    tok: Tok::Num(c),
                    pos,
                }));
            }
            if let Some(f) = Fonction::depuis_mot(&w) {
                return Some(Ok(Jeton {
                    tok: Tok::Func(f),
                    pos,
                }));
            }
            // fonction + constante collées : "sinpi" = sin π, "loge" = log e
            let Some((f, n, c)) = Fonction::prefixe_de(&w) else {
                return self.erreur(pos);
            };
            self.suivant = Some(Jeton {
                tok: Tok::Num(c),
                pos: pos + n,
            });
            let tok = Tok::Func(f);
            return Some(Ok(Jeton { tok, pos }));
        }

        self.erreur(pos)
    }
}

/// Tokenize une chaîne complète.
/// Supporte:
/// - nombres décimaux (12, 3.5, .5)
/// - opérateurs + - * / ^
/// - parenthèses ( )
/// - π / pi / e (résolus en nombres)
/// - sin cos tan log sqrt et √ ("sinpi" = sin π)
pub fn tokenize(s: &str) -> Result<Vec<Jeton>, LexError> {
    Lexer::new(s).collect()
}

/// Format utilitaire (debug/“démarche”) : liste de jetons en texte.
pub fn format_tokens(jetons: &[Jeton]) -> String {
    jetons
        .iter()
        .map(|j| j.tok.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
