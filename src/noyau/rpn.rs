// src/noyau/rpn.rs
//
// Shunting-yard -> RPN -> AST
// Objectif:
// - Convertir une suite de Jeton en RPN (postfix), en validant la structure
// - Puis reconstruire Expr
//
// Règles:
// - Précédence : moins unaire (4) > ^ (3) > * / (2) > + - (1)
// - ^ associatif à droite, le reste à gauche
// - Moins unaire : '-' qui arrive quand on attend une valeur => Neg ("-2^2" = 4)
// - Plus unaire : ignoré
// - Fonction : DOIT être suivie de "(" ou d’un nombre nu ("sin30", "√4", "√π")
//
// NOTE:
// - Avec un argument parenthésé, la fonction reste sur la pile et sort
//   juste après la parenthèse fermante.
// - Avec un nombre nu, elle sort immédiatement derrière lui : "√4^2" = (√4)^2.
// - L’arbre est parcouru récursivement (eval, affichage, libération) :
//   borner() refuse une RPN trop longue ou trop profonde AVANT de le construire.

use super::erreurs::{EvalError, EvaluationError, ParseError, ParseErrorKind};
use super::expr::Expr;
use super::jetons::{Fonction, Jeton, Operateur, Tok};

/// Élément de la sortie postfixée.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rpn {
    Num(f64),
    Op(Operateur),
    Neg,
    Func(Fonction),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElemRpn {
    pub item: Rpn,
    pub pos: usize,
}

/// Pile d’opérateurs en attente.
#[derive(Clone, Copy, Debug)]
enum EnAttente {
    Op(Operateur, usize),
    Neg(usize),
    LPar(usize),
    Func(Fonction, usize),
}

fn precedence(op: Operateur) -> u8 {
    match op {
        Operateur::Plus | Operateur::Minus => 1,
        Operateur::Star | Operateur::Slash => 2,
        Operateur::Caret => 3,
    }
}

const PRECEDENCE_NEG: u8 = 4;

/// Garde-fous (taille de la RPN, profondeur de l’arbre).
pub const MAX_NOEUDS: usize = 200_000;
pub const MAX_PROFONDEUR: usize = 2048;

fn is_right_associative(op: Operateur) -> bool {
    matches!(op, Operateur::Caret)
}

fn err(genre: ParseErrorKind, position: usize) -> ParseError {
    ParseError::new(genre, position)
}

/// Convertit une suite de jetons en RPN (notation polonaise inversée).
///
/// Exemple:
///   jetons: [Func(sin), LPar, Num(90), Slash, Num(2), RPar]
///   rpn:    [Num(90), Num(2), Op(/), Func(sin)]
pub fn to_rpn(jetons: &[Jeton]) -> Result<Vec<ElemRpn>, ParseError> {
    use ParseErrorKind::*;

    if jetons.is_empty() {
        return Err(err(EmptyExpression, 0));
    }

    let mut out: Vec<ElemRpn> = Vec::with_capacity(jetons.len());
    let mut ops: Vec<EnAttente> = Vec::new();

    // Automate à deux états : on attend une valeur (atome, "(", fonction, unaire)
    // ou un opérateur binaire / ")".
    let mut attend_valeur = true;

    let mut idx = 0;
    while idx < jetons.len() {
        let Jeton { tok, pos } = jetons[idx];
        idx += 1;

        match tok {
            Tok::Num(v) => {
                if !attend_valeur {
                    return Err(err(UnexpectedToken, pos));
                }
                out.push(ElemRpn {
                    item: Rpn::Num(v),
                    pos,
                });
                attend_valeur = false;
            }

            Tok::Func(f) => {
                if !attend_valeur {
                    return Err(err(UnexpectedToken, pos));
                }
                match jetons.get(idx) {
                    // nombre nu : la fonction s’applique tout de suite
                    Some(Jeton {
                        tok: Tok::Num(v),
                        pos: pos_arg,
                    }) => {
                        out.push(ElemRpn {
                            item: Rpn::Num(*v),
                            pos: *pos_arg,
                        });
                        out.push(ElemRpn {
                            item: Rpn::Func(f),
                            pos,
                        });
                        idx += 1;
                        attend_valeur = false;
                    }
                    // argument parenthésé : "(" traitée au tour suivant
                    Some(Jeton { tok: Tok::LPar, .. }) => {
                        ops.push(EnAttente::Func(f, pos));
                    }
                    _ => return Err(err(MissingOperand, pos)),
                }
            }

            Tok::LPar => {
                if !attend_valeur {
                    return Err(err(UnexpectedToken, pos));
                }
                ops.push(EnAttente::LPar(pos));
            }

            Tok::RPar => {
                if !ops.iter().any(|o| matches!(o, EnAttente::LPar(_))) {
                    return Err(err(UnbalancedParens, pos));
                }
                if attend_valeur {
                    // "()" ou "(2+)"
                    return Err(err(MissingOperand, pos));
                }

                // dépile jusqu’à '('
                while let Some(top) = ops.pop() {
                    match top {
                        EnAttente::LPar(_) => break,
                        autre => out.push(sortie(autre)),
                    }
                }

                // si une fonction attendait cet argument, elle sort aussi
                if let Some(EnAttente::Func(f, p)) = ops.last().copied() {
                    ops.pop();
                    out.push(ElemRpn {
                        item: Rpn::Func(f),
                        pos: p,
                    });
                }

                attend_valeur = false;
            }

            Tok::Op(op) => {
                if attend_valeur {
                    match op {
                        Operateur::Minus => ops.push(EnAttente::Neg(pos)),
                        Operateur::Plus => {} // plus unaire : sans effet
                        _ => return Err(err(MissingOperand, pos)),
                    }
                    continue;
                }

                // dépile tant que la précédence/associativité l’exige
                while let Some(top) = ops.last().copied() {
                    let p_top = match top {
                        EnAttente::Op(o, _) => precedence(o),
                        EnAttente::Neg(_) => PRECEDENCE_NEG,
                        EnAttente::LPar(_) | EnAttente::Func(..) => break,
                    };
                    let p_tok = precedence(op);

                    let doit_pop = if is_right_associative(op) {
                        p_top > p_tok
                    } else {
                        p_top >= p_tok
                    };

                    if !doit_pop {
                        break;
                    }
                    ops.pop();
                    out.push(sortie(top));
                }

                ops.push(EnAttente::Op(op, pos));
                attend_valeur = true;
            }
        }
    }

    if attend_valeur {
        // opérateur pendant en fin d’entrée : "2+", "-", "(("...
        if let Some(p) = ops.iter().rev().find_map(|o| match o {
            EnAttente::LPar(p) => Some(*p),
            _ => None,
        }) {
            return Err(err(UnbalancedParens, p));
        }
        let dernier = jetons.last().map(|j| j.pos).unwrap_or(0);
        return Err(err(MissingOperand, dernier));
    }

    // vide la pile ops
    while let Some(top) = ops.pop() {
        if let EnAttente::LPar(p) = top {
            return Err(err(UnbalancedParens, p));
        }
        out.push(sortie(top));
    }

    Ok(out)
}

fn sortie(o: EnAttente) -> ElemRpn {
    match o {
        EnAttente::Op(op, pos) => ElemRpn {
            item: Rpn::Op(op),
            pos,
        },
        EnAttente::Neg(pos) => ElemRpn {
            item: Rpn::Neg,
            pos,
        },
        EnAttente::Func(f, pos) => ElemRpn {
            item: Rpn::Func(f),
            pos,
        },
        // to_rpn traite "(" avant d’appeler sortie()
        EnAttente::LPar(_) => unreachable!(),
    }
}

/// Construit une Expr à partir d’une RPN.
pub fn from_rpn(rpn: &[ElemRpn]) -> Result<Expr, ParseError> {
    use ParseErrorKind::*;

    let mut st: Vec<Expr> = Vec::with_capacity(rpn.len());

    for e in rpn {
        match e.item {
            Rpn::Num(v) => st.push(Expr::Lit(v)),

            Rpn::Op(op) => {
                let b = st.pop().ok_or(err(MissingOperand, e.pos))?;
                let a = st.pop().ok_or(err(MissingOperand, e.pos))?;
                st.push(Expr::bin(op, a, b));
            }

            Rpn::Neg => {
                let x = st.pop().ok_or(err(MissingOperand, e.pos))?;
                st.push(Expr::neg(x));
            }

            Rpn::Func(f) => {
                let x = st.pop().ok_or(err(MissingOperand, e.pos))?;
                st.push(Expr::func(f, x));
            }
        }
    }

    match (st.pop(), st.is_empty()) {
        (Some(racine), true) => Ok(racine),
        (None, _) => Err(err(EmptyExpression, 0)),
        (Some(_), false) => {
            let pos = rpn.last().map(|e| e.pos).unwrap_or(0);
            Err(err(UnexpectedToken, pos))
        }
    }
}

/// Vérifie que l’arbre issu de `rpn` reste dans les garde-fous.
/// Dépassement => Overflow (l’entrée est valide, mais trop grosse).
pub fn borner(rpn: &[ElemRpn]) -> Result<(), EvalError> {
    if rpn.len() > MAX_NOEUDS {
        return Err(EvalError::Overflow);
    }

    // profondeur de chaque sous-arbre, simulée sur une pile d’entiers
    let mut pile: Vec<usize> = Vec::with_capacity(64);
    for e in rpn {
        let prof = match e.item {
            Rpn::Num(_) => 1,
            Rpn::Neg | Rpn::Func(_) => pile.pop().unwrap_or(0) + 1,
            Rpn::Op(_) => {
                let b = pile.pop().unwrap_or(0);
                let a = pile.pop().unwrap_or(0);
                a.max(b) + 1
            }
        };
        if prof > MAX_PROFONDEUR {
            return Err(EvalError::Overflow);
        }
        pile.push(prof);
    }
    Ok(())
}

/// Jetons -> RPN -> (garde-fous) -> Expr.
pub fn parse(jetons: &[Jeton]) -> Result<Expr, EvaluationError> {
    let rpn = to_rpn(jetons)?;
    borner(&rpn)?;
    Ok(from_rpn(&rpn)?)
}

/// Format utilitaire (“démarche”) : RPN en texte.
pub fn format_rpn(rpn: &[ElemRpn]) -> String {
    rpn.iter()
        .map(|e| match e.item {
            Rpn::Num(v) => format!("{v}"),
            Rpn::Op(op) => op.symbole().to_string(),
            Rpn::Neg => "neg".to_string(),
            Rpn::Func(f) => f.nom().to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
