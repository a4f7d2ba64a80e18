// src/noyau/trig.rs
//
// Trig en DEGRÉS (contrat d’affichage du pavé) pour sin/cos/tan
// -----------------------------------------------------------
// - Réduction modulo 360°
// - Table des angles “exactement reconnus” (multiples de 30° et 45°)
//   quand la valeur est rationnelle : 0, ±1/2, ±1
// - tan(90° + k·180°) : indéfini => DomainError
// - Hors table : conversion en radians + primitives f64

use super::erreurs::EvalError;

#[derive(Clone, Copy, Debug)]
pub enum TrigFn {
    Sin,
    Cos,
    Tan,
}

/// Reconnaît les angles spéciaux (en degrés).
///
/// Retour:
/// - Some(Ok(v))  si reconnu
/// - Some(Err(DomainError)) si indéfini (tan(90), tan(270))
/// - None si non reconnu (le calcul flottant prend le relais)
pub fn trig_special(degres: f64, f: TrigFn) -> Option<Result<f64, EvalError>> {
    let a = degres.rem_euclid(360.0);
    if a.fract() != 0.0 {
        return None;
    }
    // a ∈ [0, 360) entier : conversion sans perte
    let k = a as u16;

    let v = match (f, k) {
        (TrigFn::Sin, 0 | 180) => 0.0,
        (TrigFn::Sin, 30 | 150) => 0.5,
        (TrigFn::Sin, 90) => 1.0,
        (TrigFn::Sin, 210 | 330) => -0.5,
        (TrigFn::Sin, 270) => -1.0,

        (TrigFn::Cos, 0) => 1.0,
        (TrigFn::Cos, 60 | 300) => 0.5,
        (TrigFn::Cos, 90 | 270) => 0.0,
        (TrigFn::Cos, 120 | 240) => -0.5,
        (TrigFn::Cos, 180) => -1.0,

        (TrigFn::Tan, 0 | 180) => 0.0,
        (TrigFn::Tan, 45 | 225) => 1.0,
        (TrigFn::Tan, 135 | 315) => -1.0,
        (TrigFn::Tan, 90 | 270) => return Some(Err(EvalError::DomainError)),

        _ => return None,
    };
    Some(Ok(v))
}

/// sin/cos/tan d’un angle en degrés.
pub fn trig_degres(degres: f64, f: TrigFn) -> Result<f64, EvalError> {
    if let Some(r) = trig_special(degres, f) {
        return r;
    }
    let rad = degres.to_radians();
    Ok(match f {
        TrigFn::Sin => rad.sin(),
        TrigFn::Cos => rad.cos(),
        TrigFn::Tan => rad.tan(),
    })
}
