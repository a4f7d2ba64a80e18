// src/noyau/format.rs

use num_traits::ToPrimitive;

/// Au-delà, un f64 “entier” n’est plus garanti exact à l’unité près.
const ENTIER_MAX_AFFICHABLE: f64 = 1e15;

/// Formate un résultat pour l’affichage ET pour la ré-saisie :
/// - entier (< 1e15) : sans point décimal
/// - sinon : arrondi à `decimales`, zéros finaux retirés
/// - jamais de notation exponentielle (le tokeniseur ne la lit pas)
pub fn format_resultat(v: f64, decimales: usize) -> String {
    if v.fract() == 0.0 && v.abs() < ENTIER_MAX_AFFICHABLE {
        if let Some(n) = v.to_i64() {
            return n.to_string();
        }
    }

    let txt = trim_zeros(format!("{v:.decimales$}"));

    // valeur non nulle écrasée par l’arrondi : on garde tous les chiffres
    if v != 0.0 && (txt == "0" || txt == "-0") {
        return format!("{v}");
    }
    txt
}

fn trim_zeros(s: String) -> String {
    if !s.contains('.') {
        return s;
    }
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
