//! src/app/etat.rs
//!
//! État UI (sans vue, sans noyau).
//!
//! Rôle : contenir l’état de la calculatrice (entrée, historique, mémoire,
//! annuler/rétablir, erreur, démarche) et offrir les opérations d’édition
//! sans logique d’affichage.
//!
//! Contrats :
//! - Aucune évaluation ici (voir actions.rs).
//! - Aucun état global : tout vit dans AppCalc, passé par &mut aux handlers.
//! - Toute modification de l’entrée dépose un instantané dans `annulation`.

use crate::config::{Reglages, DECIMALES_MAX};
use crate::noyau::Demarche;

/// Garde-fou : profondeur max de la pile annuler (anti-abus mémoire).
const ANNULATION_MAX: usize = 256;

/// Une ligne d’historique : "expression = résultat".
#[derive(Clone, Debug, PartialEq)]
pub struct EntreeHistorique {
    pub expression: String,
    pub resultat: String,
}

impl std::fmt::Display for EntreeHistorique {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.expression, self.resultat)
    }
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrée utilisateur ---
    pub entree: String,

    // --- sorties ---
    pub erreur: String,         // message d’erreur (si l’évaluation échoue)
    pub demarche: Option<Demarche>,

    // --- historique (ajout seulement, sauf “Effacer l’historique”) ---
    pub historique: Vec<EntreeHistorique>,

    // --- registre mémoire (M+ / M- / MR / MC) ---
    pub memoire: f64,

    // --- annuler / rétablir : instantanés de l’entrée ---
    pub annulation: Vec<String>,
    pub retablissement: Vec<String>,

    // --- paramètres ---
    pub reglages: Reglages,

    // --- UX ---
    pub focus_entree: bool,
    pub historique_ouvert: bool,
    pub statut: String, // message discret (export, etc.)
}

impl Default for AppCalc {
    fn default() -> Self {
        Self::new(Reglages::default())
    }
}

impl AppCalc {
    pub fn new(reglages: Reglages) -> Self {
        Self {
            entree: String::new(),
            erreur: String::new(),
            demarche: None,
            historique: Vec::new(),
            memoire: 0.0,
            annulation: Vec::new(),
            retablissement: Vec::new(),
            reglages,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
            historique_ouvert: false,
            statut: String::new(),
        }
    }

    /* ------------------------ Annuler / rétablir ------------------------ */

    /// Dépose `avant` dans la pile annuler. Une nouvelle édition invalide “rétablir”.
    pub fn memoriser(&mut self, avant: String) {
        if avant == self.entree {
            return; // rien n’a bougé
        }
        self.annulation.push(avant);
        if self.annulation.len() > ANNULATION_MAX {
            self.annulation.remove(0);
        }
        self.retablissement.clear();
    }

    /// Remplace l’entrée en gardant l’ancienne dans la pile annuler.
    pub fn remplacer_entree(&mut self, nouvelle: String) {
        let avant = std::mem::replace(&mut self.entree, nouvelle);
        self.memoriser(avant);
        self.focus_entree = true;
    }

    pub fn annuler(&mut self) {
        if let Some(prec) = self.annulation.pop() {
            let courant = std::mem::replace(&mut self.entree, prec);
            self.retablissement.push(courant);
        }
        self.focus_entree = true;
    }

    pub fn retablir(&mut self) {
        if let Some(suiv) = self.retablissement.pop() {
            let courant = std::mem::replace(&mut self.entree, suiv);
            self.annulation.push(courant);
        }
        self.focus_entree = true;
    }

    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// Ajoute le texte d’un bouton (chiffre, opérateur, "sin(", "π"...).
    pub fn inserer(&mut self, texte: &str) {
        let mut s = self.entree.clone();
        s.push_str(texte);
        self.remplacer_entree(s);
    }

    /// ⌫ : retire le dernier caractère.
    pub fn effacer_dernier(&mut self) {
        if self.entree.is_empty() {
            return;
        }
        let mut s = self.entree.clone();
        s.pop();
        self.remplacer_entree(s);
    }

    /// C : effacer seulement l’entrée (sans toucher à l’historique ni à la mémoire).
    pub fn clear_entree(&mut self) {
        if !self.entree.is_empty() {
            self.remplacer_entree(String::new());
        }
        self.erreur.clear();
        self.focus_entree = true;
    }

    /// Utilitaire : placer une erreur.
    ///
    /// Choix UX : l’entrée fautive est vidée, mais reste récupérable par “Annuler”.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.demarche = None;
        if !self.entree.is_empty() {
            self.remplacer_entree(String::new());
        }
        self.focus_entree = true;
    }

    /// Utilitaire : déposer un résultat (historique + entrée remplacée par le résultat).
    pub fn set_resultat(&mut self, expression: String, resultat: String, demarche: Demarche) {
        self.erreur.clear();
        self.historique.push(EntreeHistorique {
            expression,
            resultat: resultat.clone(),
        });
        self.demarche = Some(demarche);
        self.remplacer_entree(resultat);
    }

    /* ------------------------ Historique ------------------------ */

    pub fn vider_historique(&mut self) {
        self.historique.clear();
        self.statut = "Historique effacé.".into();
    }

    /// Les dernières entrées, les plus anciennes d’abord.
    pub fn historique_recent(&self) -> &[EntreeHistorique] {
        let n = self.reglages.historique_affiche;
        let debut = self.historique.len().saturating_sub(n);
        &self.historique[debut..]
    }

    /* ------------------------ Mémoire (sans évaluation) ------------------------ */

    /// MC
    pub fn memoire_clear(&mut self) {
        self.memoire = 0.0;
    }

    /* ------------------------ Paramètres ------------------------ */

    /// Garde-fou : limite les décimales d’affichage.
    pub fn set_decimales(&mut self, decimales: usize) {
        self.reglages.decimales = decimales.min(DECIMALES_MAX);
        self.focus_entree = true;
    }
}
