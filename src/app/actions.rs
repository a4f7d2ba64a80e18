//! src/app/actions.rs
//!
//! Handlers qui passent par le noyau : "=", M+, M-, MR, export, thème.
//! La vue (vue.rs) ne fait que les déclencher.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::etat::AppCalc;
use crate::noyau::erreurs::EvalError;
use crate::noyau::{evaluate, evaluate_detail, format_resultat};

const TITRE_EXPORT: &str = "Calculation History";

impl AppCalc {
    /// "=" : évalue l’entrée, puis dépose le résultat (ou l’erreur) dans l’état.
    pub fn evaluer(&mut self) {
        let expression = self.entree.trim().to_string();

        match evaluate_detail(&expression) {
            Ok(d) => {
                let resultat = format_resultat(d.valeur, self.reglages.decimales);
                debug!(%expression, %resultat, "évaluation");
                self.set_resultat(expression, resultat, d);
            }
            Err(e) => {
                debug!(%expression, erreur = %e, "évaluation refusée");
                self.set_erreur(e.to_string());
            }
        }
    }

    /// Valeur de l’entrée courante pour M+/M- (None si entrée vide).
    fn valeur_entree(&mut self) -> Option<f64> {
        let s = self.entree.trim();
        if s.is_empty() {
            return None;
        }
        match evaluate(s) {
            Ok(v) => Some(v),
            Err(e) => {
                self.set_erreur(e.to_string());
                None
            }
        }
    }

    /// M+
    pub fn memoire_plus(&mut self) {
        self.memoire_cumuler(1.0, "M+");
    }

    /// M-
    pub fn memoire_moins(&mut self) {
        self.memoire_cumuler(-1.0, "M-");
    }

    /// Registre += signe * entrée. Un registre non fini est refusé (il reste inchangé).
    fn memoire_cumuler(&mut self, signe: f64, touche: &'static str) {
        if let Some(v) = self.valeur_entree() {
            let m = self.memoire + signe * v;
            if m.is_finite() {
                self.memoire = m;
                debug!(memoire = m, touche, "mémoire");
            } else {
                debug!(memoire = self.memoire, touche, "mémoire : dépassement");
                self.set_erreur(EvalError::Overflow.to_string());
            }
        }
        self.focus_entree = true;
    }

    /// MR : l’entrée devient la valeur mémorisée (annulable).
    pub fn memoire_rappel(&mut self) {
        let txt = format_resultat(self.memoire, self.reglages.decimales);
        self.erreur.clear();
        self.remplacer_entree(txt);
    }

    /// Écrit l’historique en texte : un titre, puis une ligne par calcul.
    /// Historique vide : rien n’est écrit (Ok(false)).
    pub fn exporter_historique(&self, chemin: &Path) -> Result<bool> {
        if self.historique.is_empty() {
            return Ok(false);
        }

        let mut txt = String::new();
        txt.push_str(TITRE_EXPORT);
        txt.push('\n');
        for e in &self.historique {
            txt.push_str(&e.to_string());
            txt.push('\n');
        }

        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("création de {}", parent.display()))?;
        }
        fs::write(chemin, txt).with_context(|| format!("écriture de {}", chemin.display()))?;
        info!(chemin = %chemin.display(), lignes = self.historique.len(), "historique exporté");
        Ok(true)
    }

    /// Bouton “Exporter” : écrit dans le dossier d’export des réglages.
    pub fn exporter_historique_defaut(&mut self) {
        let chemin: PathBuf = self.reglages.dossier_export().join("historique-calculs.txt");
        self.statut = match self.exporter_historique(&chemin) {
            Ok(true) => format!("Historique exporté : {}", chemin.display()),
            Ok(false) => "Historique vide : rien à exporter.".to_string(),
            Err(e) => {
                warn!("export impossible : {e:#}");
                format!("Export impossible : {e}")
            }
        };
    }

    /// Clair <-> sombre, persisté dans les réglages.
    pub fn basculer_theme(&mut self) {
        self.reglages.theme_sombre = !self.reglages.theme_sombre;
        if let Err(e) = self.reglages.enregistrer() {
            warn!("réglages non enregistrés : {e:#}");
        }
    }
}
