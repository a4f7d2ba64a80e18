//! Réglages utilisateur (TOML).
//!
//! Emplacement : `<config_dir>/calculatrice-pro/config.toml`.
//! - fichier absent  => valeurs par défaut
//! - fichier invalide => avertissement + valeurs par défaut (l’appli démarre quand même)

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

const DOSSIER_APP: &str = "calculatrice-pro";
const FICHIER_CONFIG: &str = "config.toml";

/// Décimales affichées par défaut.
pub const DECIMALES_DEFAUT: usize = 10;

/// Garde-fou : un f64 n’a pas plus de ~17 chiffres significatifs.
pub const DECIMALES_MAX: usize = 17;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Reglages {
    /// Décimales d’affichage des résultats.
    pub decimales: usize,
    /// Nombre d’entrées montrées par la fenêtre Historique.
    pub historique_affiche: usize,
    pub theme_sombre: bool,
    /// Dossier d’export de l’historique (défaut : Documents, sinon dossier courant).
    pub dossier_export: Option<PathBuf>,
}

impl Default for Reglages {
    fn default() -> Self {
        Self {
            decimales: DECIMALES_DEFAUT,
            historique_affiche: 10,
            theme_sombre: false,
            dossier_export: None,
        }
    }
}

impl Reglages {
    /// Chemin du fichier de config, si la plateforme en a un.
    pub fn chemin() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(DOSSIER_APP).join(FICHIER_CONFIG))
    }

    /// Charge les réglages sans jamais échouer.
    pub fn charger() -> Self {
        let Some(chemin) = Self::chemin() else {
            debug!("pas de dossier de config : réglages par défaut");
            return Self::default();
        };

        Self::charger_ou_defaut(&chemin)
    }

    /// Fichier absent ou invalide => réglages par défaut (avertissement si invalide).
    pub fn charger_ou_defaut(chemin: &Path) -> Self {
        if !chemin.exists() {
            debug!(chemin = %chemin.display(), "config absente : réglages par défaut");
            return Self::default();
        }

        match Self::charger_depuis(chemin) {
            Ok(r) => {
                info!(chemin = %chemin.display(), "réglages chargés");
                r
            }
            Err(e) => {
                warn!("config ignorée : {e:#}");
                Self::default()
            }
        }
    }

    pub fn charger_depuis(chemin: &Path) -> Result<Self> {
        let txt = fs::read_to_string(chemin)
            .with_context(|| format!("lecture de {}", chemin.display()))?;
        Self::depuis_toml(&txt).with_context(|| format!("analyse de {}", chemin.display()))
    }

    pub fn depuis_toml(txt: &str) -> Result<Self> {
        let r: Reglages = toml::from_str(txt)?;
        Ok(r.borne())
    }

    /// Écrit les réglages (crée le dossier si besoin).
    pub fn enregistrer(&self) -> Result<()> {
        let chemin = Self::chemin().context("aucun dossier de configuration sur cette plateforme")?;
        self.enregistrer_vers(&chemin)
    }

    pub fn enregistrer_vers(&self, chemin: &Path) -> Result<()> {
        if let Some(parent) = chemin.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("création de {}", parent.display()))?;
        }
        let txt = toml::to_string_pretty(self).context("sérialisation des réglages")?;
        fs::write(chemin, txt).with_context(|| format!("écriture de {}", chemin.display()))?;
        debug!(chemin = %chemin.display(), "réglages enregistrés");
        Ok(())
    }

    /// Dossier où exporter l’historique.
    pub fn dossier_export(&self) -> PathBuf {
        self.dossier_export
            .clone()
            .or_else(dirs::document_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    fn borne(mut self) -> Self {
        self.decimales = self.decimales.min(DECIMALES_MAX);
        self
    }
}
