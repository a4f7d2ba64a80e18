// src/app/vue.rs
//
// Vue (UI egui): natif + web
// ---------------------------
// Objectifs :
// - Même AppCalc (etat.rs) pour natif + wasm
// - Clavier : Enter évalue (quand le champ est focus), la saisie directe est annulable
// - Pavé : chiffres, opérateurs, fonctions, mémoire, annuler/rétablir
// - Fenêtre Historique (10 dernières entrées par défaut) + export texte
//
// Note :
// - Toute la logique vit dans etat.rs / actions.rs ; ici on ne fait que dessiner et dispatcher.

use eframe::egui;

use super::etat::AppCalc;
use crate::config::DECIMALES_MAX;
use crate::noyau::format_resultat;

impl AppCalc {
    /// UI principale : à appeler depuis eframe::App::update(...)
    pub fn ui(&mut self, ui: &mut egui::Ui) {
        // Densité “calc”
        ui.spacing_mut().item_spacing = egui::vec2(6.0, 6.0);

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_barre(ui);
                ui.add_space(6.0);

                self.ui_entree(ui);

                ui.add_space(8.0);
                self.ui_pave(ui);

                ui.add_space(8.0);
                ui.separator();
                ui.add_space(8.0);

                self.ui_demarche(ui);
            });

        self.ui_fenetre_historique(ui.ctx());
    }

    fn ui_barre(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.menu_button("≡", |ui| {
                if ui.button("Historique").clicked() {
                    self.historique_ouvert = true;
                    ui.close();
                }
                if ui.button("Exporter l’historique").clicked() {
                    self.exporter_historique_defaut();
                    ui.close();
                }
                if ui.button("Effacer l’historique").clicked() {
                    self.vider_historique();
                    ui.close();
                }
                ui.separator();
                let libelle = if self.reglages.theme_sombre {
                    "Thème clair"
                } else {
                    "Thème sombre"
                };
                if ui.button(libelle).clicked() {
                    self.basculer_theme();
                    ui.close();
                }
            });

            ui.heading("Calculatrice Pro");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let mut d = self.reglages.decimales as u32;
                let resp = ui.add(
                    egui::DragValue::new(&mut d)
                        .speed(1)
                        .range(0..=DECIMALES_MAX as u32)
                        .suffix(" déc."),
                );
                if resp.changed() {
                    self.set_decimales(d as usize);
                }
            });
        });

        if !self.statut.is_empty() {
            ui.small(&self.statut);
        }
    }

    fn ui_entree(&mut self, ui: &mut egui::Ui) {
        // Saisie directe : on garde l’état d’avant pour “Annuler”
        let avant = self.entree.clone();

        // IMPORTANT : id stable + focus contrôlé
        let resp = ui.add(
            egui::TextEdit::singleline(&mut self.entree)
                .desired_width(ui.available_width())
                .hint_text("Ex: 2+3*4, sin(90), √2, log(100), 2^0.5")
                .font(egui::TextStyle::Heading)
                .id_source("entree_edit"),
        );

        if resp.changed() {
            self.memoriser(avant);
        }

        // Si on a cliqué un bouton, on redonne le focus
        if self.focus_entree {
            resp.request_focus();
            self.focus_entree = false;
        }

        // --- Clavier : Enter évalue (singleline perd le focus sur Enter) ---
        let enter = ui.input(|i| i.key_pressed(egui::Key::Enter));
        if enter && (resp.has_focus() || resp.lost_focus()) {
            self.evaluer();
        }

        if !self.erreur.is_empty() {
            ui.add_space(4.0);
            ui.colored_label(ui.visuals().error_fg_color, &self.erreur);
        }

        let m = format_resultat(self.memoire, self.reglages.decimales);
        ui.label(format!("M = {m}"));
    }

    fn ui_pave(&mut self, ui: &mut egui::Ui) {
        use Touche::*;

        // Disposition reprise du pavé “Professional Calculator”
        const LIGNES: [[Touche; 5]; 7] = [
            [Ins("7"), Ins("8"), Ins("9"), Ins("/"), Ins("√")],
            [Ins("4"), Ins("5"), Ins("6"), Ins("*"), Ins("^")],
            [Ins("1"), Ins("2"), Ins("3"), Ins("-"), Ins("log(")],
            [Ins("0"), Ins("."), Ins("+"), Act(Action::Egal), Ins("sin(")],
            [Act(Action::Clear), Ins("cos("), Ins("tan("), Ins("π"), Ins("e")],
            [
                Ins("("),
                Ins(")"),
                Act(Action::Backspace),
                Act(Action::Annuler),
                Act(Action::Retablir),
            ],
            [
                Act(Action::MemPlus),
                Act(Action::MemMoins),
                Act(Action::MemRappel),
                Act(Action::MemClear),
                Vide,
            ],
        ];

        egui::Grid::new("pave_calc_pro")
            .num_columns(5)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                for ligne in LIGNES {
                    for t in ligne {
                        match t {
                            Ins(txt) => self.bouton_insert(ui, txt),
                            Act(a) => self.bouton_action(ui, a),
                            Vide => {
                                ui.label("");
                            }
                        }
                    }
                    ui.end_row();
                }
            });
    }

    fn ui_demarche(&mut self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new("Démarche")
            .default_open(false)
            .show(ui, |ui| match &self.demarche {
                Some(d) => {
                    Self::champ_demarche(ui, "Jetons", "demarche_jetons", &d.jetons);
                    Self::champ_demarche(ui, "RPN", "demarche_rpn", &d.rpn);
                    Self::champ_demarche(ui, "Arbre", "demarche_arbre", &d.arbre);
                }
                None => {
                    ui.monospace("indisponible");
                }
            });
    }

    fn ui_fenetre_historique(&mut self, ctx: &egui::Context) {
        let mut ouvert = self.historique_ouvert;
        egui::Window::new("Historique des calculs")
            .open(&mut ouvert)
            .default_width(360.0)
            .show(ctx, |ui| {
                let recents = self.historique_recent();
                if recents.is_empty() {
                    ui.label("Aucun calcul.");
                }
                for e in recents {
                    ui.monospace(e.to_string());
                }
            });
        self.historique_ouvert = ouvert;
    }

    fn champ_demarche(ui: &mut egui::Ui, titre: &str, id: &str, contenu: &str) {
        ui.add_space(4.0);
        ui.label(format!("{titre} :"));
        // Affichage lecture seule “stable”, sans TextEdit interactif.
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color)
            .show(ui, |ui| {
                ui.push_id(id, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.monospace(contenu);
                });
            });
    }

    fn bouton_action(&mut self, ui: &mut egui::Ui, action: Action) {
        let resp = ui
            .add_sized([64.0, 40.0], egui::Button::new(action.libelle()))
            .on_hover_text(action.aide());

        if resp.clicked() {
            match action {
                Action::Egal => self.evaluer(),
                Action::Clear => self.clear_entree(),
                Action::Backspace => self.effacer_dernier(),
                Action::Annuler => self.annuler(),
                Action::Retablir => self.retablir(),
                Action::MemPlus => self.memoire_plus(),
                Action::MemMoins => self.memoire_moins(),
                Action::MemRappel => self.memoire_rappel(),
                Action::MemClear => self.memoire_clear(),
            }
            self.focus_entree = true;
        }
    }

    fn bouton_insert(&mut self, ui: &mut egui::Ui, to_insert: &str) {
        // "sin(" s’affiche "sin"
        let label = to_insert.trim_end_matches('(');
        let label = if label.is_empty() { to_insert } else { label };

        let resp = ui.add_sized([64.0, 40.0], egui::Button::new(label));
        if resp.clicked() {
            self.inserer(to_insert);
            self.erreur.clear();
            self.focus_entree = true;
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Action {
    Egal,
    Clear,
    Backspace,
    Annuler,
    Retablir,
    MemPlus,
    MemMoins,
    MemRappel,
    MemClear,
}

impl Action {
    fn libelle(self) -> &'static str {
        match self {
            Action::Egal => "=",
            Action::Clear => "C",
            Action::Backspace => "⌫",
            Action::Annuler => "Undo",
            Action::Retablir => "Redo",
            Action::MemPlus => "M+",
            Action::MemMoins => "M-",
            Action::MemRappel => "MR",
            Action::MemClear => "MC",
        }
    }

    fn aide(self) -> &'static str {
        match self {
            Action::Egal => "Évalue l’entrée",
            Action::Clear => "Efface seulement l’entrée",
            Action::Backspace => "Efface le dernier symbole",
            Action::Annuler => "Revient à l’entrée précédente",
            Action::Retablir => "Rejoue l’entrée annulée",
            Action::MemPlus => "Ajoute la valeur de l’entrée à la mémoire",
            Action::MemMoins => "Retire la valeur de l’entrée de la mémoire",
            Action::MemRappel => "Remplace l’entrée par la mémoire",
            Action::MemClear => "Remet la mémoire à zéro",
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum Touche {
    Ins(&'static str),
    Act(Action),
    Vide,
}
