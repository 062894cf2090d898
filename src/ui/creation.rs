use eframe::egui;
use egui::{Color32, RichText};
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::catalog;
use crate::model::stats::FounderStatKey;
use crate::ui::app::UiState;

const PROS_GREEN: Color32 = Color32::from_rgb(110, 200, 120);
const CONS_RED: Color32 = Color32::from_rgb(220, 80, 80);

pub fn draw_start(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("Founder Simulator").size(40.0).strong());
            ui.add_space(8.0);
            ui.label("Live through the darkest timeline of your own startup.");
            ui.label(
                RichText::new("Bankruptcy is usually only one month away.")
                    .italics()
                    .weak(),
            );
            ui.add_space(24.0);
            if ui
                .add(egui::Button::new(RichText::new("Start").size(20.0)))
                .clicked()
            {
                state.send(cmd_tx, EngineCommand::NewGame);
            }
        });
    });
}

pub fn draw_character_create(
    ctx: &egui::Context,
    state: &mut UiState,
    cmd_tx: &Sender<EngineCommand>,
) {
    let mut pending: Option<EngineCommand> = None;

    egui::TopBottomPanel::top("allocation_bar").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.heading("1. Pick a persona, then spend your talent points");

        let allocation = state.snapshot.allocation;
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(format!("Points left: {}", allocation.points_left)).strong(),
            );
            ui.separator();

            for key in FounderStatKey::ALL {
                ui.label(key.label());
                if ui.small_button("−").clicked() {
                    pending = Some(EngineCommand::AdjustStat { stat: key, delta: -1 });
                }
                ui.label(
                    RichText::new(format!("{}", allocation.stats.get(key))).monospace(),
                );
                if ui.small_button("+").clicked() {
                    pending = Some(EngineCommand::AdjustStat { stat: key, delta: 1 });
                }
                ui.separator();
            }

            let ready = state.snapshot.selected_id.is_some() && allocation.points_left == 0;
            if ui
                .add_enabled(ready, egui::Button::new("Confirm ➡"))
                .clicked()
            {
                pending = Some(EngineCommand::ConfirmProfile);
            }
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                egui::Grid::new("persona_grid")
                    .num_columns(4)
                    .spacing([14.0, 14.0])
                    .min_col_width(220.0)
                    .show(ui, |ui| {
                        for (i, archetype) in state.archetypes.iter().enumerate() {
                            let selected = state.snapshot.selected_id.as_deref()
                                == Some(archetype.id.as_str());

                            ui.vertical(|ui| {
                                let title = RichText::new(format!(
                                    "{}  {}",
                                    archetype.id, archetype.name
                                ))
                                .strong();
                                if ui.selectable_label(selected, title).clicked() {
                                    pending = Some(EngineCommand::SelectArchetype(
                                        archetype.id.clone(),
                                    ));
                                }
                                ui.small(archetype.description.as_str());
                                ui.colored_label(
                                    PROS_GREEN,
                                    format!("+ {}", archetype.pros),
                                );
                                ui.colored_label(CONS_RED, format!("− {}", archetype.cons));
                            });

                            if i % 4 == 3 {
                                ui.end_row();
                            }
                        }
                    });
            });

        draw_notice(ui, state);
    });

    if let Some(cmd) = pending {
        state.send(cmd_tx, cmd);
    }
}

pub fn draw_idea_phase(ctx: &egui::Context, state: &mut UiState, cmd_tx: &Sender<EngineCommand>) {
    let mut pending: Option<EngineCommand> = None;
    let mut roll_idea = false;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(40.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("2. Pitch your world-changing idea").size(26.0).strong());
            ui.label("Type anything. The narrator will extrapolate its future.");
            ui.add_space(16.0);

            ui.add_sized(
                [560.0, 140.0],
                egui::TextEdit::multiline(&mut state.idea_text)
                    .hint_text("e.g. a translator that understands cats, or a social \
                                app that only opens at 3 a.m."),
            );

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                // Center the button row by hand.
                ui.add_space((ui.available_width() - 280.0).max(0.0) / 2.0);

                if ui
                    .add_enabled(!state.busy, egui::Button::new("🎲 Random idea"))
                    .clicked()
                {
                    roll_idea = true;
                }

                let can_launch = !state.idea_text.trim().is_empty() && !state.busy;
                if ui
                    .add_enabled(can_launch, egui::Button::new("🚀 Launch"))
                    .clicked()
                {
                    pending = Some(EngineCommand::SubmitIdea(state.idea_text.clone()));
                }
            });

            if state.busy {
                ui.add_space(12.0);
                ui.spinner();
                ui.label("The narrator is reading your pitch deck...");
            }

            if let Some(profile) = &state.snapshot.profile {
                ui.add_space(24.0);
                ui.separator();
                ui.horizontal(|ui| {
                    ui.label(format!(
                        "{} ({})",
                        profile.archetype.name, profile.archetype.id
                    ));
                    ui.colored_label(PROS_GREEN, format!("✔ {}", profile.buff.name));
                    ui.colored_label(CONS_RED, format!("⚠ {}", profile.debuff.name));
                });
            }
        });

        draw_notice(ui, state);
    });

    if roll_idea {
        state.idea_text = catalog::random_idea();
    }
    if let Some(cmd) = pending {
        state.send(cmd_tx, cmd);
    }
}

pub fn draw_notice(ui: &mut egui::Ui, state: &UiState) {
    if let Some(notice) = &state.notice {
        ui.add_space(6.0);
        ui.colored_label(CONS_RED, notice);
    }
}
