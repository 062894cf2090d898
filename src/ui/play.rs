use eframe::egui;
use egui::{Color32, RichText};
use std::sync::mpsc::Sender;

use crate::engine::protocol::EngineCommand;
use crate::model::stats::GameStats;
use crate::model::turn::ChoiceKind;
use crate::ui::app::UiState;
use crate::ui::creation::draw_notice;
use crate::ui::settings::UiSettings;

pub fn draw_playing(
    ctx: &egui::Context,
    state: &mut UiState,
    settings: &UiSettings,
    cmd_tx: &Sender<EngineCommand>,
) {
    let mut pending: Option<EngineCommand> = None;

    egui::TopBottomPanel::top("stats_bar").show(ctx, |ui| {
        draw_stats_bar(ui, settings, &state.snapshot.stats);
    });

    egui::TopBottomPanel::bottom("action_input").show(ctx, |ui| {
        ui.add_space(6.0);
        let mut send_now = false;

        ui.horizontal(|ui| {
            let response = ui.add_sized(
                [ui.available_width() - 80.0, 48.0],
                egui::TextEdit::multiline(&mut state.action_text)
                    .hint_text("...or do something nobody suggested")
                    .lock_focus(true),
            );

            // Enter submits, Shift+Enter breaks the line.
            if response.has_focus() {
                let enter = ui.input(|i| {
                    i.key_pressed(egui::Key::Enter) && !i.modifiers.shift
                });
                if enter {
                    send_now = true;
                }
            }

            if ui
                .add_enabled(!state.busy, egui::Button::new("Do it"))
                .clicked()
            {
                send_now = true;
            }
        });

        if send_now && !state.busy {
            let text = state.action_text.trim().to_string();
            if !text.is_empty() {
                pending = Some(EngineCommand::SubmitAction(text));
                state.action_text.clear();
            }
        }
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                let Some(turn) = state.snapshot.turn.clone() else {
                    ui.spinner();
                    return;
                };

                ui.add_space(8.0);
                ui.heading(format!("Month {}: {}", turn.month, turn.title));

                if !turn.outcome_text.is_empty() {
                    ui.add_space(6.0);
                    ui.group(|ui| {
                        ui.label(RichText::new(&turn.outcome_text).italics());
                    });
                }

                ui.add_space(6.0);
                ui.label(&turn.description);
                ui.add_space(10.0);
                ui.separator();

                for choice in &turn.choices {
                    let tag = choice
                        .kind
                        .map(|k| format!("[{}] ", k.label()))
                        .unwrap_or_default();
                    let mut text = RichText::new(format!("{}{}", tag, choice.text));
                    if let Some(kind) = choice.kind {
                        text = text.color(kind_color(kind));
                    }
                    let button = egui::Button::new(text);
                    if ui.add_enabled(!state.busy, button).clicked() {
                        pending = Some(EngineCommand::SubmitAction(choice.text.clone()));
                    }
                    ui.add_space(4.0);
                }

                if state.busy {
                    ui.add_space(10.0);
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("The narrator is rolling the dice...");
                    });
                }

                ui.add_space(10.0);
                ui.collapsing("Logbook", |ui| {
                    for line in &state.snapshot.history {
                        ui.small(line.as_str());
                    }
                });

                draw_notice(ui, state);
            });
    });

    if let Some(cmd) = pending {
        state.send(cmd_tx, cmd);
    }
}

pub fn draw_game_over(
    ctx: &egui::Context,
    state: &mut UiState,
    settings: &UiSettings,
    cmd_tx: &Sender<EngineCommand>,
) {
    let mut pending: Option<EngineCommand> = None;

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(ui.available_height() * 0.15);
        ui.vertical_centered(|ui| {
            let turn = state.snapshot.turn.clone();

            let headline = turn
                .as_ref()
                .and_then(|t| t.ending)
                .map(|e| e.headline())
                .unwrap_or("Game Over");
            ui.label(RichText::new(headline).size(36.0).strong());

            if let Some(turn) = &turn {
                if !turn.outcome_text.is_empty() {
                    ui.add_space(10.0);
                    ui.label(RichText::new(&turn.outcome_text).italics());
                }

                ui.add_space(16.0);
                ui.label(format!("Survived: {}/12 months", turn.month.min(12)));
            }

            let stats = state.snapshot.stats;
            ui.label(
                RichText::new(format!("Final valuation: ${}k", stats.valuation()))
                    .color(settings.color("cash"))
                    .strong(),
            );

            ui.add_space(12.0);
            draw_stats_bar(ui, settings, &stats);

            ui.add_space(20.0);
            if ui
                .add(egui::Button::new(RichText::new("↺ Run it back").size(18.0)))
                .clicked()
            {
                pending = Some(EngineCommand::NewGame);
            }
        });
    });

    if let Some(cmd) = pending {
        state.send(cmd_tx, cmd);
    }
}

fn draw_stats_bar(ui: &mut egui::Ui, settings: &UiSettings, stats: &GameStats) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        stat_card(ui, settings, "cash", "Cash", format!("{}k", stats.cash));
        stat_card(ui, settings, "team", "Team", stats.team.to_string());
        stat_card(ui, settings, "product", "Product", stats.product.to_string());
        stat_card(ui, settings, "traction", "Traction", stats.traction.to_string());
        stat_card(ui, settings, "stress", "Stress", stats.stress.to_string());
    });
    ui.add_space(6.0);
}

fn stat_card(ui: &mut egui::Ui, settings: &UiSettings, key: &str, label: &str, value: String) {
    ui.group(|ui| {
        ui.vertical(|ui| {
            ui.small(label);
            ui.label(
                RichText::new(value)
                    .color(settings.color(key))
                    .monospace()
                    .strong(),
            );
        });
    });
    ui.add_space(6.0);
}

fn kind_color(kind: ChoiceKind) -> Color32 {
    match kind {
        ChoiceKind::Safe => Color32::from_rgb(110, 200, 120),
        ChoiceKind::Risky => Color32::from_rgb(230, 160, 70),
        ChoiceKind::Wild => Color32::from_rgb(220, 80, 80),
    }
}
