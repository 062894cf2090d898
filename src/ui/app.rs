use eframe::egui;
use std::sync::mpsc;
use std::time::Duration;

use crate::engine::engine::Engine;
use crate::engine::llm_client::{ChatClient, NarratorConfig};
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::model::catalog::{self, FounderArchetype};
use crate::model::session::{GameStatus, Session, SessionSnapshot};
use crate::ui::settings::UiSettings;
use crate::ui::settings_io;
use crate::ui::{creation, play};

/* =========================
   UI State
   ========================= */

pub struct UiState {
    pub snapshot: SessionSnapshot,
    pub busy: bool,

    pub idea_text: String,
    pub action_text: String,
    pub notice: Option<String>,

    /// Fixed catalog, fetched once for the selection grid.
    pub archetypes: Vec<FounderArchetype>,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            snapshot: SessionSnapshot::from(&Session::default()),
            busy: false,
            idea_text: String::new(),
            action_text: String::new(),
            notice: None,
            archetypes: catalog::all_archetypes(),
        }
    }
}

impl UiState {
    /// Queue an intent. Submissions that trigger a narrator round trip
    /// flip the busy flag; every control is disabled until the engine
    /// answers, so at most one request is ever outstanding.
    pub fn send(&mut self, tx: &mpsc::Sender<EngineCommand>, cmd: EngineCommand) {
        if matches!(
            cmd,
            EngineCommand::SubmitIdea(_) | EngineCommand::SubmitAction(_)
        ) {
            self.busy = true;
        }
        self.notice = None;
        let _ = tx.send(cmd);
    }
}

/* =========================
   App
   ========================= */

pub struct FounderApp {
    pub ui: UiState,
    pub settings: UiSettings,

    pub cmd_tx: mpsc::Sender<EngineCommand>,
    resp_rx: mpsc::Receiver<EngineResponse>,
}

impl FounderApp {
    pub fn new() -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (resp_tx, resp_rx) = mpsc::channel();

        // Write the effective narrator settings back so the file exists
        // and can be edited even on a first run.
        let config = NarratorConfig::load();
        config.save();

        std::thread::spawn(move || {
            let narrator = ChatClient::new(config);
            let mut engine = Engine::new(cmd_rx, resp_tx, Box::new(narrator));
            engine.run();
        });

        Self {
            ui: UiState::default(),
            settings: settings_io::load_settings(),
            cmd_tx,
            resp_rx,
        }
    }
}

impl Default for FounderApp {
    fn default() -> Self {
        Self::new()
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for FounderApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        while let Ok(resp) = self.resp_rx.try_recv() {
            match resp {
                EngineResponse::SessionUpdated(snapshot) => {
                    self.ui.snapshot = snapshot;
                    self.ui.busy = false;
                }
                EngineResponse::IntentRejected { reason } => {
                    self.ui.busy = false;
                    self.ui.notice = Some(reason);
                }
            }
        }

        // The engine answers on its own thread; keep polling while a
        // narrator call is outstanding.
        if self.ui.busy {
            ctx.request_repaint_after(Duration::from_millis(120));
        }

        match self.ui.snapshot.status {
            GameStatus::Start => creation::draw_start(ctx, &mut self.ui, &self.cmd_tx),
            GameStatus::CharacterCreate => {
                creation::draw_character_create(ctx, &mut self.ui, &self.cmd_tx)
            }
            GameStatus::IdeaPhase => creation::draw_idea_phase(ctx, &mut self.ui, &self.cmd_tx),
            GameStatus::Playing => {
                play::draw_playing(ctx, &mut self.ui, &self.settings, &self.cmd_tx)
            }
            GameStatus::GameOver => {
                play::draw_game_over(ctx, &mut self.ui, &self.settings, &self.cmd_tx)
            }
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        settings_io::save_settings(&self.settings);
    }
}
