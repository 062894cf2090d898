use std::sync::mpsc::{Receiver, Sender};

use log::{info, warn};

use crate::engine::llm_client::Narrator;
use crate::engine::prompt_builder::RequestBuilder;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::turn_decode::{decode_turn, fallback_turn};
use crate::model::catalog;
use crate::model::session::{GameStatus, Session, SessionSnapshot};
use crate::model::stats::FounderStatKey;
use crate::model::turn::TurnData;

/// Owns the one live session and is its only mutator. Runs on its own
/// thread, draining commands one at a time; because the narrator call is
/// synchronous inside `handle`, at most one request is ever in flight.
pub struct Engine {
    rx: Receiver<EngineCommand>,
    tx: Sender<EngineResponse>,
    narrator: Box<dyn Narrator>,
    session: Session,
}

impl Engine {
    pub fn new(
        rx: Receiver<EngineCommand>,
        tx: Sender<EngineResponse>,
        narrator: Box<dyn Narrator>,
    ) -> Self {
        Self {
            rx,
            tx,
            narrator,
            session: Session::default(),
        }
    }

    /// Drain commands until the presentation side hangs up.
    pub fn run(&mut self) {
        while let Ok(cmd) = self.rx.recv() {
            self.handle(cmd);
        }
    }

    fn handle(&mut self, cmd: EngineCommand) {
        let outcome = match cmd {
            EngineCommand::NewGame => self.new_game(),
            EngineCommand::SelectArchetype(id) => self.select_archetype(&id),
            EngineCommand::AdjustStat { stat, delta } => self.adjust_stat(stat, delta),
            EngineCommand::ConfirmProfile => self.confirm_profile(),
            EngineCommand::SubmitIdea(text) => self.submit_idea(text),
            EngineCommand::SubmitAction(text) => self.submit_action(&text),
        };

        let response = match outcome {
            Ok(()) => EngineResponse::SessionUpdated(SessionSnapshot::from(&self.session)),
            Err(reason) => {
                warn!("intent rejected: {}", reason);
                EngineResponse::IntentRejected { reason }
            }
        };
        let _ = self.tx.send(response);
    }

    fn new_game(&mut self) -> Result<(), String> {
        match self.session.status {
            GameStatus::Start | GameStatus::GameOver => {
                self.session.reset_for_creation();
                Ok(())
            }
            _ => Err("a run is already in progress".into()),
        }
    }

    fn select_archetype(&mut self, id: &str) -> Result<(), String> {
        if self.session.status != GameStatus::CharacterCreate {
            return Err("persona can only be picked during character creation".into());
        }
        let archetype = catalog::all_archetypes()
            .into_iter()
            .find(|a| a.id == id)
            .ok_or_else(|| format!("unknown persona '{}'", id))?;
        self.session.selected = Some(archetype);
        Ok(())
    }

    fn adjust_stat(&mut self, stat: FounderStatKey, delta: i32) -> Result<(), String> {
        if self.session.status != GameStatus::CharacterCreate {
            return Err("points can only be moved during character creation".into());
        }
        let applied = if delta > 0 {
            self.session.allocation.increment(stat)
        } else {
            self.session.allocation.decrement(stat)
        };
        if applied {
            Ok(())
        } else {
            Err(format!("cannot move a point on {}", stat.label()))
        }
    }

    fn confirm_profile(&mut self) -> Result<(), String> {
        if self.session.status != GameStatus::CharacterCreate {
            return Err("nothing to confirm outside character creation".into());
        }
        if !self.session.creation_complete() {
            return Err("pick a persona and spend every point first".into());
        }
        // The traits are rolled exactly once here and frozen for the run.
        self.session
            .materialize_profile(catalog::random_buff(), catalog::random_debuff());
        Ok(())
    }

    fn submit_idea(&mut self, idea: String) -> Result<(), String> {
        if self.session.status != GameStatus::IdeaPhase {
            return Err("ideas are pitched on the idea screen".into());
        }
        if idea.trim().is_empty() {
            return Err("the idea text is empty".into());
        }
        let profile = self
            .session
            .profile
            .clone()
            .ok_or_else(|| "no founder profile".to_string())?;

        let prompt = RequestBuilder::start_request(&profile, &idea);
        let first_turn = self.resolve_turn(&prompt, 1);
        self.session.begin_run(idea, first_turn);
        Ok(())
    }

    fn submit_action(&mut self, action: &str) -> Result<(), String> {
        if self.session.status != GameStatus::Playing {
            return Err("actions are only valid mid-run".into());
        }
        if action.trim().is_empty() {
            return Err("the action text is empty".into());
        }
        let profile = self
            .session
            .profile
            .clone()
            .ok_or_else(|| "no founder profile".to_string())?;
        let month = self
            .session
            .turn
            .as_ref()
            .map(|t| t.month)
            .ok_or_else(|| "no current turn".to_string())?;

        // Pre-delta stats and the month the action was taken in; the
        // reply then moves both forward.
        let history = self.session.history.join("\n");
        let prompt = RequestBuilder::turn_request(
            &profile,
            &self.session.idea,
            &self.session.stats,
            &history,
            action,
            month,
        );
        let next = self.resolve_turn(&prompt, month + 1);
        self.session.record_turn(action, next);

        if self.session.status == GameStatus::GameOver {
            info!(
                "run over at month {:?}, ending {:?}",
                self.session.turn.as_ref().map(|t| t.month),
                self.session.turn.as_ref().and_then(|t| t.ending)
            );
        }
        Ok(())
    }

    /// One narrator round trip. Transport failures and unparseable
    /// replies both degrade to the fallback turn; the session always
    /// moves forward.
    fn resolve_turn(&self, prompt: &str, fallback_month: i32) -> TurnData {
        match self.narrator.generate(prompt) {
            Ok(raw) => decode_turn(&raw).unwrap_or_else(|err| {
                warn!("discarding narrator reply: {:#}", err);
                fallback_turn(fallback_month)
            }),
            Err(err) => {
                warn!("narrator call failed: {:#}", err);
                fallback_turn(fallback_month)
            }
        }
    }
}
