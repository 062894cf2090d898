use serde::{Deserialize, Serialize};

use crate::model::catalog::{FounderArchetype, FounderProfile, Trait};
use crate::model::stats::{FounderStatKey, FounderStats, GameStats};
use crate::model::turn::TurnData;

pub const POINT_BUDGET: i32 = 10;
pub const FOUNDER_STAT_MAX: i32 = 10;
pub const FINAL_MONTH: i32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Start,
    CharacterCreate,
    IdeaPhase,
    Playing,
    GameOver,
}

/// Point allocation during character creation.
/// Invariant: `stats.total() + points_left == POINT_BUDGET` at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    pub stats: FounderStats,
    pub points_left: i32,
}

impl Default for Allocation {
    fn default() -> Self {
        Self {
            stats: FounderStats::default(),
            points_left: POINT_BUDGET,
        }
    }
}

impl Allocation {
    /// Spend one point on `key`. No-op when the budget is exhausted or the
    /// stat is already at its cap.
    pub fn increment(&mut self, key: FounderStatKey) -> bool {
        if self.points_left > 0 && self.stats.get(key) < FOUNDER_STAT_MAX {
            self.stats.set(key, self.stats.get(key) + 1);
            self.points_left -= 1;
            true
        } else {
            false
        }
    }

    /// Refund one point from `key`. No-op at zero.
    pub fn decrement(&mut self, key: FounderStatKey) -> bool {
        if self.stats.get(key) > 0 {
            self.stats.set(key, self.stats.get(key) - 1);
            self.points_left += 1;
            true
        } else {
            false
        }
    }

    pub fn is_spent(&self) -> bool {
        self.points_left == 0
    }
}

/// The one live play-through. Owned and mutated by the engine only; the
/// UI sees it through `SessionSnapshot`.
#[derive(Debug, Clone)]
pub struct Session {
    pub status: GameStatus,
    pub stats: GameStats,
    pub allocation: Allocation,
    pub selected: Option<FounderArchetype>,
    pub profile: Option<FounderProfile>,
    pub idea: String,
    pub history: Vec<String>,
    pub turn: Option<TurnData>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            status: GameStatus::Start,
            stats: GameStats::default(),
            allocation: Allocation::default(),
            selected: None,
            profile: None,
            idea: String::new(),
            history: Vec::new(),
            turn: None,
        }
    }
}

impl Session {
    /// Full reset into character creation. Used for "new game" from both
    /// the start screen and the game over screen.
    pub fn reset_for_creation(&mut self) {
        *self = Session::default();
        self.status = GameStatus::CharacterCreate;
    }

    /// True once a persona is picked and every point is spent.
    pub fn creation_complete(&self) -> bool {
        self.selected.is_some() && self.allocation.is_spent()
    }

    /// Freeze the rolled traits together with the allocated stats into the
    /// run's founder profile and move on to the idea screen.
    pub fn materialize_profile(&mut self, buff: Trait, debuff: Trait) {
        let archetype = self
            .selected
            .clone()
            .expect("materialize_profile requires a selected archetype");
        self.profile = Some(FounderProfile {
            archetype,
            stats: self.allocation.stats,
            buff,
            debuff,
        });
        self.status = GameStatus::IdeaPhase;
    }

    /// Start the run proper: fold the trait effects into the seed stats,
    /// record the opening scenario, enter the turn loop.
    pub fn begin_run(&mut self, idea: String, first_turn: TurnData) {
        let (buff_effect, debuff_effect) = {
            let profile = self.profile.as_ref().expect("begin_run requires a profile");
            (profile.buff.effect.clone(), profile.debuff.effect.clone())
        };
        self.stats.apply(&buff_effect);
        self.stats.apply(&debuff_effect);
        self.idea = idea;
        self.history.push(format!("Month 1: {}", first_turn.description));
        self.turn = Some(first_turn);
        self.status = GameStatus::Playing;
    }

    /// Fold one resolved turn into the session: apply the stat delta,
    /// append the action (tagged with the month it was taken in) and the
    /// outcome to the history, swap in the new turn, then check for the
    /// end of the run. Termination is decided by the narrator's flag or
    /// by running past the final month, never by stat thresholds here.
    pub fn record_turn(&mut self, action_text: &str, next: TurnData) {
        let acted_month = self.turn.as_ref().map(|t| t.month).unwrap_or(1);

        self.stats.apply(&next.stats_change);
        self.history
            .push(format!("Month {} action: {}", acted_month, action_text));
        self.history.push(format!("Outcome: {}", next.outcome_text));

        let terminal = next.is_game_over || next.month > FINAL_MONTH;
        self.turn = Some(next);
        if terminal {
            self.status = GameStatus::GameOver;
        }
    }
}

/// Read-only view for the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub status: GameStatus,
    pub stats: GameStats,
    pub allocation: Allocation,
    pub selected_id: Option<String>,
    pub profile: Option<FounderProfile>,
    pub idea: String,
    pub history: Vec<String>,
    pub turn: Option<TurnData>,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        SessionSnapshot {
            status: session.status,
            stats: session.stats,
            allocation: session.allocation,
            selected_id: session.selected.as_ref().map(|a| a.id.clone()),
            profile: session.profile.clone(),
            idea: session.idea.clone(),
            history: session.history.clone(),
            turn: session.turn.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::stats::StatDelta;
    use crate::model::stats::StatKey;

    fn turn(month: i32) -> TurnData {
        TurnData {
            month,
            title: "t".into(),
            description: "d".into(),
            stats_change: StatDelta::new(),
            outcome_text: "o".into(),
            choices: Vec::new(),
            is_game_over: false,
            ending: None,
        }
    }

    #[test]
    fn allocation_budget_holds_under_any_click_sequence() {
        let mut alloc = Allocation::default();
        let keys = FounderStatKey::ALL;

        // A deliberately abusive sequence: over-spend, over-refund,
        // hammer a single stat past its cap.
        for i in 0..200 {
            let key = keys[i % keys.len()];
            if i % 3 == 0 {
                alloc.decrement(key);
            } else {
                alloc.increment(key);
            }
            assert_eq!(alloc.stats.total() + alloc.points_left, POINT_BUDGET);
            for k in keys {
                let v = alloc.stats.get(k);
                assert!((0..=FOUNDER_STAT_MAX).contains(&v));
            }
        }

        for _ in 0..30 {
            alloc.increment(FounderStatKey::Tech);
        }
        assert!(alloc.stats.tech <= FOUNDER_STAT_MAX);
        assert_eq!(alloc.stats.total() + alloc.points_left, POINT_BUDGET);
    }

    #[test]
    fn record_turn_appends_two_history_lines_and_applies_delta() {
        let mut session = Session::default();
        session.reset_for_creation();
        session.selected = Some(crate::model::catalog::all_archetypes()[0].clone());
        session.materialize_profile(
            crate::model::catalog::random_buff(),
            crate::model::catalog::random_debuff(),
        );
        session.begin_run("an app".into(), turn(1));
        assert_eq!(session.history.len(), 1);

        let mut next = turn(2);
        next.stats_change = StatDelta::of(&[(StatKey::Traction, 30)]);
        let before = session.stats.traction;
        session.record_turn("ship it", next);

        assert_eq!(session.history.len(), 3);
        assert!(session.history[1].starts_with("Month 1 action:"));
        assert!(session.history[2].starts_with("Outcome:"));
        assert_eq!(session.stats.traction, (before + 30).clamp(0, 100));
        assert_eq!(session.status, GameStatus::Playing);
    }

    #[test]
    fn run_ends_on_flag_or_month_overflow_only() {
        let mut session = Session::default();
        session.reset_for_creation();
        session.selected = Some(crate::model::catalog::all_archetypes()[0].clone());
        session.materialize_profile(
            crate::model::catalog::random_buff(),
            crate::model::catalog::random_debuff(),
        );
        session.begin_run("an app".into(), turn(1));

        // Deep debt alone does not end the run.
        let mut broke = turn(2);
        broke.stats_change = StatDelta::of(&[(StatKey::Cash, -10_000)]);
        session.record_turn("gamble", broke);
        assert!(session.stats.cash < 0);
        assert_eq!(session.status, GameStatus::Playing);

        let mut over = turn(13);
        over.is_game_over = false;
        session.record_turn("coast", over);
        assert_eq!(session.status, GameStatus::GameOver);
    }
}
