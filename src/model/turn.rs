use serde::{Deserialize, Serialize};

use crate::model::stats::StatDelta;

/// One month of play as decoded from the narrator reply: the consequence
/// of the previous action plus the next scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnData {
    pub month: i32,
    pub title: String,
    pub description: String,
    pub stats_change: StatDelta,
    pub outcome_text: String,
    pub choices: Vec<Choice>,
    pub is_game_over: bool,
    pub ending: Option<EndingKind>,
}

/// A preset action offered to the player. Free text is always allowed as
/// well; choices are just the suggested moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub text: String,
    pub kind: Option<ChoiceKind>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    Safe,
    Risky,
    Wild,
}

impl ChoiceKind {
    pub fn parse(name: &str) -> Option<ChoiceKind> {
        match name {
            "safe" => Some(ChoiceKind::Safe),
            "risky" => Some(ChoiceKind::Risky),
            "wild" => Some(ChoiceKind::Wild),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ChoiceKind::Safe => "safe",
            ChoiceKind::Risky => "risky",
            ChoiceKind::Wild => "wild",
        }
    }
}

/// How the run ended. Decided by the narrator, not locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndingKind {
    Bankruptcy,
    Burnout,
    Unicorn,
    Acquisition,
    Mediocrity,
}

impl EndingKind {
    pub fn parse(name: &str) -> Option<EndingKind> {
        match name {
            "bankruptcy" => Some(EndingKind::Bankruptcy),
            "burnout" => Some(EndingKind::Burnout),
            "unicorn" => Some(EndingKind::Unicorn),
            "acquisition" => Some(EndingKind::Acquisition),
            "mediocrity" => Some(EndingKind::Mediocrity),
            _ => None,
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            EndingKind::Bankruptcy => "Chapter 11",
            EndingKind::Burnout => "Burned Out",
            EndingKind::Unicorn => "Unicorn!",
            EndingKind::Acquisition => "Acquired",
            EndingKind::Mediocrity => "Lifestyle Business",
        }
    }
}
