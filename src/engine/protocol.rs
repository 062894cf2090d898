use crate::model::session::SessionSnapshot;
use crate::model::stats::FounderStatKey;

/// Player intents, as emitted by the presentation layer. The engine is
/// the only mutator of the session; a command arriving in the wrong
/// status is answered with `IntentRejected` and changes nothing.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    NewGame,
    SelectArchetype(String),
    AdjustStat { stat: FounderStatKey, delta: i32 },
    ConfirmProfile,
    SubmitIdea(String),
    SubmitAction(String),
}

#[derive(Debug, Clone)]
pub enum EngineResponse {
    /// Sent after every accepted command.
    SessionUpdated(SessionSnapshot),

    /// The command was a no-op; the session is unchanged.
    IntentRejected { reason: String },
}
