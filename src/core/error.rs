use thiserror::Error;

use crate::core::types::CombatantId;
use crate::formula::FormulaError;

/// Fatal engine errors: configuration problems and internal invariant
/// violations. None of these are reachable from valid player input.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("cannot build a turn order with zero combatants")]
    EmptyRoster,

    #[error("combatant not found: {0}")]
    CombatantNotFound(CombatantId),

    #[error("damage formula failed: {0}")]
    Formula(#[from] FormulaError),

    #[error("attack slot {0} out of range during execution")]
    SlotOutOfRange(usize),

    #[error("turn queue exhausted while the encounter is still ongoing")]
    QueueExhausted,

    #[error("no live target available for {0}")]
    NoLiveTarget(CombatantId),

    #[error("monster '{0}' has no AI policy")]
    MissingAiPolicy(String),

    #[error("state machine invariant violated: {0}")]
    InvariantViolated(&'static str),

    #[error("decision channel closed while awaiting player input")]
    DecisionChannelClosed,
}

/// Recoverable rejection of a player decision. The state machine stays
/// suspended in the same awaiting state; no combat state is mutated.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionError {
    #[error("no decision is being awaited")]
    NotAwaitingDecision,

    #[error("attack slot {0} is out of range")]
    SlotOutOfRange(usize),

    #[error("attack slot {0} is empty")]
    EmptySlot(usize),

    #[error("target {0} is dead or not a valid target")]
    InvalidTarget(CombatantId),
}

pub type Result<T> = std::result::Result<T, EngineError>;
