//! Encounter event log
//!
//! Appended by the state machine as the encounter progresses; read by
//! presentation layers and the rewards collaborator.

use serde::{Deserialize, Serialize};

use crate::core::types::{CombatantId, Turn};
use crate::encounter::machine::CombatOutcome;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub turn: Turn,
    pub kind: CombatEventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEventKind {
    EncounterStarted,
    TurnStarted {
        combatant: CombatantId,
        bonus: bool,
    },
    /// The actor had no usable attack; the turn passes
    TurnSkipped {
        combatant: CombatantId,
    },
    ActionExecuted {
        actor: CombatantId,
        attack: String,
        damage: i32,
    },
    DamageDealt {
        target: CombatantId,
        amount: i32,
    },
    StatusApplied {
        target: CombatantId,
        name: String,
    },
    CombatantDefeated {
        combatant: CombatantId,
    },
    UndoRequested {
        combatant: CombatantId,
    },
    FleeAttempted {
        combatant: CombatantId,
        chance: i32,
    },
    FleeFailed {
        combatant: CombatantId,
    },
    FleeSucceeded {
        combatant: CombatantId,
    },
    EncounterEnded {
        outcome: CombatOutcome,
    },
}
