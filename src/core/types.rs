//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Unique identifier for a combatant within one encounter.
///
/// Assigned monotonically at encounter construction (party first, then
/// monsters) and never reused for the lifetime of the encounter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CombatantId(pub u32);

impl CombatantId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CombatantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which side of the encounter a combatant fights for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Party,
    Monster,
}

impl Side {
    /// The side this side fights against
    pub fn opposing(self) -> Self {
        match self {
            Side::Party => Side::Monster,
            Side::Monster => Side::Party,
        }
    }
}

/// Turn counter (one dequeue from the turn queue = one turn)
pub type Turn = u32;
