//! Encounter configuration with documented constants
//!
//! The tunables here are game-balance contracts, not implementation
//! details; changing them changes how fights feel.

/// Configuration for one combat encounter
#[derive(Debug, Clone)]
pub struct CombatConfig {
    /// A flee attempt succeeds iff the flee roll exceeds this value
    /// (strictly greater, never equal).
    ///
    /// The roll is `randomInRange(actor.level, flee_roll_max) -
    /// first_monster.level`, so a level-50 character facing a level-0
    /// monster can reach the threshold while a level-1 character facing
    /// a level-60 monster never can.
    pub flee_threshold: i32,

    /// Exclusive upper bound of the flee roll.
    pub flee_roll_max: i32,

    /// Number of known-action slots per combatant. Shorter attack lists
    /// are padded with the empty-slot sentinel, longer lists truncated.
    pub action_slots: usize,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            flee_threshold: 50,
            flee_roll_max: 100,
            action_slots: 4,
        }
    }
}
