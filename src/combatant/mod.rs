//! Combatant data model
//!
//! A combatant is one participant in one encounter: a party member or a
//! monster instance. Multiple instances of the same monster species get
//! distinct ids. Dead combatants leave the schedule but stay in their
//! roster for post-combat tallies.

pub mod attack;
pub mod roster;
pub mod stats;

use serde::{Deserialize, Serialize};

use crate::core::types::{CombatantId, Side};

pub use attack::{Attack, Cost, CostKind, StatusEffect, TargetScope};
pub use roster::Roster;
pub use stats::{Attributes, StatBlock};

/// Target-choice policy for monster turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiPolicy {
    /// Uniform choice among live opponents
    Random,
    /// Live opponent with the lowest current health (lowest index on ties)
    WeakestTarget,
}

/// Everything needed to spawn a combatant, minus the id the encounter
/// assigns at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombatantSpec {
    pub name: String,
    pub stats: StatBlock,
    pub attacks: Vec<Attack>,
    /// Required for monsters, ignored for party members
    pub policy: Option<AiPolicy>,
}

/// A participant in combat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub stats: StatBlock,
    /// Fixed-size known-action list; empty slots hold [`Attack::none`]
    pub attacks: Vec<Attack>,
    pub policy: Option<AiPolicy>,
}

impl Combatant {
    /// Spawn from a spec, padding/truncating the attack list to `slots`.
    pub fn spawn(id: CombatantId, side: Side, spec: CombatantSpec, slots: usize) -> Self {
        let mut attacks = spec.attacks;
        attacks.truncate(slots);
        attacks.resize_with(slots, Attack::none);
        Self {
            id,
            name: spec.name,
            side,
            stats: spec.stats,
            attacks,
            policy: spec.policy,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.stats.is_dead()
    }

    /// Derived speed stat used for turn ordering
    pub fn speed(&self) -> i32 {
        self.stats.attributes.dexterity
    }

    /// Known attacks that are actually usable (non-empty slots)
    pub fn usable_attacks(&self) -> impl Iterator<Item = (usize, &Attack)> {
        self.attacks
            .iter()
            .enumerate()
            .filter(|(_, a)| !a.is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec_with_attacks(n: usize) -> CombatantSpec {
        CombatantSpec {
            name: "Test".to_string(),
            stats: StatBlock::new(1, 10, 5, Attributes::new(1, 1, 1, 1)),
            attacks: (0..n)
                .map(|i| Attack::strike(format!("Hit {i}"), "1", TargetScope::Single))
                .collect(),
            policy: None,
        }
    }

    #[test]
    fn test_spawn_pads_attack_slots() {
        let c = Combatant::spawn(CombatantId::new(0), Side::Party, spec_with_attacks(1), 4);
        assert_eq!(c.attacks.len(), 4);
        assert_eq!(c.usable_attacks().count(), 1);
        assert!(c.attacks[3].is_none());
    }

    #[test]
    fn test_spawn_truncates_overlong_attack_lists() {
        let c = Combatant::spawn(CombatantId::new(0), Side::Party, spec_with_attacks(6), 4);
        assert_eq!(c.attacks.len(), 4);
        assert_eq!(c.usable_attacks().count(), 4);
    }
}
