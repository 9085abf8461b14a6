//! Side rosters
//!
//! A roster is the ordered member list for one side. Members are never
//! removed, even after death, so post-combat tallies can still read
//! them; liveness checks always go through the roster, never the queue.

use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::core::types::CombatantId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    members: Vec<Combatant>,
}

impl Roster {
    pub fn new(members: Vec<Combatant>) -> Self {
        Self { members }
    }

    pub fn members(&self) -> &[Combatant] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, id: CombatantId) -> Option<&Combatant> {
        self.members.iter().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CombatantId) -> Option<&mut Combatant> {
        self.members.iter_mut().find(|c| c.id == id)
    }

    /// Position of a member in this side's ordering (adjacency basis)
    pub fn index_of(&self, id: CombatantId) -> Option<usize> {
        self.members.iter().position(|c| c.id == id)
    }

    pub fn live_members(&self) -> impl Iterator<Item = &Combatant> {
        self.members.iter().filter(|c| !c.is_dead())
    }

    /// First live member in roster order
    pub fn first_live(&self) -> Option<&Combatant> {
        self.live_members().next()
    }

    /// True iff no live member remains
    pub fn all_dead(&self) -> bool {
        self.members.iter().all(|c| c.is_dead())
    }
}
