//! End-of-combat evaluation

use serde::{Deserialize, Serialize};

use crate::combatant::Roster;

/// Result of the end check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndState {
    Ongoing,
    Victory,
    Defeat,
}

/// Pure predicate over the two rosters. Liveness is always checked
/// against the roster, never the queue.
///
/// Defeat is checked first: if both sides are somehow wiped
/// simultaneously, the party's own wipe is fatal regardless.
pub fn evaluate(party: &Roster, monsters: &Roster) -> EndState {
    if party.all_dead() {
        EndState::Defeat
    } else if monsters.all_dead() {
        EndState::Victory
    } else {
        EndState::Ongoing
    }
}
