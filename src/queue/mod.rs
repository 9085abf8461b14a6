//! Turn-order scheduling
//!
//! The queue is built once at combat start and replayed cyclically for
//! the whole encounter; wrapping past the end is the next round. Bonus
//! eligibility is fixed at build time and never re-evaluated as stats
//! change mid-fight (intentional balance behavior, not an oversight).
//!
//! Entries are never shifted after the sort: removal flips a
//! logically-deleted flag, so an active cursor survives removals.

use serde::{Deserialize, Serialize};

use crate::combatant::Roster;
use crate::core::error::{EngineError, Result};
use crate::core::types::{CombatantId, Side};

/// One schedulable opportunity to act. References a combatant by id;
/// the queue never owns combatant lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
    pub combatant: CombatantId,
    pub side: Side,
    /// True for a speed-derived extra turn, false for the guaranteed
    /// base turn
    pub bonus: bool,
    /// Dexterity for base entries, dexterity / 2 for bonus entries
    pub priority: i32,
    removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnQueue {
    entries: Vec<QueueEntry>,
    cursor: usize,
}

impl TurnQueue {
    /// Build the encounter schedule from the two rosters.
    ///
    /// Every live combatant gets a base entry at priority = dexterity.
    /// A combatant whose dexterity strictly exceeds the opposing side's
    /// average dexterity (floor of the mean) also gets a bonus entry at
    /// priority = dexterity / 2 (integer division); an empty opposing
    /// side grants none. Entries are stable-sorted descending by
    /// priority, so
    /// equal priorities keep insertion order: party base, monster base,
    /// monster bonuses, party bonuses.
    pub fn build(party: &Roster, monsters: &Roster) -> Result<Self> {
        if party.is_empty() && monsters.is_empty() {
            return Err(EngineError::EmptyRoster);
        }

        let mut entries = Vec::new();
        for c in party.live_members().chain(monsters.live_members()) {
            entries.push(QueueEntry {
                combatant: c.id,
                side: c.side,
                bonus: false,
                priority: c.speed(),
                removed: false,
            });
        }

        // Strictly faster than the opposing side's average earns one
        // extra, weaker-priority action per round. Strict `>`, integer
        // truncation. No bonus turns are earned against an empty side.
        if let Some(avg_party_dex) = average_speed(party) {
            for c in monsters.live_members().filter(|c| c.speed() > avg_party_dex) {
                entries.push(bonus_entry(c.id, c.side, c.speed()));
            }
        }
        if let Some(avg_monster_dex) = average_speed(monsters) {
            for c in party.live_members().filter(|c| c.speed() > avg_monster_dex) {
                entries.push(bonus_entry(c.id, c.side, c.speed()));
            }
        }

        // sort_by is stable: the documented tie-break rule
        entries.sort_by(|a, b| b.priority.cmp(&a.priority));

        tracing::debug!(
            entries = entries.len(),
            bonus = entries.iter().filter(|e| e.bonus).count(),
            "turn queue built"
        );

        Ok(Self { entries, cursor: 0 })
    }

    /// Next live entry at or after the cursor, wrapping at the end.
    ///
    /// Entries referencing dead combatants are skipped transparently,
    /// as are removed entries. Returns `None` only after a full
    /// fruitless lap; callers treat that as a broken scheduler
    /// invariant, not a game state.
    pub fn next_live(&mut self, is_dead: impl Fn(CombatantId) -> bool) -> Option<QueueEntry> {
        for _ in 0..self.entries.len() {
            if self.cursor >= self.entries.len() {
                self.cursor = 0;
            }
            let entry = self.entries[self.cursor];
            self.cursor += 1;
            if !entry.removed && !is_dead(entry.combatant) {
                return Some(entry);
            }
        }
        None
    }

    /// Flag every entry (base and bonus) for the combatant as removed.
    /// Safe to call while a dequeue cursor exists.
    pub fn remove_combatant(&mut self, id: CombatantId) {
        for entry in self.entries.iter_mut().filter(|e| e.combatant == id) {
            entry.removed = true;
        }
    }

    /// Remove every entry belonging to a side (flee resolution)
    pub fn remove_side(&mut self, side: Side) {
        for entry in self.entries.iter_mut().filter(|e| e.side == side) {
            entry.removed = true;
        }
    }

    /// Party member with the earliest base entry. Initial UI display
    /// only, never a scheduling input.
    pub fn first_party_base(&self) -> Option<CombatantId> {
        self.entries
            .iter()
            .find(|e| e.side == Side::Party && !e.bonus && !e.removed)
            .map(|e| e.combatant)
    }

    pub fn entries(&self) -> &[QueueEntry] {
        &self.entries
    }
}

fn bonus_entry(combatant: CombatantId, side: Side, speed: i32) -> QueueEntry {
    QueueEntry {
        combatant,
        side,
        bonus: true,
        priority: speed / 2,
        removed: false,
    }
}

/// Floor of the side's mean dexterity over live members; `None` for an
/// empty or wiped side.
fn average_speed(roster: &Roster) -> Option<i32> {
    let (sum, count) = roster
        .live_members()
        .fold((0i32, 0i32), |(s, n), c| (s + c.speed(), n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count)
    }
}
