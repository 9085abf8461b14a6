//! Monster turn decisions

use rand::seq::SliceRandom;
use rand::Rng;

use crate::combatant::{AiPolicy, Combatant, Roster};
use crate::core::types::CombatantId;

/// Choose a target from the opposing roster per the monster's policy.
/// Returns `None` only when no live opponent exists (the end check
/// fires before that can be observed in a well-formed encounter).
pub fn select_target(
    policy: AiPolicy,
    opponents: &Roster,
    rng: &mut impl Rng,
) -> Option<CombatantId> {
    match policy {
        AiPolicy::Random => {
            let live: Vec<CombatantId> = opponents.live_members().map(|c| c.id).collect();
            live.choose(rng).copied()
        }
        AiPolicy::WeakestTarget => {
            // min_by_key on an iterator keeps the first minimum, which
            // is the lowest-index tie break.
            opponents
                .live_members()
                .min_by_key(|c| c.stats.health)
                .map(|c| c.id)
        }
    }
}

/// Uniform choice among the monster's non-empty attack slots
pub fn select_attack(monster: &Combatant, rng: &mut impl Rng) -> Option<usize> {
    let usable: Vec<usize> = monster.usable_attacks().map(|(i, _)| i).collect();
    usable.choose(rng).copied()
}
