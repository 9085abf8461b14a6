//! Target-set expansion

use crate::combatant::{Roster, TargetScope};
use crate::core::types::CombatantId;

/// Expand a chosen primary target into the full target set.
///
/// Adjacency is based on the defender side's roster ordering: the
/// primary plus the members at index ±1 where they exist. Dead
/// combatants are never valid targets and are filtered out of every
/// scope.
pub fn resolve_targets(
    scope: TargetScope,
    primary: CombatantId,
    defenders: &Roster,
) -> Vec<CombatantId> {
    match scope {
        TargetScope::Single => defenders
            .get(primary)
            .filter(|c| !c.is_dead())
            .map(|c| vec![c.id])
            .unwrap_or_default(),
        TargetScope::Adjacent => {
            let Some(index) = defenders.index_of(primary) else {
                return Vec::new();
            };
            let members = defenders.members();
            let mut targets = Vec::with_capacity(3);
            if index > 0 {
                targets.push(&members[index - 1]);
            }
            targets.push(&members[index]);
            if index + 1 < members.len() {
                targets.push(&members[index + 1]);
            }
            // Keep primary-first ordering: the chosen target takes the
            // hit before its neighbours.
            let mut ids: Vec<CombatantId> = Vec::with_capacity(3);
            ids.push(primary);
            ids.extend(
                targets
                    .iter()
                    .filter(|c| c.id != primary && !c.is_dead())
                    .map(|c| c.id),
            );
            if defenders.get(primary).map_or(true, |c| c.is_dead()) {
                ids.retain(|&id| id != primary);
            }
            ids
        }
        TargetScope::All => defenders.live_members().map(|c| c.id).collect(),
    }
}
