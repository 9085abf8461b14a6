//! Action resolution
//!
//! Turns an (actor, attack, target) triple into stat mutations and a
//! result payload. The resolver never touches the turn queue: death is
//! reported through [`StrikeResult::killed`] and acted on by the
//! orchestrator during cleanup.

pub mod ai;
pub mod targeting;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combatant::{Attack, Roster, StatBlock, StatusEffect};
use crate::core::error::{EngineError, Result};
use crate::core::types::CombatantId;
use crate::formula::FormulaEvaluator;

pub use ai::{select_attack, select_target};
pub use targeting::resolve_targets;

/// Damage applied to one target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrikeResult {
    pub target: CombatantId,
    pub damage: i32,
    /// The strike reduced the target to zero health
    pub killed: bool,
}

/// Result payload of one executed attack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOutcome {
    pub actor: CombatantId,
    pub attack: String,
    pub slot: usize,
    /// Raw formula damage applied to every struck target
    pub damage: i32,
    pub struck: Vec<StrikeResult>,
    /// Status effects that passed their chance roll, one entry per
    /// affected target. Consumed by the external status subsystem.
    pub statuses: Vec<(CombatantId, StatusEffect)>,
}

/// Pay an attack's resource cost, clamping at zero. Affordability is
/// the UI layer's concern; overspending is tolerated here.
pub fn pay_cost(stats: &mut StatBlock, attack: &Attack) {
    stats.spend(attack.cost.kind, attack.cost.amount);
}

/// Evaluate the attack's damage formula against the actor's current
/// stats and truncate toward zero.
///
/// A malformed formula or evaluator failure is a fatal configuration
/// error, never a player-triggerable state.
pub fn compute_damage<E: FormulaEvaluator>(
    stats: &StatBlock,
    attack: &Attack,
    evaluator: &E,
) -> Result<i32> {
    let value = evaluator
        .evaluate(&attack.formula, &stats.bindings())
        .map_err(|e| {
            tracing::error!(attack = %attack.name, formula = %attack.formula, error = %e,
                "damage formula failed");
            e
        })?;
    Ok(value as i32)
}

/// Subtract damage from a target, saturating at zero
pub fn apply_damage(stats: &mut StatBlock, amount: i32) {
    stats.apply_damage(amount);
}

/// Execute a committed attack atomically: pay the cost, evaluate the
/// formula, expand the target set, apply damage, roll attached status
/// effects. Cost payment always precedes damage application; no
/// partial application is observable.
pub fn execute_attack<E: FormulaEvaluator>(
    actors: &mut Roster,
    defenders: &mut Roster,
    actor_id: CombatantId,
    slot: usize,
    primary: CombatantId,
    evaluator: &E,
    rng: &mut impl Rng,
) -> Result<ActionOutcome> {
    let actor = actors
        .get_mut(actor_id)
        .ok_or(EngineError::CombatantNotFound(actor_id))?;
    let attack = actor
        .attacks
        .get(slot)
        .cloned()
        .ok_or(EngineError::SlotOutOfRange(slot))?;

    pay_cost(&mut actor.stats, &attack);
    let damage = compute_damage(&actor.stats, &attack, evaluator)?;

    let targets = resolve_targets(attack.scope, primary, defenders);
    let mut struck = Vec::with_capacity(targets.len());
    let mut statuses = Vec::new();
    for target_id in targets {
        let target = defenders
            .get_mut(target_id)
            .ok_or(EngineError::CombatantNotFound(target_id))?;
        apply_damage(&mut target.stats, damage);
        struck.push(StrikeResult {
            target: target_id,
            damage,
            killed: target.is_dead(),
        });
        if let Some(effect) = &attack.effect {
            if rng.gen::<f32>() < effect.chance {
                statuses.push((target_id, effect.clone()));
            }
        }
    }

    Ok(ActionOutcome {
        actor: actor_id,
        attack: attack.name,
        slot,
        damage,
        struck,
        statuses,
    })
}
