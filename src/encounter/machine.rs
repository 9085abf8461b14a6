//! Combat orchestration state machine
//!
//! Owns the root aggregate of one encounter (rosters, queue, phase,
//! event log) and drives it from setup to termination. Suspension
//! points are encoded as phases: the machine is polled with [`step`]
//! and reports when it needs a player decision or effect-playback
//! completion before it can make further progress.
//!
//! [`step`]: Encounter::step

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combatant::{AiPolicy, Combatant, CombatantSpec, Roster};
use crate::core::config::CombatConfig;
use crate::core::error::{DecisionError, EngineError, Result};
use crate::core::types::{CombatantId, Side, Turn};
use crate::encounter::end::{self, EndState};
use crate::encounter::events::{CombatEvent, CombatEventKind};
use crate::formula::FormulaEvaluator;
use crate::queue::{QueueEntry, TurnQueue};
use crate::resolver;

/// Terminal result of an encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatOutcome {
    Victory,
    Defeat,
    Fled,
}

/// A player decision for the active party member
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Attack { slot: usize, target: CombatantId },
    Flee,
    Undo,
}

/// What the effect collaborator is asked to play. The machine never
/// inspects the completion signal; [`Encounter::effect_complete`] is
/// the whole contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectRequest {
    pub kind: EffectKind,
    pub participants: Vec<CombatantId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Encounter intro playback before the first turn
    Intro,
    /// Attack impact on the struck targets
    AttackImpact,
}

/// Encounter phase. Suspension points are phases of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Setup,
    DetermineActor,
    AwaitingDecision,
    AwaitingEffect,
    Cleanup,
    EndCheck,
    Finished,
}

/// Result of one [`Encounter::step`] poll
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Progress was made; poll again
    Continue,
    /// Suspended until a decision for `actor` is submitted
    AwaitDecision { actor: CombatantId },
    /// Suspended until the effect collaborator signals completion
    AwaitEffect(EffectRequest),
    /// The encounter is over
    Finished(CombatOutcome),
}

/// Rewards/tally collaborator: receives defeated monster ids at
/// cleanup time and the full tally at victory.
pub trait RewardSink {
    fn on_defeated(&mut self, _ids: &[CombatantId]) {}
    fn on_victory(&mut self, _defeated: &[CombatantId]) {}
}

/// No-op sink for consumers that read the tally directly
pub struct NullRewardSink;

impl RewardSink for NullRewardSink {}

struct Gate {
    request: EffectRequest,
    resume: Phase,
}

/// One combat encounter from setup to termination.
///
/// Single-writer: rosters and queue are mutated only through this
/// struct's methods, which is what makes removal-during-iteration in
/// the queue safe without locks.
pub struct Encounter<E: FormulaEvaluator> {
    config: CombatConfig,
    party: Roster,
    monsters: Roster,
    queue: TurnQueue,
    phase: Phase,
    turn: Turn,
    active: Option<QueueEntry>,
    /// Last decision submitted while awaiting; later submissions
    /// overwrite earlier ones until the machine consumes it
    pending_decision: Option<Decision>,
    gate: Option<Gate>,
    outcome: Option<CombatOutcome>,
    defeated: Vec<CombatantId>,
    events: Vec<CombatEvent>,
    evaluator: E,
    rewards: Box<dyn RewardSink>,
}

impl<E: FormulaEvaluator> Encounter<E> {
    /// Create an encounter. Ids are assigned monotonically, party
    /// members first, then monsters, in the given order.
    pub fn new(
        party: Vec<CombatantSpec>,
        monsters: Vec<CombatantSpec>,
        evaluator: E,
        config: CombatConfig,
    ) -> Result<Self> {
        let mut next_id = 0u32;
        let mut spawn = |specs: Vec<CombatantSpec>, side: Side| -> Roster {
            let members = specs
                .into_iter()
                .map(|spec| {
                    let id = CombatantId::new(next_id);
                    next_id += 1;
                    Combatant::spawn(id, side, spec, config.action_slots)
                })
                .collect();
            Roster::new(members)
        };
        let party = spawn(party, Side::Party);
        let monsters = spawn(monsters, Side::Monster);

        for m in monsters.members() {
            if m.policy.is_none() {
                return Err(EngineError::MissingAiPolicy(m.name.clone()));
            }
        }

        let queue = TurnQueue::build(&party, &monsters)?;

        tracing::info!(
            party = party.len(),
            monsters = monsters.len(),
            "encounter created"
        );

        Ok(Self {
            config,
            party,
            monsters,
            queue,
            phase: Phase::Setup,
            turn: 0,
            active: None,
            pending_decision: None,
            gate: None,
            outcome: None,
            defeated: Vec::new(),
            events: Vec::new(),
            evaluator,
            rewards: Box::new(NullRewardSink),
        })
    }

    pub fn set_reward_sink(&mut self, sink: Box<dyn RewardSink>) {
        self.rewards = sink;
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> Option<CombatOutcome> {
        self.outcome
    }

    pub fn party(&self) -> &Roster {
        &self.party
    }

    pub fn monsters(&self) -> &Roster {
        &self.monsters
    }

    pub fn queue(&self) -> &TurnQueue {
        &self.queue
    }

    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Ids moved into the defeated tally so far (both sides)
    pub fn defeated(&self) -> &[CombatantId] {
        &self.defeated
    }

    /// Party member shown as "up first" in the UI before the first
    /// turn. Display only, not a scheduling input.
    pub fn first_party_member(&self) -> Option<CombatantId> {
        self.queue.first_party_base()
    }

    /// Advance the machine by one transition.
    pub fn step(&mut self, rng: &mut impl Rng) -> Result<Step> {
        match self.phase {
            Phase::Setup => {
                self.log(CombatEventKind::EncounterStarted);
                let participants = self
                    .party
                    .members()
                    .iter()
                    .chain(self.monsters.members())
                    .map(|c| c.id)
                    .collect();
                Ok(self.suspend_on_effect(
                    EffectRequest {
                        kind: EffectKind::Intro,
                        participants,
                    },
                    Phase::DetermineActor,
                ))
            }
            Phase::AwaitingEffect => match &self.gate {
                Some(gate) => Ok(Step::AwaitEffect(gate.request.clone())),
                None => Err(EngineError::InvariantViolated("awaiting an effect with no gate set")),
            },
            Phase::DetermineActor => self.determine_actor(rng),
            Phase::AwaitingDecision => self.consume_decision(rng),
            Phase::Cleanup => {
                self.cleanup();
                Ok(Step::Continue)
            }
            Phase::EndCheck => self.end_check(),
            Phase::Finished => self
                .outcome
                .map(Step::Finished)
                .ok_or(EngineError::InvariantViolated("finished without an outcome")),
        }
    }

    /// Poll [`step`] until the machine suspends or finishes.
    ///
    /// [`step`]: Encounter::step
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<Step> {
        loop {
            match self.step(rng)? {
                Step::Continue => continue,
                suspended => return Ok(suspended),
            }
        }
    }

    /// Submit a decision for the awaited party turn.
    ///
    /// Invalid decisions are rejected here with no state mutation; the
    /// machine stays suspended awaiting a corrected one. A valid
    /// decision overwrites any not-yet-consumed earlier submission
    /// (last one delivered wins).
    pub fn submit_decision(&mut self, decision: Decision) -> std::result::Result<(), DecisionError> {
        if self.phase != Phase::AwaitingDecision {
            return Err(DecisionError::NotAwaitingDecision);
        }
        if let Decision::Attack { slot, target } = decision {
            let actor = self
                .active
                .and_then(|e| self.party.get(e.combatant))
                .ok_or(DecisionError::NotAwaitingDecision)?;
            let attack = actor
                .attacks
                .get(slot)
                .ok_or(DecisionError::SlotOutOfRange(slot))?;
            if attack.is_none() {
                return Err(DecisionError::EmptySlot(slot));
            }
            match self.monsters.get(target) {
                Some(t) if !t.is_dead() => {}
                _ => return Err(DecisionError::InvalidTarget(target)),
            }
        }
        self.pending_decision = Some(decision);
        Ok(())
    }

    /// Signal from the effect collaborator that playback finished.
    /// Ignored when no effect is pending.
    pub fn effect_complete(&mut self) {
        if let Some(gate) = self.gate.take() {
            self.phase = gate.resume;
        }
    }

    fn determine_actor(&mut self, rng: &mut impl Rng) -> Result<Step> {
        let party = &self.party;
        let monsters = &self.monsters;
        let entry = self.queue.next_live(|id| {
            party
                .get(id)
                .or_else(|| monsters.get(id))
                .map_or(true, |c| c.is_dead())
        });
        let Some(entry) = entry else {
            // All entries purged without a terminal state: scheduler
            // invariant broken.
            tracing::error!("turn queue exhausted while encounter is ongoing");
            return Err(EngineError::QueueExhausted);
        };

        self.turn += 1;
        self.active = Some(entry);
        self.log(CombatEventKind::TurnStarted {
            combatant: entry.combatant,
            bonus: entry.bonus,
        });
        tracing::debug!(turn = self.turn, combatant = %entry.combatant, bonus = entry.bonus,
            "turn started");

        match entry.side {
            Side::Party => {
                self.phase = Phase::AwaitingDecision;
                Ok(Step::AwaitDecision {
                    actor: entry.combatant,
                })
            }
            Side::Monster => self.monster_turn(entry.combatant, rng),
        }
    }

    fn monster_turn(&mut self, actor_id: CombatantId, rng: &mut impl Rng) -> Result<Step> {
        let monster = self
            .monsters
            .get(actor_id)
            .ok_or(EngineError::CombatantNotFound(actor_id))?;
        let policy = monster.policy.unwrap_or(AiPolicy::Random);

        let Some(slot) = resolver::select_attack(monster, rng) else {
            self.log(CombatEventKind::TurnSkipped {
                combatant: actor_id,
            });
            self.phase = Phase::Cleanup;
            return Ok(Step::Continue);
        };
        let target = resolver::select_target(policy, &self.party, rng)
            .ok_or(EngineError::NoLiveTarget(actor_id))?;

        let outcome = resolver::execute_attack(
            &mut self.monsters,
            &mut self.party,
            actor_id,
            slot,
            target,
            &self.evaluator,
            rng,
        )?;
        Ok(self.record_action(outcome))
    }

    fn consume_decision(&mut self, rng: &mut impl Rng) -> Result<Step> {
        let entry = self
            .active
            .ok_or(EngineError::InvariantViolated("awaiting a decision with no active actor"))?;
        let actor = entry.combatant;
        match self.pending_decision.take() {
            None => Ok(Step::AwaitDecision { actor }),
            Some(Decision::Undo) => {
                // Re-entrant: any number of undos return to the same
                // awaiting state with the same actor.
                self.log(CombatEventKind::UndoRequested { combatant: actor });
                Ok(Step::AwaitDecision { actor })
            }
            Some(Decision::Flee) => self.attempt_flee(actor, rng),
            Some(Decision::Attack { slot, target }) => {
                let outcome = resolver::execute_attack(
                    &mut self.party,
                    &mut self.monsters,
                    actor,
                    slot,
                    target,
                    &self.evaluator,
                    rng,
                )?;
                Ok(self.record_action(outcome))
            }
        }
    }

    /// Flee resolution: `randomInRange(actor.level, roll_max) -
    /// first_monster.level`, success iff strictly above the threshold.
    /// Success ends the encounter with no rewards; failure ends the
    /// turn normally (no damage, no cost).
    fn attempt_flee(&mut self, actor_id: CombatantId, rng: &mut impl Rng) -> Result<Step> {
        let actor = self
            .party
            .get(actor_id)
            .ok_or(EngineError::CombatantNotFound(actor_id))?;
        let monster_level = self
            .monsters
            .first_live()
            .map(|m| m.stats.level)
            .unwrap_or(0);

        let low = actor.stats.level.min(self.config.flee_roll_max - 1);
        let roll = rng.gen_range(low..self.config.flee_roll_max);
        let chance = roll - monster_level;
        self.log(CombatEventKind::FleeAttempted {
            combatant: actor_id,
            chance,
        });

        if chance > self.config.flee_threshold {
            self.log(CombatEventKind::FleeSucceeded {
                combatant: actor_id,
            });
            self.queue.remove_side(Side::Monster);
            tracing::info!(combatant = %actor_id, chance, "party fled the encounter");
            Ok(self.finish(CombatOutcome::Fled))
        } else {
            self.log(CombatEventKind::FleeFailed {
                combatant: actor_id,
            });
            self.phase = Phase::Cleanup;
            Ok(Step::Continue)
        }
    }

    /// Log an executed action and suspend on its impact effect before
    /// cleanup.
    fn record_action(&mut self, outcome: resolver::ActionOutcome) -> Step {
        self.log(CombatEventKind::ActionExecuted {
            actor: outcome.actor,
            attack: outcome.attack.clone(),
            damage: outcome.damage,
        });
        for strike in &outcome.struck {
            self.log(CombatEventKind::DamageDealt {
                target: strike.target,
                amount: strike.damage,
            });
        }
        for (target, effect) in &outcome.statuses {
            self.log(CombatEventKind::StatusApplied {
                target: *target,
                name: effect.name.clone(),
            });
        }

        let mut participants = vec![outcome.actor];
        participants.extend(outcome.struck.iter().map(|s| s.target));
        self.suspend_on_effect(
            EffectRequest {
                kind: EffectKind::AttackImpact,
                participants,
            },
            Phase::Cleanup,
        )
    }

    /// Scan the defender side for newly-dead combatants, purge them
    /// from the queue and move them into the defeated tally. Idempotent:
    /// an already-tallied id is never re-removed or re-tallied.
    fn cleanup(&mut self) {
        let defender_side = self
            .active
            .map(|e| e.side.opposing())
            .unwrap_or(Side::Monster);
        let defenders = match defender_side {
            Side::Party => &self.party,
            Side::Monster => &self.monsters,
        };

        let newly_dead: Vec<CombatantId> = defenders
            .members()
            .iter()
            .filter(|c| c.is_dead() && !self.defeated.contains(&c.id))
            .map(|c| c.id)
            .collect();

        for &id in &newly_dead {
            self.queue.remove_combatant(id);
            self.defeated.push(id);
            self.log(CombatEventKind::CombatantDefeated { combatant: id });
            tracing::debug!(combatant = %id, "combatant defeated");
        }
        if defender_side == Side::Monster && !newly_dead.is_empty() {
            self.rewards.on_defeated(&newly_dead);
        }

        self.phase = Phase::EndCheck;
    }

    /// Terminal-state check. Runs before any further scheduling
    /// decision: the queue is never asked for a turn after the battle
    /// has ended.
    fn end_check(&mut self) -> Result<Step> {
        match end::evaluate(&self.party, &self.monsters) {
            EndState::Defeat => Ok(self.finish(CombatOutcome::Defeat)),
            EndState::Victory => {
                let monster_tally: Vec<CombatantId> = self
                    .defeated
                    .iter()
                    .copied()
                    .filter(|&id| self.monsters.get(id).is_some())
                    .collect();
                self.rewards.on_victory(&monster_tally);
                Ok(self.finish(CombatOutcome::Victory))
            }
            EndState::Ongoing => {
                self.phase = Phase::DetermineActor;
                Ok(Step::Continue)
            }
        }
    }

    fn finish(&mut self, outcome: CombatOutcome) -> Step {
        self.outcome = Some(outcome);
        self.phase = Phase::Finished;
        self.log(CombatEventKind::EncounterEnded { outcome });
        tracing::info!(?outcome, turns = self.turn, "encounter ended");
        Step::Finished(outcome)
    }

    fn suspend_on_effect(&mut self, request: EffectRequest, resume: Phase) -> Step {
        self.gate = Some(Gate {
            request: request.clone(),
            resume,
        });
        self.phase = Phase::AwaitingEffect;
        Step::AwaitEffect(request)
    }

    fn log(&mut self, kind: CombatEventKind) {
        self.events.push(CombatEvent {
            turn: self.turn,
            kind,
        });
    }
}
