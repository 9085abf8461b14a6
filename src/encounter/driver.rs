//! Async driver for the poll-based state machine
//!
//! The UI collaborator delivers decisions over a tokio mpsc channel;
//! the driver polls the machine and awaits the channel at the decision
//! suspension point. The effect gate carries no data dependency, so
//! the driver treats it as a zero-duration wait; a presentation layer
//! wanting real playback drives [`Encounter::step`] itself instead.

use rand::Rng;
use tokio::sync::mpsc;

use crate::core::error::{EngineError, Result};
use crate::encounter::machine::{CombatOutcome, Decision, Encounter, Step};
use crate::formula::FormulaEvaluator;

/// Run an encounter to termination, pulling decisions from `decisions`.
///
/// Every decision buffered in the channel when the machine suspends is
/// drained and submitted; the machine keeps the last valid one
/// (last-delivered wins). Invalid decisions are logged and dropped,
/// leaving the machine suspended for a corrected one.
pub async fn run<E: FormulaEvaluator>(
    encounter: &mut Encounter<E>,
    decisions: &mut mpsc::Receiver<Decision>,
    rng: &mut impl Rng,
) -> Result<CombatOutcome> {
    loop {
        match encounter.advance(rng)? {
            Step::Finished(outcome) => return Ok(outcome),
            Step::AwaitEffect(_) => encounter.effect_complete(),
            Step::AwaitDecision { actor } => {
                let first = decisions
                    .recv()
                    .await
                    .ok_or(EngineError::DecisionChannelClosed)?;
                submit(encounter, first);
                while let Ok(later) = decisions.try_recv() {
                    submit(encounter, later);
                }
                tracing::trace!(actor = %actor, "decision window closed");
            }
            Step::Continue => {}
        }
    }
}

fn submit<E: FormulaEvaluator>(encounter: &mut Encounter<E>, decision: Decision) {
    if let Err(rejection) = encounter.submit_decision(decision) {
        tracing::warn!(?decision, %rejection, "decision rejected");
    }
}
