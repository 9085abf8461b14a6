//! Ashengate - turn-based combat encounter engine
//!
//! In-process library consumed by a presentation layer: given two rosters
//! (party and monsters), it schedules speed-weighted turns, suspends for
//! player decisions and effect playback, resolves attacks and flee
//! attempts, and reports the encounter outcome.

pub mod combatant;
pub mod core;
pub mod encounter;
pub mod formula;
pub mod queue;
pub mod resolver;
