//! Encounter orchestration
//!
//! The state machine drives one encounter end to end: setup, the
//! per-turn loop with its two suspension points (player decision,
//! effect playback), cleanup, and the terminal outcome. A poll-based
//! [`Encounter::step`] is the core contract; [`driver`] adapts it to
//! an async decision channel.

pub mod driver;
pub mod end;
pub mod events;
pub mod machine;

pub use end::{evaluate, EndState};
pub use events::{CombatEvent, CombatEventKind};
pub use machine::{
    CombatOutcome, Decision, EffectKind, EffectRequest, Encounter, NullRewardSink, Phase,
    RewardSink, Step,
};
