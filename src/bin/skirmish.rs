//! Scripted demo skirmish
//!
//! Runs a seeded 2-vs-2 encounter with a trivial "attack the first
//! live monster" player script and prints the event log as JSON.
//!
//!   RUST_LOG=debug cargo run --bin skirmish

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use ashengate::combatant::{
    AiPolicy, Attack, Attributes, CombatantSpec, Cost, StatBlock, StatusEffect, TargetScope,
};
use ashengate::core::CombatConfig;
use ashengate::encounter::{Decision, Encounter, Step};
use ashengate::formula::ExprEvaluator;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting skirmish demo");

    let party = vec![
        CombatantSpec {
            name: "Rook".to_string(),
            stats: StatBlock::new(6, 42, 14, Attributes::new(8, 15, 3, 4)),
            attacks: vec![
                Attack::strike("Cleave", "STR * 2", TargetScope::Single),
                Attack::strike("Whirlwind", "STR + LVL", TargetScope::All)
                    .with_cost(Cost::mana(6)),
            ],
            policy: None,
        },
        CombatantSpec {
            name: "Isolde".to_string(),
            stats: StatBlock::new(5, 30, 24, Attributes::new(3, 11, 9, 5)),
            attacks: vec![
                Attack::strike("Hex Bolt", "intelligence * 2", TargetScope::Single)
                    .with_cost(Cost::mana(4))
                    .with_effect(StatusEffect {
                        name: "Hexed".to_string(),
                        duration: 2,
                        chance: 0.35,
                    }),
            ],
            policy: None,
        },
    ];
    let monsters = vec![
        CombatantSpec {
            name: "Bone Hound".to_string(),
            stats: StatBlock::new(4, 34, 0, Attributes::new(6, 13, 1, 2)),
            attacks: vec![Attack::strike("Bite", "STR + 3", TargetScope::Single)],
            policy: Some(AiPolicy::WeakestTarget),
        },
        CombatantSpec {
            name: "Grave Wisp".to_string(),
            stats: StatBlock::new(3, 22, 10, Attributes::new(2, 9, 6, 1)),
            attacks: vec![Attack::strike("Chill", "INT + LVL", TargetScope::Adjacent)],
            policy: Some(AiPolicy::Random),
        },
    ];

    let mut encounter =
        Encounter::new(party, monsters, ExprEvaluator::new(), CombatConfig::default())
            .expect("valid encounter setup");
    let mut rng = ChaCha8Rng::seed_from_u64(0xA5_4E);

    let outcome = loop {
        match encounter.advance(&mut rng).expect("encounter step") {
            Step::AwaitEffect(request) => {
                tracing::debug!(kind = ?request.kind, "effect playback (instant)");
                encounter.effect_complete();
            }
            Step::AwaitDecision { actor } => {
                let target = encounter
                    .monsters()
                    .first_live()
                    .map(|m| m.id)
                    .expect("a live monster while combat is ongoing");
                tracing::debug!(actor = %actor, target = %target, "scripted attack");
                encounter
                    .submit_decision(Decision::Attack { slot: 0, target })
                    .expect("scripted decision is valid");
            }
            Step::Finished(outcome) => break outcome,
            Step::Continue => {}
        }
    };

    tracing::info!(?outcome, "skirmish finished");
    let log = serde_json::to_string_pretty(encounter.events()).expect("event log serializes");
    println!("{log}");
}
