//! Encounter orchestration integration tests

use ashengate::combatant::{
    AiPolicy, Attack, Attributes, CombatantSpec, StatBlock, TargetScope,
};
use ashengate::core::{CombatConfig, CombatantId};
use ashengate::encounter::{
    CombatEventKind, CombatOutcome, Decision, Encounter, Step,
};
use ashengate::formula::ExprEvaluator;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn encounter(
    party: Vec<CombatantSpec>,
    monsters: Vec<CombatantSpec>,
) -> Encounter<ExprEvaluator> {
    Encounter::new(party, monsters, ExprEvaluator::new(), CombatConfig::default()).unwrap()
}

/// Drive the encounter to termination, answering every party decision
/// window with `decide` and completing every effect instantly.
fn run_scripted(
    enc: &mut Encounter<ExprEvaluator>,
    rng: &mut ChaCha8Rng,
    mut decide: impl FnMut(CombatantId) -> Decision,
) -> CombatOutcome {
    loop {
        match enc.advance(rng).unwrap() {
            Step::AwaitEffect(_) => enc.effect_complete(),
            Step::AwaitDecision { actor } => {
                enc.submit_decision(decide(actor)).unwrap();
            }
            Step::Finished(outcome) => return outcome,
            Step::Continue => unreachable!("advance never yields Continue"),
        }
    }
}

#[test]
fn test_full_round_trip_to_victory() {
    // 1 party member (DEX 20, HP 30, STR 5, formula "STR*2" = 10
    // damage) vs 1 monster (DEX 10, HP 20, fixed 4-damage attack).
    let hero = CombatantSpec {
        name: "Hero".to_string(),
        stats: StatBlock::new(3, 30, 10, Attributes::new(5, 20, 2, 2)),
        attacks: vec![Attack::strike("Cleave", "STR*2", TargetScope::Single)],
        policy: None,
    };
    let ghoul = CombatantSpec {
        name: "Ghoul".to_string(),
        stats: StatBlock::new(2, 20, 0, Attributes::new(3, 10, 1, 1)),
        attacks: vec![Attack::strike("Claw", "4", TargetScope::Single)],
        policy: Some(AiPolicy::WeakestTarget),
    };
    let mut enc = encounter(vec![hero], vec![ghoul]);
    let mut rng = ChaCha8Rng::seed_from_u64(77);

    let hero_id = CombatantId::new(0);
    let ghoul_id = CombatantId::new(1);

    let outcome = run_scripted(&mut enc, &mut rng, |_| Decision::Attack {
        slot: 0,
        target: ghoul_id,
    });
    assert_eq!(outcome, CombatOutcome::Victory);

    // Hero is faster (DEX 20 > 10) and also strictly above the monster
    // side's average, so the round order is: hero base, ghoul base,
    // hero bonus. The bonus hit finishes the 20 HP ghoul.
    let turns: Vec<(CombatantId, bool)> = enc
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            CombatEventKind::TurnStarted { combatant, bonus } => Some((combatant, bonus)),
            _ => None,
        })
        .collect();
    assert_eq!(
        turns,
        vec![(hero_id, false), (ghoul_id, false), (hero_id, true)]
    );

    // One exchange: ghoul dropped to 10, clawed the hero for 4, then
    // died to the bonus strike.
    assert_eq!(enc.party().get(hero_id).unwrap().stats.health, 26);
    assert!(enc.monsters().get(ghoul_id).unwrap().is_dead());
    assert_eq!(enc.defeated(), &[ghoul_id]);

    // The dead ghoul never got another entry dequeued after its
    // defeat, and the encounter closed with a victory event.
    assert!(matches!(
        enc.events().last().unwrap().kind,
        CombatEventKind::EncounterEnded {
            outcome: CombatOutcome::Victory
        }
    ));
}

#[test]
fn test_adjacent_scope_strikes_roster_neighbours() {
    let hero = CombatantSpec {
        name: "Mage".to_string(),
        stats: StatBlock::new(3, 30, 20, Attributes::new(2, 25, 9, 2)),
        attacks: vec![Attack::strike("Wave", "5", TargetScope::Adjacent)],
        policy: None,
    };
    let grunt = |name: &str| CombatantSpec {
        name: name.to_string(),
        stats: StatBlock::new(1, 10, 0, Attributes::new(2, 1, 1, 1)),
        attacks: vec![], // inert: their turns are skipped
        policy: Some(AiPolicy::Random),
    };
    let mut enc = encounter(
        vec![hero],
        vec![grunt("Left"), grunt("Mid"), grunt("Right")],
    );
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    // Open on Mid (splashes Left and Right), then mop up whatever the
    // splash left standing.
    let mut targets = vec![
        CombatantId::new(2),
        CombatantId::new(1),
        CombatantId::new(3),
        CombatantId::new(3),
    ]
    .into_iter();
    let outcome = run_scripted(&mut enc, &mut rng, |_| Decision::Attack {
        slot: 0,
        target: targets.next().expect("ran out of scripted targets"),
    });

    // The first wave hit Mid and both neighbours for 5 each; the rest
    // of the fight just mops up.
    assert_eq!(outcome, CombatOutcome::Victory);
    let first_wave: Vec<i32> = enc
        .events()
        .iter()
        .filter_map(|e| match e.kind {
            CombatEventKind::DamageDealt { amount, .. } => Some(amount),
            _ => None,
        })
        .take(3)
        .collect();
    assert_eq!(first_wave, vec![5, 5, 5]);
}

#[test]
fn test_weakest_target_policy_focuses_the_injured() {
    // All three tie at DEX 5: nobody is strictly above an opposing
    // average, so the round is exactly tank, medic, brute.
    let tank = CombatantSpec {
        name: "Tank".to_string(),
        stats: StatBlock::new(3, 50, 0, Attributes::new(3, 5, 1, 1)),
        attacks: vec![Attack::strike("Poke", "1", TargetScope::Single)],
        policy: None,
    };
    let mut medic = tank.clone();
    medic.name = "Medic".to_string();
    medic.stats.health = 12; // walks in wounded

    let brute = CombatantSpec {
        name: "Brute".to_string(),
        stats: StatBlock::new(4, 90, 0, Attributes::new(6, 5, 1, 1)),
        attacks: vec![Attack::strike("Slam", "6", TargetScope::Single)],
        policy: Some(AiPolicy::WeakestTarget),
    };

    let mut enc = encounter(vec![tank, medic], vec![brute]);
    let mut rng = ChaCha8Rng::seed_from_u64(8);

    // Play one full round: both party members poke, the brute slams.
    let brute_id = CombatantId::new(2);
    let mut windows = 0;
    loop {
        match enc.advance(&mut rng).unwrap() {
            Step::AwaitEffect(_) => enc.effect_complete(),
            Step::AwaitDecision { .. } => {
                windows += 1;
                if windows > 2 {
                    break; // round two has begun
                }
                enc.submit_decision(Decision::Attack {
                    slot: 0,
                    target: brute_id,
                })
                .unwrap();
            }
            step => panic!("unexpected step: {step:?}"),
        }
    }

    // The brute ignored the full-health tank and slammed the medic.
    assert_eq!(enc.party().get(CombatantId::new(0)).unwrap().stats.health, 50);
    assert_eq!(enc.party().get(CombatantId::new(1)).unwrap().stats.health, 6);
}

#[test]
fn test_party_wipe_is_a_defeat() {
    let hero = CombatantSpec {
        name: "Doomed".to_string(),
        stats: StatBlock::new(1, 30, 0, Attributes::new(2, 3, 1, 1)),
        attacks: vec![Attack::strike("Tap", "1", TargetScope::Single)],
        policy: None,
    };
    let ogre = CombatantSpec {
        name: "Ogre".to_string(),
        stats: StatBlock::new(9, 80, 0, Attributes::new(9, 15, 1, 1)),
        attacks: vec![Attack::strike("Crush", "99", TargetScope::Single)],
        policy: Some(AiPolicy::Random),
    };
    let mut enc = encounter(vec![hero], vec![ogre]);
    let mut rng = ChaCha8Rng::seed_from_u64(4);

    // The ogre is faster and one-shots the only party member; no
    // decision window ever opens.
    let outcome = run_scripted(&mut enc, &mut rng, |_| {
        panic!("the party never got a turn")
    });
    assert_eq!(outcome, CombatOutcome::Defeat);
    assert!(enc.party().get(CombatantId::new(0)).unwrap().is_dead());
    assert_eq!(enc.defeated(), &[CombatantId::new(0)]);
}
