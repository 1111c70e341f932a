use std::sync::Arc;

use combat_core::{
    Alliance, CharacterId, CharacterStats, CombatEngine, CombatEvent, ComparedValue, Comparison,
    Condition, DamageType, Effect, EffectDescription, EffectType, Intercept, ResourceKind,
    StatModifier, Statistic,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn stats(name: &str) -> CharacterStats {
    CharacterStats::new(name, Alliance::Neutral, ResourceKind::Mana)
}

fn hp(engine: &CombatEngine, id: CharacterId) -> f32 {
    engine.character(id).map(|c| c.health().value()).unwrap()
}

/// Lower health without any hook or defense.
fn wound(engine: &mut CombatEngine, id: CharacterId, amount: f32) {
    engine.receive_damage_or_healing(id, id, amount, DamageType::Physical, false);
}

#[test]
fn timed_effect_repeats_then_expires() {
    init_tracing();
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("priest"));
    let target = engine.spawn(stats("knight"));
    wound(&mut engine, target, 50.0);

    let regen = Effect::timed(
        2.0,
        1,
        Some(Effect::damage_or_heal(-10.0, false)),
        Some(Effect::damage_or_heal(10.0, false)),
    );
    let returned = regen.call(&mut engine, Some(caster), target, DamageType::Nature, 1.0);
    assert_eq!(returned, 1.0);
    assert_eq!(hp(&engine, target), 60.0);
    engine.drain_events();

    engine.advance(1.0);
    assert_eq!(hp(&engine, target), 60.0);

    // End fires (50), then the second cycle starts (60).
    engine.advance(1.0);
    let after: Vec<f32> = engine
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::HealthChanged { after, .. } => Some(after),
            _ => None,
        })
        .collect();
    assert_eq!(after, vec![50.0, 60.0]);
    assert_eq!(engine.character(target).unwrap().buffs().len(), 1);

    engine.advance(2.0);
    assert_eq!(hp(&engine, target), 50.0);
    assert!(engine.character(target).unwrap().buffs().is_empty());
    assert!(
        engine
            .drain_events()
            .contains(&CombatEvent::BuffExpired {
                source: caster,
                target
            })
    );

    engine.advance(10.0);
    assert_eq!(hp(&engine, target), 50.0);
}

#[test]
fn every_call_spawns_an_independent_buff() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("bard"));
    let target = engine.spawn(stats("ally"));

    let song = Effect::timed(
        3.0,
        0,
        Some(Effect::apply_modifier(
            StatModifier::additive(Statistic::AttackDamage, 5.0).stackable(),
            false,
        )),
        Some(Effect::remove_modifier(
            StatModifier::additive(Statistic::AttackDamage, 5.0),
            false,
        )),
    );

    song.call(&mut engine, Some(caster), target, DamageType::Magic, 1.0);
    engine.advance(1.0);
    song.call(&mut engine, Some(caster), target, DamageType::Magic, 1.0);

    let attack = |engine: &CombatEngine| engine.character(target).unwrap().stat(Statistic::AttackDamage);
    assert_eq!(attack(&engine), 20.0);

    engine.advance(2.0);
    assert_eq!(attack(&engine), 15.0);
    engine.advance(1.0);
    assert_eq!(attack(&engine), 10.0);
}

#[test]
fn conditional_multiplier_checks_target_health() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("rogue"));
    let target = engine.spawn(stats("ogre"));

    let execute = Effect::Multiply(2.0).when(Condition::value(
        ComparedValue::TargetPercentHealth,
        Comparison::LessThan,
        0.5,
    ));

    wound(&mut engine, target, 40.0);
    assert_eq!(execute.call(&mut engine, Some(caster), target, DamageType::Physical, 10.0), 10.0);

    wound(&mut engine, target, 20.0);
    assert_eq!(execute.call(&mut engine, Some(caster), target, DamageType::Physical, 10.0), 20.0);
}

#[test]
fn missing_caster_passes_the_value_through() {
    let mut engine = CombatEngine::default();
    let target = engine.spawn(stats("target"));
    let nuke = Effect::sequence(vec![Effect::damage_or_heal(1000.0, false)]);

    assert_eq!(nuke.call(&mut engine, None, target, DamageType::Fire, 7.0), 7.0);
    assert_eq!(nuke.call(&mut engine, Some(CharacterId(99)), target, DamageType::Fire, 7.0), 7.0);
    assert_eq!(hp(&engine, target), 100.0);
}

#[test]
fn sequence_discards_child_results() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("caster"));
    let target = engine.spawn(stats("target"));

    let combo = Effect::sequence(vec![
        Effect::Multiply(10.0),
        Effect::damage_or_heal(5.0, false),
        Effect::modify_secondary(30.0, true),
    ]);
    assert_eq!(combo.call(&mut engine, Some(caster), target, DamageType::Magic, 3.0), 3.0);
    assert_eq!(hp(&engine, target), 95.0);
    assert_eq!(engine.character(caster).unwrap().secondary().value(), 70.0);
}

#[test]
fn damage_type_condition_guards_effects() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("pyromancer"));
    let target = engine.spawn(stats("target"));

    let fire_bonus = Effect::Increase(5.0).when(Condition::damage_type(DamageType::Fire, true));
    assert_eq!(fire_bonus.call(&mut engine, Some(caster), target, DamageType::Fire, 1.0), 6.0);
    assert_eq!(fire_bonus.call(&mut engine, Some(caster), target, DamageType::Frost, 1.0), 1.0);
}

#[test]
fn effect_added_without_hook_runs_once_immediately() {
    let mut engine = CombatEngine::default();
    let id = engine.spawn(stats("monk"));

    let focus = Arc::new(Effect::apply_modifier(
        StatModifier::multiplicative(Statistic::CritChance, 0.5),
        true,
    ));
    engine.add_effect(id, Arc::clone(&focus), Intercept::None);

    let monk = engine.character(id).unwrap();
    assert_eq!(monk.stats().modifiers().len(), 1);
    assert_eq!(monk.intercepts().len(Intercept::None), 0);
    assert!(!engine.remove_effect(id, &focus, Intercept::None));
}

#[test]
fn described_buff_applies_and_expires() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("warlord"));
    let target = engine.spawn(stats("soldier"));

    let war_cry = EffectDescription::new(EffectType::ApplyStatModifier)
        .modifier(StatModifier::additive(Statistic::AttackDamage, 5.0))
        .modifier(StatModifier::multiplicative(Statistic::MovementSpeed, 0.5))
        .duration(3.0);
    let effect = war_cry.get_effect().unwrap();

    effect.call(&mut engine, Some(caster), target, DamageType::Physical, 1.0);
    let soldier = engine.character(target).unwrap();
    assert_eq!(soldier.stat(Statistic::AttackDamage), 15.0);
    assert_eq!(soldier.stat(Statistic::MovementSpeed), 1.5);

    engine.advance(3.0);
    let soldier = engine.character(target).unwrap();
    assert_eq!(soldier.stat(Statistic::AttackDamage), 10.0);
    assert_eq!(soldier.stat(Statistic::MovementSpeed), 1.0);
    assert!(soldier.stats().modifiers().is_empty());
}

#[test]
fn described_damage_over_time_fires_at_the_end() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("assassin"));
    let target = engine.spawn(stats("mark"));

    let poison = EffectDescription::new(EffectType::DamageOrHeal)
        .magnitude(15.0)
        .duration(2.0)
        .repeats(2);
    let effect = poison.get_effect().unwrap();
    effect.call(&mut engine, Some(caster), target, DamageType::Poison, 1.0);
    assert_eq!(hp(&engine, target), 100.0);

    for expected in [85.0, 70.0, 55.0, 55.0] {
        engine.advance(2.0);
        assert_eq!(hp(&engine, target), expected);
    }
}

#[test]
fn repeating_buff_reapplies_a_plain_modifier_every_cycle() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("drummer"));
    let target = engine.spawn(stats("berserker"));

    let frenzy = StatModifier::multiplicative(Statistic::AttackDamage, 0.5);
    let effect = EffectDescription::new(EffectType::ApplyStatModifier)
        .modifier(frenzy)
        .duration(2.0)
        .repeats(2)
        .get_effect()
        .unwrap();
    let attack = |engine: &CombatEngine| engine.character(target).unwrap().stat(Statistic::AttackDamage);
    let active = |engine: &CombatEngine| engine.character(target).unwrap().stats().count(&frenzy);

    effect.call(&mut engine, Some(caster), target, DamageType::Physical, 1.0);
    assert_eq!(attack(&engine), 15.0);

    // Each cycle ends with a removal before the next start re-adds, so the
    // plain modifier is never refused as a duplicate.
    for _ in 0..2 {
        engine.advance(2.0);
        assert_eq!(attack(&engine), 15.0);
        assert_eq!(active(&engine), 1);
    }

    engine.advance(2.0);
    assert_eq!(attack(&engine), 10.0);
    assert_eq!(active(&engine), 0);
    assert!(engine.character(target).unwrap().buffs().is_empty());
}

#[test]
fn repeating_buff_survives_an_external_removal_between_cycles() {
    let mut engine = CombatEngine::default();
    let caster = engine.spawn(stats("drummer"));
    let target = engine.spawn(stats("berserker"));

    let frenzy = StatModifier::multiplicative(Statistic::AttackDamage, 0.5);
    let effect = EffectDescription::new(EffectType::ApplyStatModifier)
        .modifier(frenzy)
        .duration(2.0)
        .repeats(2)
        .get_effect()
        .unwrap();
    let attack = |engine: &CombatEngine| engine.character(target).unwrap().stat(Statistic::AttackDamage);

    effect.call(&mut engine, Some(caster), target, DamageType::Physical, 1.0);
    engine.advance(1.0);
    assert!(engine.remove_modifier(target, &frenzy));
    assert_eq!(attack(&engine), 10.0);

    // The end finds nothing to remove; the restart applies the modifier again.
    engine.advance(1.0);
    assert_eq!(attack(&engine), 15.0);

    engine.advance(2.0);
    assert_eq!(attack(&engine), 15.0);
    engine.advance(2.0);
    assert_eq!(attack(&engine), 10.0);
    assert!(engine.character(target).unwrap().stats().modifiers().is_empty());
}
