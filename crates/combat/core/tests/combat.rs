use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use combat_core::{
    Alliance, AttributeName, CharacterId, CharacterStats, CombatEngine, CombatEvent, DamageType,
    Effect, EngineConfig, Intercept, PcgRng, ResourceDisplay, ResourceKind, StatModifier,
    Statistic,
};

fn fighter(name: &str) -> CharacterStats {
    CharacterStats::new(name, Alliance::Friendly, ResourceKind::Energy)
}

fn monster(name: &str) -> CharacterStats {
    CharacterStats::new(name, Alliance::Enemy, ResourceKind::Mana)
}

fn hp(engine: &CombatEngine, id: CharacterId) -> f32 {
    engine.character(id).map(|c| c.health().value()).unwrap()
}

fn approx(actual: f32, expected: f32) {
    assert!((actual - expected).abs() < 1e-3, "expected {expected}, got {actual}");
}

#[test]
fn defense_depends_on_damage_type() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let golem = engine.spawn(
        monster("golem")
            .with(Statistic::MeleeDefense, 1.0)
            .with(Statistic::MagicDefense, 3.0),
    );

    engine.attack_target(hero, golem, 2.0, DamageType::Physical);
    assert_eq!(hp(&engine, golem), 90.0);

    engine.attack_target(hero, golem, 2.0, DamageType::Frost);
    assert_eq!(hp(&engine, golem), 85.0);

    // Direct damage skips defenses.
    engine.damage_or_heal(hero, golem, 20.0, DamageType::Physical, false);
    assert_eq!(hp(&engine, golem), 65.0);
}

#[test]
fn hooks_fold_in_registration_order() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let slime = engine.spawn(monster("slime"));

    engine.add_effect(hero, Arc::new(Effect::Increase(5.0)), Intercept::Attack);
    engine.add_effect(hero, Arc::new(Effect::Multiply(2.0)), Intercept::Attack);
    let armor = Arc::new(Effect::Increase(-6.0));
    engine.add_effect(slime, Arc::clone(&armor), Intercept::ReceiveDamage);

    // (10 + 5) * 2 - 6
    engine.attack_target(hero, slime, 1.0, DamageType::Physical);
    assert_eq!(hp(&engine, slime), 76.0);

    assert!(engine.remove_effect(slime, &armor, Intercept::ReceiveDamage));
    engine.attack_target(hero, slime, 1.0, DamageType::Physical);
    assert_eq!(hp(&engine, slime), 46.0);
}

#[test]
fn unmodified_damage_skips_every_hook() {
    let mut engine = CombatEngine::default();
    let a = engine.spawn(fighter("a"));
    let b = engine.spawn(monster("b"));
    engine.add_effect(a, Arc::new(Effect::Multiply(0.0)), Intercept::DealDamage);
    engine.add_effect(b, Arc::new(Effect::Multiply(0.0)), Intercept::ReceiveDamage);

    engine.damage_or_heal(a, b, 25.0, DamageType::Magic, false);
    assert_eq!(hp(&engine, b), 75.0);

    engine.damage_or_heal(a, b, 25.0, DamageType::Magic, true);
    assert_eq!(hp(&engine, b), 75.0);
}

#[test]
fn healing_runs_healing_hooks() {
    let mut engine = CombatEngine::default();
    let cleric = engine.spawn(fighter("cleric"));
    let ally = engine.spawn(fighter("ally"));
    engine.damage_or_heal(cleric, ally, 60.0, DamageType::Physical, false);

    engine.set_attribute(cleric, AttributeName::Healing, 50);
    engine.add_effect(ally, Arc::new(Effect::Increase(-5.0)), Intercept::ReceiveHealing);

    // -20 * 1.5 - 5 = -35
    engine.damage_or_heal(cleric, ally, -20.0, DamageType::Nature, true);
    approx(hp(&engine, ally), 75.0);
}

#[test]
fn critical_strikes_multiply_damage() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(
        fighter("hero")
            .with(Statistic::CritChance, 1.0)
            .with(Statistic::CritDamage, 3.0),
    );
    let rat = engine.spawn(monster("rat"));

    engine.attack_target(hero, rat, 1.0, DamageType::Physical);
    assert_eq!(hp(&engine, rat), 70.0);
    assert!(engine.events().contains(&CombatEvent::CriticalHit {
        attacker: hero,
        target: rat,
        damage: 30.0,
    }));
}

#[test]
fn rolls_replay_for_the_same_seed() {
    let run = |seed: u64| {
        let mut engine = CombatEngine::with_rng(Arc::new(PcgRng), seed);
        let hero = engine.spawn(fighter("hero").with(Statistic::CritChance, 0.5));
        let dummy = engine.spawn(monster("dummy").with(Statistic::MaxHp, 10_000.0));
        for _ in 0..32 {
            engine.attack_target(hero, dummy, 1.0, DamageType::Physical);
        }
        engine
            .drain_events()
            .into_iter()
            .filter(|e| matches!(e, CombatEvent::CriticalHit { .. }))
            .count()
    };

    assert_eq!(run(11), run(11));
    let crits = run(11);
    assert!(crits > 0 && crits < 32, "{crits}");
}

#[test]
fn lifesteal_heals_the_attacker_mid_attack() {
    let mut engine = CombatEngine::default();
    let vampire = engine.spawn(fighter("vampire"));
    let victim = engine.spawn(monster("victim"));
    engine.damage_or_heal(victim, vampire, 50.0, DamageType::Physical, false);

    engine.set_attribute(vampire, AttributeName::Lifesteal, 50);
    engine.attack_target(vampire, victim, 2.0, DamageType::Physical);

    assert_eq!(hp(&engine, victim), 80.0);
    approx(hp(&engine, vampire), 60.0);
}

#[test]
fn retribution_reflects_damage_to_the_attacker() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let thorns = engine.spawn(monster("thorns"));
    engine.set_attribute(thorns, AttributeName::Retribution, 10);

    engine.attack_target(hero, thorns, 3.0, DamageType::Physical);
    assert_eq!(hp(&engine, thorns), 70.0);
    approx(hp(&engine, hero), 97.0);
}

#[test]
fn replenishment_restores_secondary_on_hit() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let target = engine.spawn(monster("target"));
    engine.modify_secondary(hero, hero, 50.0, DamageType::Physical, false);

    engine.set_attribute(hero, AttributeName::Replenishment, 20);
    engine.attack_target(hero, target, 5.0, DamageType::Physical);
    approx(engine.character(hero).unwrap().secondary().value(), 60.0);
}

#[test]
fn execution_passives_boost_damage_dealt() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let target = engine.spawn(monster("target"));
    engine.set_attribute(hero, AttributeName::Slaying, 25);

    engine.attack_target(hero, target, 1.0, DamageType::Physical);
    approx(hp(&engine, target), 85.0);

    engine.set_attribute(hero, AttributeName::Slaying, 0);
    engine.attack_target(hero, target, 1.0, DamageType::Physical);
    approx(hp(&engine, target), 75.0);
}

#[test]
fn constitution_raises_max_health_and_current() {
    let mut engine = CombatEngine::default();
    let tank = engine.spawn(fighter("tank"));
    engine.damage_or_heal(tank, tank, 30.0, DamageType::Physical, false);

    engine.set_attribute(tank, AttributeName::Constitution, 50);
    let character = engine.character(tank).unwrap();
    approx(character.health().max(), 150.0);
    approx(character.health().value(), 120.0);

    engine.set_attribute(tank, AttributeName::Constitution, 0);
    let character = engine.character(tank).unwrap();
    assert_eq!(character.health().max(), 100.0);
    assert_eq!(character.health().value(), 100.0);
}

#[test]
fn buff_matching_an_attribute_bonus_stacks_and_leaves_it_intact() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    engine.set_attribute(hero, AttributeName::Attack, 50);
    let attack = |engine: &CombatEngine| engine.character(hero).unwrap().stat(Statistic::AttackDamage);
    approx(attack(&engine), 15.0);

    let rage = StatModifier::multiplicative(Statistic::AttackDamage, 0.5);
    let buff = Effect::timed(
        1.0,
        0,
        Some(Effect::apply_modifier(rage, false)),
        Some(Effect::remove_modifier(rage, false)),
    );
    buff.call(&mut engine, Some(hero), hero, DamageType::Physical, 1.0);
    approx(attack(&engine), 20.0);

    engine.advance(1.0);
    approx(attack(&engine), 15.0);
    let character = engine.character(hero).unwrap();
    assert_eq!(character.attribute(AttributeName::Attack).map(|a| a.value()), Some(50));
    assert_eq!(character.stats().count(&rage), 1);
}

#[test]
fn secondary_hooks_follow_direction() {
    let mut engine = CombatEngine::default();
    let mage = engine.spawn(monster("mage"));
    engine.add_effect(mage, Arc::new(Effect::Multiply(0.5)), Intercept::SpendSecondary);
    engine.add_effect(mage, Arc::new(Effect::Multiply(2.0)), Intercept::RestoreSecondary);

    engine.modify_secondary(mage, mage, 40.0, DamageType::Magic, true);
    assert_eq!(engine.character(mage).unwrap().secondary().value(), 80.0);

    engine.modify_secondary(mage, mage, -5.0, DamageType::Magic, true);
    assert_eq!(engine.character(mage).unwrap().secondary().value(), 90.0);

    engine.modify_secondary(mage, mage, 40.0, DamageType::Magic, false);
    assert_eq!(engine.character(mage).unwrap().secondary().value(), 50.0);
}

#[test]
fn kills_award_experience_once() {
    let mut engine = CombatEngine::new(EngineConfig::with_seed(3));
    let hero = engine.spawn_player(fighter("hero").with(Statistic::ExperienceValue, 2.0));
    let goblin = engine.spawn(monster("goblin").with(Statistic::ExperienceValue, 30.0));

    engine.attack_target(hero, goblin, 20.0, DamageType::Physical);
    assert!(engine.character(goblin).unwrap().is_dead());
    assert_eq!(hp(&engine, goblin), 0.0);

    engine.attack_target(hero, goblin, 20.0, DamageType::Physical);
    let progression = engine.character(hero).unwrap().progression().unwrap();
    assert_eq!(progression.experience().value(), 60.0);
    assert_eq!(progression.level(), 1);

    let deaths = engine
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::Died { .. }))
        .count();
    assert_eq!(deaths, 1);
}

#[test]
fn kill_hooks_can_push_a_level_up() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn_player(fighter("hero"));
    let boss = engine.spawn(monster("boss").with(Statistic::ExperienceValue, 30.0));
    engine.add_effect(hero, Arc::new(Effect::Multiply(5.0)), Intercept::KillTarget);
    let last_words = Arc::new(Effect::damage_or_heal(10.0, false));
    engine.add_effect(boss, last_words, Intercept::Die);

    engine.die(boss, hero);

    // The boss's Die hook hits the killer on the way out.
    assert_eq!(hp(&engine, hero), 90.0);

    // 150 experience: one level (100) with 50 carried into a 120 gauge.
    let progression = engine.character(hero).unwrap().progression().unwrap();
    assert_eq!(progression.level(), 2);
    approx(progression.experience().value(), 50.0);
    approx(progression.experience().max(), 120.0);
    assert!(engine.events().contains(&CombatEvent::LevelUp {
        character: hero,
        level: 2,
    }));
}

#[test]
fn removed_characters_become_inert() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let ghost = engine.spawn(monster("ghost"));
    engine.remove(ghost);

    engine.attack_target(hero, ghost, 1.0, DamageType::Physical);
    engine.attack_target(ghost, hero, 1.0, DamageType::Physical);
    assert!(engine.character(ghost).is_none());
    assert_eq!(hp(&engine, hero), 100.0);
}

struct Bar(Rc<Cell<f32>>);

impl ResourceDisplay for Bar {
    fn update(&self, proportion: f32) {
        self.0.set(proportion);
    }
}

#[test]
fn bound_display_tracks_health() {
    let mut engine = CombatEngine::default();
    let hero = engine.spawn(fighter("hero"));
    let orc = engine.spawn(monster("orc"));

    let shown = Rc::new(Cell::new(0.0));
    engine
        .character_mut(orc)
        .unwrap()
        .stats_mut()
        .health_mut()
        .bind_display(Box::new(Bar(Rc::clone(&shown))));
    assert_eq!(shown.get(), 1.0);

    engine.attack_target(hero, orc, 2.5, DamageType::Physical);
    assert_eq!(shown.get(), 0.75);
}
