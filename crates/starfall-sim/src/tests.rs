//! Tests for the simulation engine, combat pipeline, progression routing and weapon slots.

use hecs::Entity;

use starfall_core::commands::PlayerCommand;
use starfall_core::components::*;
use starfall_core::config::GameConfig;
use starfall_core::enums::*;
use starfall_core::events::SimEvent;
use starfall_core::types::{Position, Velocity};

use crate::engine::{SimConfig, SimulationEngine};
use crate::pickups::{ExpGem, ShieldCell};
use crate::systems::movement;

fn new_engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

fn engine_with(game: GameConfig) -> SimulationEngine {
    SimulationEngine::new(SimConfig {
        game,
        ..Default::default()
    })
}

/// Tick `n` times, collecting every event.
fn run_ticks(engine: &mut SimulationEngine, n: usize) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..n {
        events.extend(engine.tick().events);
    }
    events
}

/// Tick until an event matches `pred` (at most `max` ticks). Returns all events seen.
fn run_until(
    engine: &mut SimulationEngine,
    max: usize,
    pred: impl Fn(&SimEvent) -> bool,
) -> Vec<SimEvent> {
    let mut events = Vec::new();
    for _ in 0..max {
        let snap = engine.tick();
        let found = snap.events.iter().any(&pred);
        events.extend(snap.events);
        if found {
            break;
        }
    }
    events
}

fn count(events: &[SimEvent], pred: impl Fn(&SimEvent) -> bool) -> usize {
    events.iter().filter(|e| pred(*e)).count()
}

fn position_of(engine: &SimulationEngine, entity: Entity) -> Position {
    *engine.world().get::<&Position>(entity).unwrap()
}

fn still() -> Velocity {
    Velocity::new(0.0, 0.0)
}

/// Take slot 0 under manual control so the player's guns stay quiet.
fn silence_player_guns(engine: &mut SimulationEngine) {
    engine.queue_command(PlayerCommand::SelectWeaponSlot { index: 0 });
}

// ---- Combat pipeline ----

#[test]
fn test_shield_then_lethal_hit_scenario() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    let shooter = engine.spawn_enemy(ShipClass::Small, Position::new(0.0, 500.0));

    engine.spawn_test_projectile(shooter, Position::new(0.0, 0.0), still(), 70.0);
    let events = run_until(&mut engine, 10, |e| matches!(e, SimEvent::DamageTaken { .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::DamageTaken { ship: 1, shield_absorbed, health_lost }
            if *shield_absorbed == 50.0 && *health_lost == 20.0
    )));
    let vitals = engine.player_vitals().unwrap();
    assert_eq!(vitals.shield, 0.0);
    assert_eq!(vitals.health, 80.0);

    engine.spawn_test_projectile(shooter, Position::new(0.0, 0.0), still(), 90.0);
    let mut events = run_until(&mut engine, 10, |e| matches!(e, SimEvent::ShipDestroyed { .. }));
    events.extend(run_ticks(&mut engine, 5));

    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::ShipDestroyed { .. })),
        1
    );
    let vitals = engine.player_vitals().unwrap();
    assert_eq!(vitals.health, -10.0);
    assert!(vitals.dead);
    assert_eq!(engine.phase(), GamePhase::GameOver);
    assert_eq!(engine.player(), Some(player));
}

#[test]
fn test_game_over_freezes_time() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    let shooter = engine.spawn_enemy(ShipClass::Small, Position::new(0.0, 500.0));
    engine.spawn_test_projectile(shooter, Position::new(0.0, 0.0), still(), 1000.0);

    run_until(&mut engine, 10, |e| matches!(e, SimEvent::ShipDestroyed { .. }));
    assert_eq!(engine.phase(), GamePhase::GameOver);

    let frozen = engine.time();
    run_ticks(&mut engine, 30);
    assert_eq!(engine.time().tick, frozen.tick);

    // Resume does not leave GameOver.
    engine.queue_command(PlayerCommand::Resume);
    engine.tick();
    assert_eq!(engine.phase(), GamePhase::GameOver);
}

#[test]
fn test_kill_reward_granted_once() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    let enemy = engine.spawn_enemy(ShipClass::Medium, Position::new(20.0, 0.0));

    let at = position_of(&engine, enemy);
    engine.spawn_test_projectile(player, at, still(), 1000.0);
    engine.spawn_test_projectile(player, at, still(), 1000.0);

    let mut events = run_until(&mut engine, 10, |e| matches!(e, SimEvent::ShipDestroyed { .. }));
    events.extend(run_ticks(&mut engine, 10));

    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::ShipDestroyed { tag, .. } if tag == "MediumEnemy")),
        1
    );
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::XpAwarded { amount, .. } if *amount == 25.0)),
        1
    );
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::DamageTaken { ship: 2, .. })),
        1,
        "second projectile must not hit a dead ship"
    );
    assert_eq!(engine.player_ledger().unwrap().xp, 25.0);
    assert!(!engine.world().contains(enemy));
}

#[test]
fn test_unknown_tag_yields_anomaly() {
    let mut game = GameConfig::default();
    game.progression.rewards.0.remove("MediumEnemy");
    let mut engine = engine_with(game);
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    let enemy = engine.spawn_enemy(ShipClass::Medium, Position::new(20.0, 0.0));
    let at = position_of(&engine, enemy);
    engine.spawn_test_projectile(player, at, still(), 1000.0);

    let events = run_until(&mut engine, 10, |e| matches!(e, SimEvent::ShipDestroyed { .. }));
    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::RewardAnomaly { tag } if tag == "MediumEnemy")));
    assert_eq!(engine.player_ledger().unwrap().xp, 0.0);
}

#[test]
fn test_enemy_kill_of_enemy_rewards_nobody() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    let victim = engine.spawn_enemy(ShipClass::Medium, Position::new(20.0, 0.0));
    // Hostile projectiles never touch hostile hulls.
    let other = engine.spawn_enemy(ShipClass::Small, Position::new(-40.0, 0.0));
    let at = position_of(&engine, victim);
    engine.spawn_test_projectile(other, at, still(), 1000.0);

    let events = run_ticks(&mut engine, 10);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::DamageTaken { .. })), 0);
    assert!(engine.world().contains(victim));
}

// ---- Targeting ----

#[test]
fn test_autonomous_slot_ignores_out_of_range_enemy() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 15.0));

    let events = engine.tick().events;
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::TargetAcquired { ship: 1, .. })),
        0
    );
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::WeaponFired { ship: 1, .. })),
        0
    );
}

#[test]
fn test_autonomous_slot_acquires_and_fires() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 5.0));

    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::TargetAcquired {
            ship: 1,
            slot: 0,
            target: 2
        }
    )));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WeaponFired { ship: 1, slot: 0, .. })));
    // Locked slots stay silent.
    assert!(!snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::WeaponFired { ship: 1, slot: 1 | 2, .. })));
    assert_eq!(snap.projectile_count, 1);
    assert!(snap.player.unwrap().slots[0].has_target);
}

#[test]
fn test_target_cleared_when_target_destroyed() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    let enemy = engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 5.0));

    engine.tick();
    assert_eq!(
        engine.player_armament().unwrap().slots[0].current_target,
        Some(enemy)
    );

    let at = position_of(&engine, enemy);
    engine.spawn_test_projectile(player, at, still(), 1000.0);
    let events = run_until(&mut engine, 10, |e| matches!(e, SimEvent::ShipDestroyed { .. }));

    assert!(events
        .iter()
        .any(|e| matches!(e, SimEvent::TargetLost { ship: 1, slot: 0 })));
    assert!(!engine.world().contains(enemy));
    assert!(engine.player_armament().unwrap().slots[0]
        .current_target
        .is_none());
}

#[test]
fn test_large_turrets_engage_player() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    let large = engine.spawn_enemy(ShipClass::Large, Position::new(3.0, 6.0));
    assert_eq!(
        engine.world().get::<&ShipId>(large).unwrap().0,
        2
    );

    let events = engine.tick().events;
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::TargetAcquired {
            ship: 2,
            target: 1,
            ..
        }
    )));
}

#[test]
fn test_nearest_policy_from_config() {
    let mut game = GameConfig::default();
    game.targeting.policy = TargetPolicy::Nearest;
    let mut engine = engine_with(game);
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 8.0));
    let near = engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 3.0));

    engine.tick();
    assert_eq!(
        engine.player_armament().unwrap().slots[0].current_target,
        Some(near)
    );
}

// ---- Weapon slots ----

#[test]
fn test_locked_slot_rejects_selection() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.queue_command(PlayerCommand::SelectWeaponSlot { index: 1 });

    let snap = engine.tick();
    assert!(snap.events.iter().any(|e| matches!(
        e,
        SimEvent::SlotLocked {
            slot: 1,
            required_level: 3
        }
    )));
    let player = snap.player.unwrap();
    assert_eq!(player.active_slot, None);
    assert!(!player.slots[1].enabled);
    assert_eq!(player.slots[1].unlock_level, 3);
}

#[test]
fn test_select_slot_switches_manual_control() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    silence_player_guns(&mut engine);

    let snap = engine.tick();
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::SlotSelected { slot: 0 })));
    let armament = engine.player_armament().unwrap();
    assert_eq!(armament.active, Some(0));
    assert_eq!(armament.slots[0].mode, WeaponMode::Manual);

    let pos = position_of(&engine, player);
    engine.spawn_pickup(ExpGem { xp: 250.0 }, pos);
    engine.tick();
    assert_eq!(engine.player_ledger().unwrap().level, 3);

    engine.queue_command(PlayerCommand::SelectWeaponSlot { index: 1 });
    engine.tick();
    let armament = engine.player_armament().unwrap();
    assert_eq!(armament.active, Some(1));
    assert_eq!(armament.slots[1].mode, WeaponMode::Manual);
    assert_eq!(armament.slots[0].mode, WeaponMode::Autonomous);
}

#[test]
fn test_manual_slot_fires_on_trigger() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    silence_player_guns(&mut engine);
    let events = run_ticks(&mut engine, 5);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::WeaponFired { .. })), 0);

    engine.queue_command(PlayerCommand::SetTrigger { held: true });
    let events = run_ticks(&mut engine, 30);
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::WeaponFired { ship: 1, slot: 0, .. })),
        1,
        "one shot per second at fire rate 1"
    );

    engine.queue_command(PlayerCommand::SetTrigger { held: false });
    let events = run_ticks(&mut engine, 120);
    assert_eq!(count(&events, |e| matches!(e, SimEvent::WeaponFired { .. })), 0);
}

// ---- Progression ----

#[test]
fn test_exp_gem_levels_and_rescales() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    let pos = position_of(&engine, player);
    engine.spawn_pickup(ExpGem { xp: 250.0 }, pos);

    let snap = engine.tick();
    let levels: Vec<u32> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            SimEvent::LeveledUp { level } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![2, 3]);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::SlotUnlocked { slot: 1 })));
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, SimEvent::PickupCollected { kind } if kind == "ExpGem")));
    assert_eq!(snap.pickup_count, 0);

    let ledger = engine.player_ledger().unwrap();
    assert_eq!(ledger.level, 3);
    assert_eq!(ledger.xp, 0.0);
    assert_eq!(ledger.xp_cap, 200.0);

    let vitals = engine.player_vitals().unwrap();
    assert!((vitals.max_health - 110.25).abs() < 1e-9);
    assert!((vitals.health - vitals.max_health).abs() < 1e-9);
    assert!((vitals.damage_multiplier - 1.025 * 1.025).abs() < 1e-12);

    let armament = engine.player_armament().unwrap();
    assert!((armament.slots[0].fire_rate - 1.1025).abs() < 1e-9);
    assert!(armament.slots[1].enabled);
    assert!(!armament.slots[2].enabled);
}

#[test]
fn test_pickup_out_of_reach_stays() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_pickup(ExpGem::default(), Position::new(10.0, 10.0));
    let snap = engine.tick();
    assert_eq!(snap.pickup_count, 1);
    assert_eq!(engine.player_ledger().unwrap().xp, 0.0);
}

#[test]
fn test_shield_cell_restores_shield() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    let shooter = engine.spawn_enemy(ShipClass::Small, Position::new(0.0, 500.0));
    engine.spawn_test_projectile(shooter, Position::new(0.0, 0.0), still(), 30.0);
    run_until(&mut engine, 10, |e| matches!(e, SimEvent::DamageTaken { .. }));
    assert_eq!(engine.player_vitals().unwrap().shield, 20.0);

    engine.spawn_pickup(ShieldCell { amount: 15.0 }, Position::new(0.5, 0.5));
    engine.tick();
    assert_eq!(engine.player_vitals().unwrap().shield, 35.0);
}

#[test]
fn test_projectile_damage_includes_multiplier() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    engine
        .world_mut()
        .get::<&mut Vitals>(player)
        .unwrap()
        .damage_multiplier = 2.0;
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 5.0));

    let events = engine.tick().events;
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::WeaponFired { ship: 1, damage, .. } if *damage == 20.0
    )));
}

// ---- Phase and time ----

#[test]
fn test_pause_and_resume() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.tick();
    let t1 = engine.time().tick;

    engine.queue_command(PlayerCommand::Pause);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    assert_eq!(engine.time().tick, t1);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(engine.time().tick, t1 + 1);
}

#[test]
fn test_time_scale_stretches_frames() {
    let mut engine = SimulationEngine::new(SimConfig {
        time_scale: 2.0,
        ..Default::default()
    });
    engine.update(0.1);
    assert!((engine.time().elapsed_secs - 0.2).abs() < 1e-12);
}

// ---- Movement ----

#[test]
fn test_player_thrust_respects_max_speed() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    engine.queue_command(PlayerCommand::SetThrust { x: 0.0, y: 1.0 });
    run_ticks(&mut engine, 180);

    let pos = position_of(&engine, player);
    assert!(pos.y > 1.0);
    assert!(pos.x.abs() < 1e-9);
    let vel = *engine.world().get::<&Velocity>(player).unwrap();
    assert!(vel.speed() <= 5.0 + 1e-9);
}

#[test]
fn test_player_turns_toward_aim() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    engine.queue_command(PlayerCommand::SetAim {
        bearing: std::f64::consts::FRAC_PI_2,
    });

    engine.update(0.1);
    let heading = engine
        .world()
        .get::<&starfall_core::types::Heading>(player)
        .unwrap()
        .0;
    // 180 deg/s for 0.1 s: a fifth of the way there.
    assert!(heading > 0.0 && heading < std::f64::consts::FRAC_PI_2);

    run_ticks(&mut engine, 60);
    let heading = engine
        .world()
        .get::<&starfall_core::types::Heading>(player)
        .unwrap()
        .0;
    assert!((heading - std::f64::consts::FRAC_PI_2).abs() < 1e-9);
}

#[test]
fn test_turn_toward_takes_short_way() {
    let next = movement::turn_toward(0.1, 6.2, 0.05);
    assert!((next - 0.05).abs() < 1e-12);
    let next = movement::turn_toward(0.0, 1.0, 5.0);
    assert!((next - 1.0).abs() < 1e-12);
}

#[test]
fn test_projectile_expires() {
    let mut engine = new_engine();
    let player = engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_test_projectile(player, Position::new(0.0, 50.0), Velocity::new(0.0, 10.0), 10.0);

    let snap = engine.tick();
    assert_eq!(snap.projectile_count, 1);
    run_ticks(&mut engine, 310);
    assert_eq!(engine.snapshot().projectile_count, 0);
}

// ---- Enemy behavior ----

#[test]
fn test_small_enemy_chases_and_passes_through() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    silence_player_guns(&mut engine);
    let small = engine.spawn_enemy(ShipClass::Small, Position::new(0.0, 10.0));

    run_ticks(&mut engine, 60);
    assert!(position_of(&engine, small).y < 10.0);

    let events = run_until(&mut engine, 600, |e| {
        matches!(
            e,
            SimEvent::PursuitChanged {
                phase: PursuitPhase::PassThrough,
                ..
            }
        )
    });
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::PursuitChanged {
            ship: 2,
            phase: PursuitPhase::PassThrough
        }
    )));
}

#[test]
fn test_medium_enemy_breaks_off_after_strafe_time() {
    let mut engine = new_engine();
    engine.spawn_player(Position::new(0.0, 0.0));
    silence_player_guns(&mut engine);
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 8.0));

    let snap = engine.tick();
    assert_eq!(snap.ships[0].behavior, Some(BehaviorMode::Strafe));

    let events = run_ticks(&mut engine, 200);
    assert!(events.iter().any(|e| matches!(
        e,
        SimEvent::BehaviorChanged {
            ship: 2,
            mode: BehaviorMode::RandomFly
        }
    )));
}

#[test]
fn test_medium_fires_every_shoot_interval() {
    let mut game = GameConfig::default();
    game.player.vitals.max_health = 1.0e9;
    let mut engine = engine_with(game);
    engine.spawn_player(Position::new(0.0, 0.0));
    silence_player_guns(&mut engine);
    engine.spawn_enemy(ShipClass::Medium, Position::new(0.0, 8.0));

    // 20 s of play at a 1 s shoot interval.
    let events = run_ticks(&mut engine, 1200);
    assert_eq!(engine.phase(), GamePhase::Active);
    let volleys = count(&events, |e| matches!(e, SimEvent::WeaponFired { ship: 2, slot: 0, .. }));
    assert!((19..=20).contains(&volleys), "expected a volley per second, got {volleys}");
    assert_eq!(
        count(&events, |e| matches!(e, SimEvent::WeaponFired { ship: 2, slot: 1, .. })),
        volleys
    );
}

// ---- Determinism ----

fn scripted_engine(seed: u64) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig {
        seed,
        ..Default::default()
    });
    engine.spawn_player(Position::new(0.0, 0.0));
    engine.spawn_enemy(ShipClass::Medium, Position::new(3.0, 8.0));
    engine.spawn_enemy(ShipClass::Large, Position::new(-6.0, 4.0));
    engine.spawn_enemy(ShipClass::Small, Position::new(0.0, -9.0));
    engine.spawn_pickup(ExpGem::default(), Position::new(1.0, 1.0));
    engine.queue_command(PlayerCommand::SetThrust { x: 1.0, y: 0.5 });
    engine
}

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = scripted_engine(12345);
    let mut engine_b = scripted_engine(12345);

    for _ in 0..300 {
        let snap_a = engine_a.tick();
        let snap_b = engine_b.tick();
        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "snapshots diverged at tick {}", snap_a.time.tick);
    }
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = scripted_engine(7);
    let snap = engine.tick();
    let json = serde_json::to_string(&snap).unwrap();
    assert!(json.contains("\"phase\":\"Active\""));
    assert_eq!(snap.ships.len(), 3);
    assert_eq!(snap.player.unwrap().level, 1);
}
