#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    use proptest::prelude::*;
    use starfall_core::components::{Vitals, WeaponSlot};
    use starfall_core::config::{VitalsConfig, WeaponConfig};
    use starfall_core::enums::{TargetPolicy, WeaponMode};
    use starfall_core::types::{bearing_of, Position};

    use crate::targeting::*;
    use crate::vitals::*;

    fn player_vitals() -> Vitals {
        new_vitals(&VitalsConfig::default())
    }

    // ---- Vitals ----

    #[test]
    fn test_new_vitals_full() {
        let v = player_vitals();
        assert_eq!(v.health, 100.0);
        assert_eq!(v.shield, 50.0);
        assert!(!v.dead);
    }

    #[test]
    fn test_shield_absorbs_then_overflows() {
        let mut v = player_vitals();
        let first = apply_damage(&mut v, 70.0, 1.0);
        assert_eq!(v.shield, 0.0);
        assert_eq!(v.health, 80.0);
        assert_eq!(first.shield_absorbed, 50.0);
        assert_eq!(first.health_lost, 20.0);
        assert!(!first.died);

        let second = apply_damage(&mut v, 90.0, 1.5);
        assert_eq!(v.health, -10.0);
        assert!(second.died);
        assert!(v.dead);
    }

    #[test]
    fn test_dead_pool_ignores_further_damage() {
        let mut v = player_vitals();
        apply_damage(&mut v, 500.0, 1.0);
        let again = apply_damage(&mut v, 10.0, 2.0);
        assert!(!again.died);
        assert_eq!(again, DamageOutcome::default());
        assert_eq!(v.last_damage_at, 1.0);
    }

    #[test]
    fn test_zero_damage_resets_regen_timer() {
        let mut v = player_vitals();
        apply_damage(&mut v, 0.0, 4.0);
        assert_eq!(v.health, 100.0);
        assert_eq!(v.shield, 50.0);
        assert_eq!(v.last_damage_at, 4.0);
    }

    #[test]
    fn test_negative_damage_clamped() {
        let mut v = player_vitals();
        apply_damage(&mut v, -25.0, 1.0);
        assert_eq!(v.health, 100.0);
        assert_eq!(v.shield, 50.0);
    }

    #[test]
    fn test_regen_waits_for_cooldown() {
        let mut v = player_vitals();
        apply_damage(&mut v, 30.0, 10.0);
        assert_eq!(v.shield, 20.0);

        regen_tick(&mut v, 1.0, 12.0);
        assert_eq!(v.shield, 20.0, "cooldown not elapsed");

        regen_tick(&mut v, 1.0, 13.0);
        assert_eq!(v.shield, 25.0);

        for i in 0..20 {
            regen_tick(&mut v, 1.0, 14.0 + i as f64);
        }
        assert_eq!(v.shield, 50.0, "capped at max");
    }

    #[test]
    fn test_damage_multiplier() {
        let mut v = player_vitals();
        v.damage_multiplier = 1.5;
        assert_eq!(apply_damage_multiplier(&v, 10.0), 15.0);
    }

    #[test]
    fn test_fractions_clamped() {
        let mut v = player_vitals();
        apply_damage(&mut v, 160.0, 0.0);
        assert_eq!(health_fraction(&v), 0.0);
        assert_eq!(shield_fraction(&v), 0.0);

        let shieldless = new_vitals(&VitalsConfig {
            max_shield: 0.0,
            ..VitalsConfig::default()
        });
        assert_eq!(shield_fraction(&shieldless), 0.0);
        assert_eq!(health_fraction(&shieldless), 1.0);
    }

    #[test]
    fn test_restore_shield_caps() {
        let mut v = player_vitals();
        apply_damage(&mut v, 40.0, 0.0);
        assert_eq!(restore_shield(&mut v, 25.0), 25.0);
        assert_eq!(restore_shield(&mut v, 25.0), 15.0);
        assert_eq!(v.shield, 50.0);
    }

    proptest! {
        #[test]
        fn prop_mitigation_formula(
            shield in 0.0f64..200.0,
            health in 1.0f64..200.0,
            amount in 0.0f64..500.0,
        ) {
            let mut v = player_vitals();
            v.shield = shield;
            v.max_shield = 200.0;
            v.health = health;
            v.max_health = 200.0;

            let outcome = apply_damage(&mut v, amount, 0.0);
            let expected_health = health - (amount - shield).max(0.0);
            prop_assert!((v.health - expected_health).abs() < 1e-9);
            prop_assert!((v.shield - (shield - amount).max(0.0)).abs() < 1e-9);
            prop_assert!((outcome.shield_absorbed + outcome.health_lost - amount).abs() < 1e-9);
            prop_assert_eq!(outcome.died, expected_health <= 0.0);
        }

        #[test]
        fn prop_regen_never_exceeds_max(steps in 1usize..200, dt in 0.0f64..1.0) {
            let mut v = player_vitals();
            apply_damage(&mut v, 45.0, 0.0);
            let mut now = 0.0;
            for _ in 0..steps {
                now += dt;
                regen_tick(&mut v, dt, now);
                prop_assert!(v.shield <= v.max_shield);
                prop_assert!(v.shield >= 5.0);
            }
        }
    }

    // ---- Targeting ----

    fn forward_slot() -> WeaponSlot {
        new_slot(&WeaponConfig::default())
    }

    #[test]
    fn test_arc_and_range_scenario() {
        // Default slot: range 10, full arc 90 deg, facing +y.
        let origin = Position::new(0.0, 0.0);
        assert!(!in_range_and_arc(&origin, 0.0, 10.0, 90.0, &Position::new(0.0, 15.0)));
        assert!(in_range_and_arc(&origin, 0.0, 10.0, 90.0, &Position::new(0.0, 5.0)));
        // 44 deg off axis qualifies, 46 does not.
        let near_edge = origin.offset(44f64.to_radians(), 5.0);
        let past_edge = origin.offset(46f64.to_radians(), 5.0);
        assert!(in_range_and_arc(&origin, 0.0, 10.0, 90.0, &near_edge));
        assert!(!in_range_and_arc(&origin, 0.0, 10.0, 90.0, &past_edge));
        // Behind the ship.
        assert!(!in_range_and_arc(&origin, 0.0, 10.0, 90.0, &Position::new(0.0, -5.0)));
    }

    #[test]
    fn test_arc_wraps_through_north() {
        let origin = Position::new(0.0, 0.0);
        let forward = 350f64.to_radians();
        let target = origin.offset(20f64.to_radians(), 5.0);
        assert!(in_range_and_arc(&origin, forward, 10.0, 90.0, &target));
    }

    #[test]
    fn test_acquire_policies() {
        let slot = forward_slot();
        let origin = Position::new(0.0, 0.0);
        let candidates = vec![
            (1u32, Position::new(0.0, 15.0)), // out of range
            (2u32, Position::new(0.0, 8.0)),
            (3u32, Position::new(0.0, 3.0)),
            (4u32, Position::new(0.0, -2.0)), // behind
        ];
        assert_eq!(
            acquire(&slot, &origin, 0.0, candidates.clone(), TargetPolicy::FirstInScan),
            Some(2)
        );
        assert_eq!(
            acquire(&slot, &origin, 0.0, candidates, TargetPolicy::Nearest),
            Some(3)
        );
        assert_eq!(
            acquire::<u32, _>(&slot, &origin, 0.0, Vec::new(), TargetPolicy::Nearest),
            None
        );
    }

    #[test]
    fn test_mount_bearing_shifts_arc() {
        let slot = new_slot(&WeaponConfig {
            mount_bearing_deg: 90.0,
            ..WeaponConfig::default()
        });
        let origin = Position::new(0.0, 0.0);
        assert!(slot_covers(&slot, &origin, 0.0, &Position::new(5.0, 0.0)));
        assert!(!slot_covers(&slot, &origin, 0.0, &Position::new(0.0, 5.0)));
        // Owner turned to face +x: the starboard mount now looks down -y.
        assert!(slot_covers(&slot, &origin, FRAC_PI_2, &Position::new(0.0, -5.0)));
    }

    #[test]
    fn test_activate_clears_target_on_switch() {
        let mut world = hecs::World::new();
        let target = world.spawn(());
        let mut slot = forward_slot();
        slot.current_target = Some(target);

        assert!(!activate(&mut slot, WeaponMode::Autonomous));
        assert_eq!(slot.current_target, Some(target));

        assert!(activate(&mut slot, WeaponMode::Manual));
        assert_eq!(slot.mode, WeaponMode::Manual);
        assert!(slot.current_target.is_none());
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut slot = forward_slot();
        let owner = player_vitals();
        let origin = Position::new(0.0, 0.0);

        assert!(fire(&mut slot, &origin, 0.0, &owner, None, 0.0).is_some());
        assert_eq!(slot.next_fire_time, 1.0);
        assert!(fire(&mut slot, &origin, 0.0, &owner, None, 0.5).is_none());
        assert!(fire(&mut slot, &origin, 0.0, &owner, None, 1.0).is_some());
    }

    #[test]
    fn test_fire_damage_uses_multiplier() {
        let mut slot = forward_slot();
        let mut owner = player_vitals();
        owner.damage_multiplier = 1.025;
        let shot = fire(&mut slot, &Position::new(0.0, 0.0), 0.0, &owner, None, 0.0).unwrap();
        assert_eq!(shot.base_damage, 10.0);
        assert!((shot.damage - 10.25).abs() < 1e-12);
    }

    #[test]
    fn test_fire_aims_at_target() {
        let mut slot = forward_slot();
        let owner = player_vitals();
        let origin = Position::new(0.0, 0.0);
        let target = Position::new(3.0, 3.0);
        let shot = fire(&mut slot, &origin, 0.0, &owner, Some(&target), 0.0).unwrap();
        assert!((slot.aim - PI / 4.0).abs() < 1e-12);
        assert!((bearing_of(shot.velocity) - PI / 4.0).abs() < 1e-9);
        assert!((shot.velocity.length() - slot.projectile_speed).abs() < 1e-9);
    }

    #[test]
    fn test_non_positive_fire_rate_never_fires() {
        let mut slot = forward_slot();
        slot.fire_rate = 0.0;
        let owner = player_vitals();
        assert!(!can_fire(&slot, 100.0));
        assert!(fire(&mut slot, &Position::new(0.0, 0.0), 0.0, &owner, None, 100.0).is_none());
    }

    #[test]
    fn test_disabled_slot_never_fires() {
        let mut slot = forward_slot();
        slot.enabled = false;
        assert!(!can_fire(&slot, 100.0));
    }

    proptest! {
        #[test]
        fn prop_arc_rotation_symmetry(
            tx in -20.0f64..20.0,
            ty in -20.0f64..20.0,
            forward in 0.0f64..TAU,
            theta in 0.0f64..TAU,
            arc in 10.0f64..350.0,
        ) {
            let origin = Position::new(0.0, 0.0);
            let target = Position::new(tx, ty);
            let range = 12.0;
            // Skip points sitting numerically on the range or arc boundary.
            let distance = origin.range_to(&target);
            prop_assume!((distance - range).abs() > 1e-6 && distance > 1e-6);
            let off_axis = starfall_core::types::angle_delta(forward, origin.bearing_to(&target)).abs();
            prop_assume!((off_axis - (arc / 2.0).to_radians()).abs() > 1e-6);

            let rotated = origin.offset(origin.bearing_to(&target) + theta, distance);
            prop_assert_eq!(
                in_range_and_arc(&origin, forward, range, arc, &target),
                in_range_and_arc(&origin, forward + theta, range, arc, &rotated)
            );
        }
    }
}
