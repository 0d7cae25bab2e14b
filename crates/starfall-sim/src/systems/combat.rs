//! Combat pipeline: projectile impact → damage → death → reward.
//!
//! Impacts recorded by the physics steps are resolved one at a time, in the
//! order they were detected. Each projectile applies damage at most once, and
//! a kill reward is granted only on the hit that confirmed the death.

use hecs::{Entity, World};

use starfall_combat::vitals::apply_damage;
use starfall_core::components::*;
use starfall_core::config::{LevelUpScaling, RewardTable};
use starfall_core::events::SimEvent;
use starfall_progression::rewards::xp_for_tag;

use super::collisions::Impact;
use super::leveling;

/// Tuning the pipeline needs from the game configuration.
pub struct CombatContext<'a> {
    pub rewards: &'a RewardTable,
    pub scaling: &'a LevelUpScaling,
    pub now: f64,
}

/// Resolve every pending impact.
pub fn run(world: &mut World, impacts: &mut Vec<Impact>, ctx: &CombatContext, events: &mut Vec<SimEvent>) {
    for impact in impacts.drain(..) {
        resolve_impact(world, impact, ctx, events);
    }
}

/// True while an entity exists and has not been destroyed.
pub fn is_alive(world: &World, entity: Entity) -> bool {
    world.contains(entity)
        && world.get::<&Dead>(entity).is_err()
        && world.get::<&Vitals>(entity).map_or(true, |v| !v.dead)
}

fn ship_number(world: &World, entity: Entity) -> u32 {
    world.get::<&ShipId>(entity).map_or(0, |id| id.0)
}

fn resolve_impact(world: &mut World, impact: Impact, ctx: &CombatContext, events: &mut Vec<SimEvent>) {
    // A target killed earlier in this batch lets the projectile fly on.
    if !is_alive(world, impact.target) {
        return;
    }

    let (owner, damage) = {
        let Ok(mut projectile) = world.get::<&mut Projectile>(impact.projectile) else {
            return;
        };
        if projectile.spent {
            return;
        }
        projectile.spent = true;
        (projectile.owner, projectile.damage)
    };
    let _ = world.insert_one(impact.projectile, Dead);

    let outcome = {
        let Ok(mut vitals) = world.get::<&mut Vitals>(impact.target) else {
            return;
        };
        apply_damage(&mut vitals, damage, ctx.now)
    };

    let ship = ship_number(world, impact.target);
    events.push(SimEvent::DamageTaken {
        ship,
        shield_absorbed: outcome.shield_absorbed,
        health_lost: outcome.health_lost,
    });

    if !outcome.died {
        return;
    }

    let tag = world
        .get::<&CategoryTag>(impact.target)
        .map(|t| t.0.clone())
        .unwrap_or_default();
    tracing::info!(ship, tag = %tag, "ship destroyed");
    events.push(SimEvent::ShipDestroyed {
        ship,
        tag: tag.clone(),
    });

    // The player's hull stays in the world so the final state can be inspected.
    if world.get::<&PlayerShip>(impact.target).is_err() {
        let _ = world.insert_one(impact.target, Dead);
    }

    reward_kill(world, owner, &tag, ctx, events);
}

/// Route the kill reward for `tag` to the shooter's ledger, if it keeps one.
fn reward_kill(world: &mut World, owner: Entity, tag: &str, ctx: &CombatContext, events: &mut Vec<SimEvent>) {
    if world.get::<&ProgressionLedger>(owner).is_err() {
        return;
    }
    match xp_for_tag(ctx.rewards, tag) {
        Some(xp) => {
            leveling::award_xp(world, owner, xp, tag, ctx.scaling, events);
        }
        None => events.push(SimEvent::RewardAnomaly {
            tag: tag.to_string(),
        }),
    }
}
