//! Opening layout for a headless run, plus a simple autopilot that stands in
//! for a human at the controls.

use serde::{Deserialize, Serialize};

use starfall_core::commands::PlayerCommand;
use starfall_core::enums::ShipClass;
use starfall_core::state::GameStateSnapshot;
use starfall_core::types::Position;
use starfall_sim::pickups::{ExpGem, ShieldCell};
use starfall_sim::{SimConfig, SimulationEngine};

/// How many ships of each class start on the field, and how far out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wave {
    pub small: u32,
    pub medium: u32,
    pub large: u32,
    /// Radius of the spawn ring around the player.
    pub ring_radius: f64,
    pub exp_gems: u32,
    pub shield_cells: u32,
}

impl Default for Wave {
    fn default() -> Self {
        Self {
            small: 4,
            medium: 2,
            large: 1,
            ring_radius: 14.0,
            exp_gems: 6,
            shield_cells: 2,
        }
    }
}

impl Wave {
    pub fn enemy_count(&self) -> u32 {
        self.small + self.medium + self.large
    }
}

/// Build an engine with the player at the origin and `wave` laid out around it.
pub fn build(config: SimConfig, wave: &Wave) -> SimulationEngine {
    let mut engine = SimulationEngine::new(config);
    engine.spawn_player(Position::new(0.0, 0.0));

    let classes = std::iter::repeat(ShipClass::Small)
        .take(wave.small as usize)
        .chain(std::iter::repeat(ShipClass::Medium).take(wave.medium as usize))
        .chain(std::iter::repeat(ShipClass::Large).take(wave.large as usize));
    let count = wave.enemy_count().max(1);
    let origin = Position::new(0.0, 0.0);
    for (i, class) in classes.enumerate() {
        let bearing = std::f64::consts::TAU * i as f64 / count as f64;
        engine.spawn_enemy(class, origin.offset(bearing, wave.ring_radius));
    }

    // Pickups sit on an inner ring, staggered from the enemies.
    let pickups = (wave.exp_gems + wave.shield_cells).max(1);
    for i in 0..wave.exp_gems + wave.shield_cells {
        let bearing = std::f64::consts::TAU * (i as f64 + 0.5) / pickups as f64;
        let at = origin.offset(bearing, wave.ring_radius * 0.4);
        if i < wave.exp_gems {
            engine.spawn_pickup(ExpGem::default(), at);
        } else {
            engine.spawn_pickup(ShieldCell { amount: 15.0 }, at);
        }
    }

    tracing::info!(
        enemies = wave.enemy_count(),
        pickups = wave.exp_gems + wave.shield_cells,
        "scenario ready"
    );
    engine
}

/// Aim at the nearest enemy and drift away from it. Returns nothing when the
/// field is empty or the player is gone.
pub fn autopilot(snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
    let Some(player) = &snapshot.player else {
        return Vec::new();
    };
    let nearest = snapshot
        .ships
        .iter()
        .map(|s| (player.position.range_to(&s.position), s))
        .min_by(|a, b| a.0.total_cmp(&b.0));
    let Some((range, ship)) = nearest else {
        return vec![PlayerCommand::SetThrust { x: 0.0, y: 0.0 }];
    };

    let toward = player.position.direction_to(&ship.position);
    let thrust = if range < 6.0 { -toward } else { toward * 0.3 };
    vec![
        PlayerCommand::SetAim {
            bearing: player.position.bearing_to(&ship.position),
        },
        PlayerCommand::SetThrust {
            x: thrust.x,
            y: thrust.y,
        },
    ]
}
