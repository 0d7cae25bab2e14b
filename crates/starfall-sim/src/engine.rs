//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs the logic pass and the fixed-rate physics steps, and produces
//! `GameStateSnapshot`s. Completely headless, enabling deterministic testing.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starfall_core::commands::PlayerCommand;
use starfall_core::components::*;
use starfall_core::config::GameConfig;
use starfall_core::constants::{DT, MAX_PHYSICS_STEPS_PER_UPDATE, PHYSICS_DT};
use starfall_core::enums::{GamePhase, ShipClass};
use starfall_core::events::SimEvent;
use starfall_core::state::GameStateSnapshot;
use starfall_core::types::{Position, SimTime};

use crate::pickups::Collectible;
use crate::slots::{select_slot, SelectOutcome};
use crate::systems;
use crate::systems::collisions::Impact;
use crate::systems::combat::CombatContext;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Multiplier on every frame delta (1.0 = normal).
    pub time_scale: f64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            game: GameConfig::default(),
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    config: GameConfig,
    player: Option<Entity>,
    next_ship_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<Entity>,
    impacts: Vec<Impact>,
    events: Vec<SimEvent>,
    physics_accumulator: f64,
}

impl SimulationEngine {
    /// Create a new simulation engine. Configuration issues are logged, never fatal.
    pub fn new(config: SimConfig) -> Self {
        for issue in config.game.validate() {
            tracing::warn!(%issue, "game config issue");
        }

        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: config.time_scale.max(0.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            config: config.game,
            player: None,
            next_ship_id: 0,
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            impacts: Vec::new(),
            events: Vec::new(),
            physics_accumulator: 0.0,
        }
    }

    /// Spawn the player ship. Only one player exists; a second call returns the first.
    pub fn spawn_player(&mut self, position: Position) -> Entity {
        if let Some(player) = self.player.filter(|p| self.world.contains(*p)) {
            tracing::warn!("player already spawned");
            return player;
        }
        let id = self.allocate_ship_id();
        let player = world_setup::spawn_player(&mut self.world, &self.config, id, position);
        self.player = Some(player);
        player
    }

    /// Spawn an enemy of `class`, nose pointed at the player if there is one.
    pub fn spawn_enemy(&mut self, class: ShipClass, position: Position) -> Entity {
        let heading = self
            .player_position()
            .map_or(0.0, |player| position.bearing_to(&player));
        let id = self.allocate_ship_id();
        tracing::debug!(ship = id, ?class, "enemy spawned");
        world_setup::spawn_enemy(&mut self.world, &self.config, id, class, position, heading)
    }

    /// Drop a collectible into the world.
    pub fn spawn_pickup(&mut self, collectible: impl Collectible + 'static, position: Position) -> Entity {
        world_setup::spawn_pickup(&mut self.world, collectible, position)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one nominal tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        self.update(DT)
    }

    /// Advance by a frame of `frame_dt` seconds: one logic pass, then as many
    /// fixed physics steps as the accumulated time allows.
    pub fn update(&mut self, frame_dt: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let dt = (frame_dt * self.time_scale).max(0.0);
            self.run_logic(dt);
            self.time.advance(dt);
            self.run_physics(dt);
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, self.player, events)
    }

    /// Current state without advancing. Carries no events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.world, &self.time, self.phase, self.player, Vec::new())
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// The player entity, while it exists.
    pub fn player(&self) -> Option<Entity> {
        self.player.filter(|p| self.world.contains(*p))
    }

    pub fn player_vitals(&self) -> Option<Vitals> {
        let player = self.player()?;
        self.world.get::<&Vitals>(player).ok().map(|v| (*v).clone())
    }

    pub fn player_ledger(&self) -> Option<ProgressionLedger> {
        let player = self.player()?;
        self.world
            .get::<&ProgressionLedger>(player)
            .ok()
            .map(|l| (*l).clone())
    }

    pub fn player_armament(&self) -> Option<Armament> {
        let player = self.player()?;
        self.world.get::<&Armament>(player).ok().map(|a| (*a).clone())
    }

    /// Put a projectile straight into the world (for tests needing exact hits).
    #[cfg(test)]
    pub fn spawn_test_projectile(
        &mut self,
        owner: Entity,
        position: Position,
        velocity: starfall_core::types::Velocity,
        damage: f64,
    ) -> Entity {
        let owner_faction = self
            .world
            .get::<&starfall_core::enums::Faction>(owner)
            .map(|f| *f)
            .unwrap_or(starfall_core::enums::Faction::Hostile);
        self.world.spawn((
            Projectile {
                owner,
                owner_faction,
                base_damage: damage,
                damage,
                remaining_lifetime: starfall_core::constants::PROJECTILE_LIFETIME,
                radius: starfall_core::constants::PROJECTILE_RADIUS,
                spent: false,
            },
            position,
            velocity,
        ))
    }

    /// Mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn allocate_ship_id(&mut self) -> u32 {
        self.next_ship_id += 1;
        self.next_ship_id
    }

    fn player_position(&self) -> Option<Position> {
        let player = self.player()?;
        if self.world.get::<&Vitals>(player).is_ok_and(|v| v.dead) {
            return None;
        }
        self.world.get::<&Position>(player).ok().map(|p| *p)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                    tracing::info!("simulation paused");
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                    tracing::info!("simulation resumed");
                }
            }
            PlayerCommand::SetThrust { x, y } => {
                let Some(intent) = self.player_component_mut::<MotionIntent>() else {
                    return;
                };
                let direction = glam::DVec2::new(x, y);
                intent.drive = if direction.is_finite() && direction.length_squared() > f64::EPSILON {
                    Drive::Thrust(direction.normalize())
                } else {
                    Drive::Coast
                };
            }
            PlayerCommand::SetAim { bearing } => {
                if !bearing.is_finite() {
                    tracing::warn!(bearing, "ignoring non-finite aim bearing");
                    return;
                }
                if let Some(intent) = self.player_component_mut::<MotionIntent>() {
                    intent.face_bearing = Some(bearing.rem_euclid(std::f64::consts::TAU));
                }
            }
            PlayerCommand::SetTrigger { held } => {
                if let Some(trigger) = self.player_component_mut::<Trigger>() {
                    trigger.held = held;
                }
            }
            PlayerCommand::SelectWeaponSlot { index } => self.select_weapon_slot(index),
        }
    }

    fn player_component_mut<T: hecs::Component>(&mut self) -> Option<&mut T> {
        let player = self.player()?;
        self.world.query_one_mut::<&mut T>(player).ok()
    }

    fn select_weapon_slot(&mut self, index: usize) {
        let Some(player) = self.player() else {
            return;
        };
        let Ok((ledger, armament)) = self
            .world
            .query_one_mut::<(&ProgressionLedger, &mut Armament)>(player)
        else {
            return;
        };
        match select_slot(armament, index, ledger.level) {
            SelectOutcome::Selected { .. } => self.events.push(SimEvent::SlotSelected { slot: index }),
            SelectOutcome::Locked { required_level } => self.events.push(SimEvent::SlotLocked {
                slot: index,
                required_level,
            }),
            SelectOutcome::AlreadyActive | SelectOutcome::OutOfRange => {}
        }
    }

    /// Run the logic pass in order.
    fn run_logic(&mut self, dt: f64) {
        let now = self.time.elapsed_secs;
        let player_position = self.player_position();

        // 1. Enemy behavior (motion intents, trigger pulses)
        systems::behavior::run(
            &mut self.world,
            player_position,
            now,
            dt,
            &mut self.rng,
            &mut self.events,
        );
        // 2. Shield regeneration
        systems::vitals::run(&mut self.world, dt, now);
        // 3. Targeting and fire
        systems::weapons::run(
            &mut self.world,
            now,
            self.config.targeting.policy,
            &mut self.events,
        );
        // 4. Projectile lifetimes
        systems::projectiles::run(&mut self.world, dt);
        // 5. Impacts → damage → death → reward
        let ctx = CombatContext {
            rewards: &self.config.progression.rewards,
            scaling: &self.config.progression.scaling,
            now,
        };
        systems::combat::run(&mut self.world, &mut self.impacts, &ctx, &mut self.events);
        // 6. Pickups
        systems::pickups::run(
            &mut self.world,
            &self.config.progression.scaling,
            &mut self.events,
        );
        // 7. Player death ends the game
        self.check_game_over();
        // 8. Despawn destroyed entities and invalidate references to them
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events);
    }

    /// Run fixed physics steps for the time accumulated since the last update.
    fn run_physics(&mut self, dt: f64) {
        self.physics_accumulator += dt;
        let mut steps = 0;
        while self.physics_accumulator >= PHYSICS_DT && steps < MAX_PHYSICS_STEPS_PER_UPDATE {
            systems::movement::run(&mut self.world, PHYSICS_DT);
            systems::collisions::detect(&self.world, &mut self.impacts);
            self.physics_accumulator -= PHYSICS_DT;
            steps += 1;
        }
        if self.physics_accumulator >= PHYSICS_DT {
            tracing::debug!(
                backlog = self.physics_accumulator,
                "physics falling behind; dropping accumulated time"
            );
            self.physics_accumulator = 0.0;
        }
    }

    fn check_game_over(&mut self) {
        let Some(player) = self.player() else {
            return;
        };
        if self.world.get::<&Vitals>(player).is_ok_and(|v| v.dead) {
            tracing::info!(tick = self.time.tick, "player destroyed; game over");
            self.phase = GamePhase::GameOver;
        }
    }
}
