//! State shared between the driver and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use serde::Serialize;

use starfall_core::commands::PlayerCommand;
use starfall_core::enums::GamePhase;
use starfall_core::events::SimEvent;
use starfall_core::state::GameStateSnapshot;

/// Commands sent from the driver to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Handle to a running game loop thread.
pub struct LoopHandle {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: SharedSnapshot,
    pub join: std::thread::JoinHandle<RunSummary>,
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StopReason {
    PlayerDestroyed,
    FieldCleared,
    TickLimit,
    Shutdown,
}

/// Running totals kept while the loop ticks. Printed as JSON at the end.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub phase: GamePhase,
    pub stop_reason: StopReason,
    pub kills: u32,
    pub shots_fired: u32,
    pub xp_earned: f64,
    pub level: u32,
    pub player_health: f64,
    pub enemies_remaining: usize,
    pub reward_anomalies: u32,
}

impl Default for RunSummary {
    fn default() -> Self {
        Self {
            ticks: 0,
            elapsed_secs: 0.0,
            phase: GamePhase::Active,
            stop_reason: StopReason::TickLimit,
            kills: 0,
            shots_fired: 0,
            xp_earned: 0.0,
            level: 1,
            player_health: 0.0,
            enemies_remaining: 0,
            reward_anomalies: 0,
        }
    }
}

impl RunSummary {
    /// Fold one snapshot into the totals.
    pub fn record(&mut self, snapshot: &GameStateSnapshot, player_ship: Option<u32>) {
        self.ticks = snapshot.time.tick;
        self.elapsed_secs = snapshot.time.elapsed_secs;
        self.phase = snapshot.phase;
        self.enemies_remaining = snapshot.ships.len();
        if let Some(player) = &snapshot.player {
            self.level = player.level;
            self.player_health = player.health;
        }

        for event in &snapshot.events {
            match event {
                SimEvent::ShipDestroyed { ship, .. } if Some(*ship) != player_ship => self.kills += 1,
                SimEvent::WeaponFired { ship, .. } if Some(*ship) == player_ship => self.shots_fired += 1,
                SimEvent::XpAwarded { amount, .. } => self.xp_earned += amount,
                SimEvent::RewardAnomaly { .. } => self.reward_anomalies += 1,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starfall_core::state::PlayerView;
    use starfall_core::types::SimTime;

    #[test]
    fn test_summary_counts_player_events_only() {
        let snapshot = GameStateSnapshot {
            time: SimTime {
                tick: 12,
                elapsed_secs: 0.2,
            },
            player: Some(PlayerView {
                ship: 1,
                level: 2,
                health: 80.0,
                ..Default::default()
            }),
            events: vec![
                SimEvent::WeaponFired {
                    ship: 1,
                    slot: 0,
                    damage: 10.0,
                },
                SimEvent::WeaponFired {
                    ship: 2,
                    slot: 0,
                    damage: 10.0,
                },
                SimEvent::ShipDestroyed {
                    ship: 2,
                    tag: "SmallEnemy".into(),
                },
                SimEvent::XpAwarded {
                    amount: 10.0,
                    source: "SmallEnemy".into(),
                },
            ],
            ..Default::default()
        };

        let mut summary = RunSummary::default();
        summary.record(&snapshot, Some(1));

        assert_eq!(summary.ticks, 12);
        assert_eq!(summary.shots_fired, 1);
        assert_eq!(summary.kills, 1);
        assert_eq!(summary.xp_earned, 10.0);
        assert_eq!(summary.level, 2);
        assert_eq!(summary.player_health, 80.0);
    }

    #[test]
    fn test_player_death_is_not_a_kill() {
        let snapshot = GameStateSnapshot {
            events: vec![SimEvent::ShipDestroyed {
                ship: 1,
                tag: "Player".into(),
            }],
            ..Default::default()
        };
        let mut summary = RunSummary::default();
        summary.record(&snapshot, Some(1));
        assert_eq!(summary.kills, 0);
    }
}
