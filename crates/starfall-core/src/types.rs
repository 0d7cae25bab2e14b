//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position in world units.
/// x = right, y = up. Bearings are measured from +y, clockwise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity in world units per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Facing of a body as a bearing in radians (0 = +y, clockwise).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Heading(pub f64);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of logic ticks run so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds. This is the "now" every timer compares against.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Straight-line distance to another position.
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Bearing to another position in radians (0 = +y, clockwise).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx.atan2(dy).rem_euclid(std::f64::consts::TAU)
    }

    /// Unit vector pointing at `other`, or zero when the points coincide.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.as_dvec2() - self.as_dvec2()).normalize_or_zero()
    }

    /// Position offset along a bearing.
    pub fn offset(&self, bearing: f64, distance: f64) -> Position {
        Position::from_dvec2(self.as_dvec2() + unit_from_bearing(bearing) * distance)
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_dvec2(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn from_dvec2(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }

    /// Speed magnitude.
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Direction of travel as a bearing (0 = +y, clockwise).
    pub fn heading(&self) -> f64 {
        self.x.atan2(self.y).rem_euclid(std::f64::consts::TAU)
    }
}

impl Heading {
    /// Unit forward axis for this heading.
    pub fn forward(&self) -> DVec2 {
        unit_from_bearing(self.0)
    }
}

impl SimTime {
    /// Advance the clock by one logic tick of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Unit vector for a bearing (0 = +y, clockwise).
pub fn unit_from_bearing(bearing: f64) -> DVec2 {
    DVec2::new(bearing.sin(), bearing.cos())
}

/// Bearing of a direction vector (0 = +y, clockwise).
pub fn bearing_of(v: DVec2) -> f64 {
    v.x.atan2(v.y).rem_euclid(std::f64::consts::TAU)
}

/// Smallest signed difference `to - from`, wrapped to (-PI, PI].
pub fn angle_delta(from: f64, to: f64) -> f64 {
    let d = (to - from).rem_euclid(std::f64::consts::TAU);
    if d > std::f64::consts::PI {
        d - std::f64::consts::TAU
    } else {
        d
    }
}
