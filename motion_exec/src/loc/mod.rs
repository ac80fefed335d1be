//! # Localisation module
//!
//! This module defines the pose of the robot as reported by the odometry
//! provider, the odometry contract itself, and the geometry helpers used to
//! turn target points into bearings and distances.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The current pose of the robot on the table.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// The position on the table.
    ///
    /// Units: meters
    pub position_m: Vector2<f64>,

    /// The heading (angle to the positive X axis). This is not wrapped, a
    /// robot having turned twice on the spot reports a heading of 4pi.
    ///
    /// Units: radians
    pub heading_rad: f64,

    /// The cumulative signed distance travelled along the robot's forward
    /// axis.
    ///
    /// Units: meters
    pub linear_m: f64,
}

/// A partial overwrite of the odometry's pose. Fields left as `None` keep
/// their current value.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PoseRebase {
    pub x_m: Option<f64>,
    pub y_m: Option<f64>,
    pub heading_rad: Option<f64>,
}

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// An odometry provider.
pub trait Odometry {
    /// Get the current pose of the robot.
    fn pose(&self) -> Pose;

    /// Overwrite some of the fields of the current pose with known values,
    /// for instance after a contact calibration.
    fn rebase(&mut self, rebase: PoseRebase);
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pose {
    /// Build a new pose from its components.
    pub fn new(x_m: f64, y_m: f64, heading_rad: f64, linear_m: f64) -> Self {
        Self {
            position_m: Vector2::new(x_m, y_m),
            heading_rad,
            linear_m,
        }
    }

    pub fn x_m(&self) -> f64 {
        self.position_m[0]
    }

    pub fn y_m(&self) -> f64 {
        self.position_m[1]
    }

    /// Apply a rebase to this pose.
    pub fn apply_rebase(&mut self, rebase: &PoseRebase) {
        if let Some(x) = rebase.x_m {
            self.position_m[0] = x;
        }
        if let Some(y) = rebase.y_m {
            self.position_m[1] = y;
        }
        if let Some(h) = rebase.heading_rad {
            self.heading_rad = h;
        }
    }
}

impl PoseRebase {
    /// Rebase the X coordinate and the heading, keeping Y.
    pub fn x_heading(x_m: f64, heading_rad: f64) -> Self {
        Self {
            x_m: Some(x_m),
            y_m: None,
            heading_rad: Some(heading_rad),
        }
    }

    /// Rebase the Y coordinate and the heading, keeping X.
    pub fn y_heading(y_m: f64, heading_rad: f64) -> Self {
        Self {
            x_m: None,
            y_m: Some(y_m),
            heading_rad: Some(heading_rad),
        }
    }
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Get the bearing (angle to the positive X axis, in (-pi, pi]) and the
/// straight line distance from `from` to `to`.
pub fn bearing_dist(from: &Vector2<f64>, to: &Vector2<f64>) -> (f64, f64) {
    let diff = to - from;

    (diff[1].atan2(diff[0]), diff.norm())
}
