//! Simulated robot parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulated robot
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// Maximum forward or reverse speed.
    ///
    /// Units: meters/second
    pub max_linear_speed_ms: f64,

    /// Maximum turn rate.
    ///
    /// Units: radians/second
    pub max_angular_speed_rads: f64,

    /// Units: meters
    pub linear_tolerance_m: f64,

    /// Units: radians
    pub angular_tolerance_rad: f64,

    /// Heading error above which the robot turns on the spot before moving
    /// along its linear axis.
    ///
    /// Units: radians
    pub rotate_first_threshold_rad: f64,

    /// Maximum distance at which the range sensor detects an obstacle.
    ///
    /// Units: meters
    pub detection_range_m: f64,

    /// Half width of the range sensor's detection cone.
    ///
    /// Units: radians
    pub detection_half_angle_rad: f64,

    /// Point obstacles placed on the table at startup, as `[x, y]`.
    ///
    /// Units: meters
    #[serde(default)]
    pub obstacles_m: Vec<[f64; 2]>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            max_linear_speed_ms: 0.25,
            max_angular_speed_rads: 2.5,
            linear_tolerance_m: 0.005,
            angular_tolerance_rad: 0.01,
            rotate_first_threshold_rad: 0.2,
            detection_range_m: 0.3,
            detection_half_angle_rad: 0.5,
            obstacles_m: Vec::new(),
        }
    }
}
