//! Trajectory control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for trajectory control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// Distance under which a path waypoint is considered reached.
    ///
    /// Units: meters
    pub waypoint_tolerance_m: f64,

    /// Linear distance driven towards the table edge while waiting for the
    /// rear contacts during a stall calibration. Negative values reverse.
    ///
    /// Units: meters
    pub stall_approach_m: f64,

    /// Maximum number of ticks a polling step may wait for the servo or the
    /// contacts before the order is abandoned and the robot stopped.
    ///
    /// When absent the machine waits forever.
    #[serde(default)]
    pub max_poll_ticks: Option<u32>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Self {
            waypoint_tolerance_m: 0.1,
            stall_approach_m: -0.2,
            max_poll_ticks: None
        }
    }
}
