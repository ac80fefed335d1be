//! # Trajectory control module
//!
//! Trajectory control decomposes trajectory orders (go straight, rotate, go
//! to a point, follow a path, calibrate against a table edge) into the
//! absolute linear and angular setpoints handed to the position servo.
//!
//! Every order runs as a short sequence of steps, one step being executed per
//! call to `tick`. Simple orders (`Linear`, `Angular`) push their setpoints to
//! the servo and then poll it until it reports arrival. Compound orders are
//! built by chaining these same push and poll steps:
//!
//! - `LinearPlan` (go to point) first rotates towards the bearing of the
//!   target then drives the distance to it.
//! - `DrawPlan` (follow path) re-aims at the current waypoint every tick and
//!   moves the cursor on once the waypoint is within tolerance. The linear
//!   setpoint includes the length of all the remaining path segments, so the
//!   servo sees a single distance to cover rather than stopping at each
//!   waypoint. Sharp corners still cause a slow down while the robot turns,
//!   as the angular setpoint is not blended between segments.
//! - `StallX` and `StallY` rotate to a known heading, back into the table
//!   edge until both rear contacts engage and then rebase the odometry.
//!
//! The machine is idle (finished) when in `Free` or `Stop`. There is no
//! timeout on arrival unless the optional `max_poll_ticks` watchdog is set in
//! the parameters.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_draw_plan;
mod calc_linear_plan;
mod calc_simple;
mod calc_stall;
mod mode;
mod params;
mod state;
mod waypoints;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use mode::*;
pub use params::Params;
pub use state::*;
pub use waypoints::WaypointBuffer;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The maximum number of points in a followed path.
pub const MAX_WAYPOINTS: usize = 10;

/// Status bit set once trajectory control has been ticked.
pub const TRAJ_STATUS_ALIVE: u16 = 1 << 0;

/// Status bit set while an order is being executed.
pub const TRAJ_STATUS_MOVING: u16 = 1 << 8;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during TrajCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum TrajCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    /// The path in a `FollowPath` order is empty or longer than
    /// `MAX_WAYPOINTS`. The order is discarded.
    #[error("A path must contain between 1 and 10 points, found {0}")]
    InvalidWaypointCount(usize),
}
