//! # Motion control module
//!
//! Motion control is the periodic scheduler of the motion software. It is
//! ticked at the base period and divides that rate down to run:
//!
//! - the obstacle check, stopping the robot when the range sensor reports an
//!   obstruction and the safeguard is armed,
//! - trajectory control, feeding it the next queued order whenever it is
//!   idle,
//! - the position servo.
//!
//! Orders are submitted through a bounded queue which may be shared with
//! other threads via an [`OrderSender`]. The queue is the only state touched
//! from outside the tick, the status word being published to observers
//! through a [`StatusHandle`].
//!
//! While disabled no sub-schedule runs and the servo is released.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod queue;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

pub use params::Params;
pub use queue::{OrderQueue, OrderSender, QueueFull};
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Capacity of the order queue.
pub const ORDER_QUEUE_CAPACITY: usize = 10;

/// Status bit set while motion control is enabled.
pub const MOTION_STATUS_ENABLED: u16 = 1 << 0;

/// Status bit set while the obstacle safeguard is armed.
pub const MOTION_STATUS_SAFEGUARD: u16 = 1 << 1;

/// Status bit set while trajectory control is idle and ready for an order.
pub const MOTION_STATUS_TRAJ_IDLE: u16 = 1 << 8;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during MotionCtrl initialisation.
#[derive(Debug, thiserror::Error)]
pub enum MotionCtrlError {
    #[error("Could not load parameters: {0}")]
    ParamLoadError(util::params::LoadError),

    #[error("Could not initialise trajectory control: {0}")]
    TrajCtrlError(crate::traj_ctrl::TrajCtrlError),

    #[error(
        "The {name} period ({period_ms} ms) must be a non-zero multiple of \
        the base period ({base_period_ms} ms)"
    )]
    InvalidPeriod {
        name: &'static str,
        period_ms: u64,
        base_period_ms: u64,
    },
}
