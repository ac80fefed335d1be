//! # Equipment interfaces
//!
//! Contracts for the equipment motion control drives or reads. The position
//! servo, range sensor and contact sensors are provided by the platform, the
//! odometry contract lives in [`crate::loc`].

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::loc::Odometry;

// ---------------------------------------------------------------------------
// TRAITS
// ---------------------------------------------------------------------------

/// A closed loop position servo on the linear and angular axes.
///
/// Targets are absolute, linear in the odometry's cumulative distance and
/// angular in the odometry's (unwrapped) heading. The servo owns the velocity
/// and acceleration profiles used to reach them.
pub trait PositionServo {
    /// Set the absolute linear target.
    ///
    /// Units: meters
    fn set_linear_target(&mut self, linear_m: f64);

    /// Set the absolute angular target.
    ///
    /// Units: radians
    fn set_angular_target(&mut self, angle_rad: f64);

    /// Enable the servo, the wheels are driven towards the targets.
    fn enable(&mut self);

    /// Disable the servo, the wheels are released.
    fn disable(&mut self);

    /// True once both targets have been reached.
    fn has_arrived(&self) -> bool;

    /// Run one servo control period.
    ///
    /// Units: seconds
    fn tick(&mut self, period_s: f64);
}

/// A forward facing range sensor.
pub trait RangeSensor {
    /// True if an obstacle is detected in front of the robot.
    fn obstructed(&self) -> bool;
}

/// The pair of contact switches on the side of the robot pushed against the
/// table edge during a stall calibration.
pub trait ContactSensors {
    /// State of the (left, right) contacts.
    ///
    /// The switches are not wired on current hardware, so unless a platform
    /// overrides this both are reported engaged.
    fn rear_contacts(&self) -> (bool, bool) {
        (true, true)
    }
}

/// Everything motion control needs from the robot.
pub trait Platform: PositionServo + Odometry + RangeSensor + ContactSensors {}

impl<T> Platform for T where T: PositionServo + Odometry + RangeSensor + ContactSensors {}
