//! # Trajectory control orders

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An order that can be executed by trajectory control.
///
/// Orders are created by the mission logic, queued by motion control and consumed exactly once
/// when the trajectory state machine is idle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrajOrder {
    /// Drive straight by the given distance relative to the current linear position.
    ///
    /// Positive distances are "forwards", negative distances are "backwards".
    GoLinear {
        /// Units: meters
        distance_m: f64,
    },

    /// Rotate on the spot to the given absolute heading.
    GoAngular {
        /// Units: radians
        angle_rad: f64,
    },

    /// Turn towards the given point and then drive straight to it.
    GoToPoint {
        /// Units: meters
        x_m: f64,
        /// Units: meters
        y_m: f64,
    },

    /// Follow the given sequence of waypoints, `[x, y]` in meters.
    ///
    /// At most 10 points are accepted, longer paths are rejected by trajectory control.
    FollowPath { points_m: Vec<[f64; 2]> },

    /// Release the wheels (position servo disabled).
    Freewheel,

    /// Stop immediately.
    Stop,

    /// Hold the last setpoint given to the position servo.
    Keep,

    /// Combined linear and angular motion.
    ///
    /// This order is not implemented and never terminates on its own, it must not be issued by
    /// mission logic.
    CurvePlan,

    /// Calibrate the X axis and heading by backing into a table edge.
    StallX { mode: StallMode },

    /// Calibrate the Y axis and heading by backing into a table edge.
    StallY { mode: StallMode },
}

/// The table edge a calibration is performed against.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableEdge {
    /// The edge at the low end of the calibrated axis.
    Low,
    /// The edge at the high end of the calibrated axis.
    High,
}

/// The side of the robot brought into contact with the table edge.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RobotSide {
    Back,
    Front,
}

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Selects which table edge and which robot side are used for a contact calibration.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StallMode {
    pub edge: TableEdge,
    pub side: RobotSide,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for StallMode {
    fn default() -> Self {
        Self {
            edge: TableEdge::Low,
            side: RobotSide::Back,
        }
    }
}

impl TrajOrder {
    /// Short name of the order, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            TrajOrder::GoLinear { .. } => "GoLinear",
            TrajOrder::GoAngular { .. } => "GoAngular",
            TrajOrder::GoToPoint { .. } => "GoToPoint",
            TrajOrder::FollowPath { .. } => "FollowPath",
            TrajOrder::Freewheel => "Freewheel",
            TrajOrder::Stop => "Stop",
            TrajOrder::Keep => "Keep",
            TrajOrder::CurvePlan => "CurvePlan",
            TrajOrder::StallX { .. } => "StallX",
            TrajOrder::StallY { .. } => "StallY",
        }
    }
}
