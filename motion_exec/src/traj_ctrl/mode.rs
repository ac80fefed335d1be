//! Execution modes of trajectory control and their steps

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Serialize;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// The mode trajectory control is executing, together with the step reached
/// within that mode.
///
/// Modes without a step sequence (`Free`, `Stop`, `Keep`, `CurvePlan`) always
/// report step 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Servo disabled, wheels released. The initial mode.
    Free,

    /// Straight line move.
    Linear(MoveStep),

    /// Rotation on the spot.
    Angular(MoveStep),

    /// Servo disabled following a stop order.
    Stop,

    /// Servo left tracking its last setpoints.
    Keep,

    /// Rotate towards a point then drive to it.
    LinearPlan(LinearPlanStep),

    /// Combined linear and angular motion. Not implemented, never exits.
    CurvePlan,

    /// Contact calibration of the X axis.
    StallX(StallStep),

    /// Contact calibration of the Y axis.
    StallY(StallStep),

    /// Waypoint path following.
    DrawPlan(DrawPlanStep),
}

/// Steps of the simple `Linear` and `Angular` moves.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum MoveStep {
    /// Send the setpoints to the servo
    Push,
    /// Wait for the servo to arrive
    Poll,
}

/// Steps of the `LinearPlan` move.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum LinearPlanStep {
    PushRotate,
    PollRotate,
    /// Single tick pause between the rotation and the translation
    Settle,
    PushDrive,
    PollDrive,
}

/// Steps of the stall calibrations.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum StallStep {
    /// Rotate to the calibration heading
    Rotate,
    /// Back into the table edge until both contacts engage
    Contact,
    /// Overwrite the odometry with the known edge position
    Rebase,
}

/// Steps of the `DrawPlan` path following.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub enum DrawPlanStep {
    /// Reset the cursor to the first waypoint
    Start,
    /// Heading for an intermediate waypoint
    Follow,
    /// Heading for the final waypoint
    LastWaypoint,
    /// Final waypoint reached
    Finishing,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Mode {
    /// True if the mode is idle, i.e. a new order can be issued without
    /// interrupting a manoeuvre.
    pub fn is_idle(&self) -> bool {
        matches!(self, Mode::Free | Mode::Stop)
    }

    /// The 1-based step number within the mode.
    pub fn step(&self) -> u32 {
        match self {
            Mode::Free | Mode::Stop | Mode::Keep | Mode::CurvePlan => 1,
            Mode::Linear(s) | Mode::Angular(s) => match s {
                MoveStep::Push => 1,
                MoveStep::Poll => 2,
            },
            Mode::LinearPlan(s) => match s {
                LinearPlanStep::PushRotate => 1,
                LinearPlanStep::PollRotate => 2,
                LinearPlanStep::Settle => 3,
                LinearPlanStep::PushDrive => 4,
                LinearPlanStep::PollDrive => 5,
            },
            Mode::StallX(s) | Mode::StallY(s) => match s {
                StallStep::Rotate => 1,
                StallStep::Contact => 2,
                StallStep::Rebase => 3,
            },
            Mode::DrawPlan(s) => match s {
                DrawPlanStep::Start => 1,
                DrawPlanStep::Follow => 2,
                DrawPlanStep::LastWaypoint => 3,
                DrawPlanStep::Finishing => 4,
            },
        }
    }

    /// Name of the mode without its step, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Free => "Free",
            Mode::Linear(_) => "Linear",
            Mode::Angular(_) => "Angular",
            Mode::Stop => "Stop",
            Mode::Keep => "Keep",
            Mode::LinearPlan(_) => "LinearPlan",
            Mode::CurvePlan => "CurvePlan",
            Mode::StallX(_) => "StallX",
            Mode::StallY(_) => "StallY",
            Mode::DrawPlan(_) => "DrawPlan",
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Free
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_idle_modes() {
        assert!(Mode::Free.is_idle());
        assert!(Mode::Stop.is_idle());
        assert!(!Mode::Keep.is_idle());
        assert!(!Mode::CurvePlan.is_idle());
        assert!(!Mode::Linear(MoveStep::Poll).is_idle());
        assert!(!Mode::DrawPlan(DrawPlanStep::Finishing).is_idle());
    }

    #[test]
    fn test_step_numbers() {
        assert_eq!(Mode::Linear(MoveStep::Push).step(), 1);
        assert_eq!(Mode::Angular(MoveStep::Poll).step(), 2);
        assert_eq!(Mode::LinearPlan(LinearPlanStep::Settle).step(), 3);
        assert_eq!(Mode::LinearPlan(LinearPlanStep::PollDrive).step(), 5);
        assert_eq!(Mode::StallY(StallStep::Rebase).step(), 3);
        assert_eq!(Mode::DrawPlan(DrawPlanStep::LastWaypoint).step(), 3);
        assert_eq!(Mode::Keep.step(), 1);
    }
}
