//! Implementations for the TrajCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use nalgebra::Vector2;
use serde::Serialize;
use std::f64::consts::FRAC_PI_2;

// Internal
use super::{
    DrawPlanStep, LinearPlanStep, Mode, MoveStep, Params, StallStep, TrajCtrlError,
    WaypointBuffer, TRAJ_STATUS_ALIVE, TRAJ_STATUS_MOVING,
};
use crate::eqpt::{ContactSensors, PositionServo};
use crate::loc::Odometry;
use comms_if::tc::{StallMode, TrajOrder};
use util::maths::unwrap_near;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Trajectory control module state
#[derive(Debug, Default)]
pub struct TrajCtrl {
    pub(crate) params: Params,

    pub(crate) mode: Mode,

    /// Absolute linear target of the order.
    ///
    /// Units: meters
    pub(crate) linear_setpoint_m: f64,

    /// Absolute linear position of the targeted waypoint when following a
    /// path, excluding the remaining path segments.
    ///
    /// Units: meters
    pub(crate) next_linear_setpoint_m: f64,

    /// Absolute angular target of the order.
    ///
    /// Units: radians
    pub(crate) angular_setpoint_rad: f64,

    pub(crate) waypoints: WaypointBuffer,

    pub(crate) stall_mode: StallMode,

    /// Number of ticks spent in the current mode and step.
    pub(crate) step_ticks: u32,

    pub(crate) watchdog_tripped: bool,

    alive: bool,

    /// Period handed to the last tick.
    ///
    /// Units: seconds
    last_period_s: f64,
}

/// Status report for TrajCtrl processing.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct StatusReport {
    pub mode: Mode,
    pub step: u32,
    pub finished: bool,
    pub linear_setpoint_m: f64,
    pub angular_setpoint_rad: f64,

    /// Index of the targeted waypoint, only while following a path.
    pub waypoint_cursor: Option<usize>,

    /// Set if a polling step exceeded `max_poll_ticks` and the order was
    /// abandoned.
    pub watchdog_tripped: bool,

    /// Period of the last tick, as given by the scheduler.
    ///
    /// Units: seconds
    pub period_s: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajCtrl {
    /// Create a new instance from the given parameters, in the `Free` mode.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            ..Default::default()
        }
    }

    /// Initialise the module from a parameter file, relative to the params
    /// directory.
    pub fn init(params_path: &str) -> Result<Self, TrajCtrlError> {
        let params = util::params::load(params_path)
            .map_err(TrajCtrlError::ParamLoadError)?;

        Ok(Self::new(params))
    }

    /// Issue a new order, replacing any order currently in progress.
    ///
    /// Setpoints are computed from the pose at the time of the call and the
    /// machine restarts at the first step of the order's mode. A rejected
    /// order leaves the machine untouched.
    pub fn issue<O>(&mut self, order: TrajOrder, odom: &O) -> Result<(), TrajCtrlError>
    where
        O: Odometry + ?Sized
    {
        let pose = odom.pose();

        let mode = match order {
            TrajOrder::GoLinear { distance_m } => {
                self.linear_setpoint_m = pose.linear_m + distance_m;
                Mode::Linear(MoveStep::Push)
            }
            TrajOrder::GoAngular { angle_rad } => {
                self.angular_setpoint_rad = angle_rad;
                Mode::Angular(MoveStep::Push)
            }
            TrajOrder::GoToPoint { x_m, y_m } => {
                self.aim_at(Vector2::new(x_m, y_m), odom);
                Mode::LinearPlan(LinearPlanStep::PushRotate)
            }
            TrajOrder::FollowPath { points_m } => {
                // Validate before touching anything so a bad path is a no-op
                self.waypoints = WaypointBuffer::from_points(&points_m)?;
                self.update_waypoint_setpoints(odom);
                Mode::DrawPlan(DrawPlanStep::Start)
            }
            TrajOrder::Freewheel => Mode::Free,
            TrajOrder::Stop => Mode::Stop,
            TrajOrder::Keep => Mode::Keep,
            TrajOrder::CurvePlan => Mode::CurvePlan,
            TrajOrder::StallX { mode } => {
                self.stall_mode = mode;
                self.angular_setpoint_rad = unwrap_near(0.0, pose.heading_rad);
                Mode::StallX(StallStep::Rotate)
            }
            TrajOrder::StallY { mode } => {
                self.stall_mode = mode;
                self.angular_setpoint_rad = unwrap_near(FRAC_PI_2, pose.heading_rad);
                Mode::StallY(StallStep::Rotate)
            }
        };

        info!(
            "TrajCtrl: {} -> {} (lin: {:.3} m, ang: {:.3} rad)",
            self.mode.name(),
            mode.name(),
            self.linear_setpoint_m,
            self.angular_setpoint_rad
        );

        self.mode = mode;
        self.step_ticks = 0;
        self.watchdog_tripped = false;

        Ok(())
    }

    /// Run one period of trajectory control, executing a single step of the
    /// current mode.
    pub fn tick<P>(&mut self, period_s: f64, platform: &mut P) -> StatusReport
    where
        P: PositionServo + Odometry + ContactSensors + ?Sized
    {
        self.alive = true;
        self.last_period_s = period_s;

        let prev_mode = self.mode;

        trace!("TrajCtrl tick ({:.3} s) in {:?}", period_s, prev_mode);

        if !self.mode.is_idle() {
            platform.enable();
        }

        match self.mode {
            Mode::Free | Mode::Stop => platform.disable(),
            // The servo keeps tracking whatever it was last given
            Mode::Keep | Mode::CurvePlan => (),
            Mode::Linear(step) => self.calc_linear(step, platform),
            Mode::Angular(step) => self.calc_angular(step, platform),
            Mode::LinearPlan(step) => self.calc_linear_plan(step, platform),
            Mode::DrawPlan(step) => self.calc_draw_plan(step, platform),
            Mode::StallX(step) | Mode::StallY(step) => self.calc_stall(step, platform),
        }

        if self.mode == prev_mode {
            self.step_ticks = self.step_ticks.saturating_add(1);
        }
        else {
            debug!(
                "TrajCtrl: {:?} -> {:?} after {} tick(s)",
                prev_mode,
                self.mode,
                self.step_ticks + 1
            );
            self.step_ticks = 0;
        }

        self.report()
    }

    /// True if no order is in progress.
    pub fn is_finished(&self) -> bool {
        self.mode.is_idle()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The 1-based step number within the current mode.
    pub fn current_step(&self) -> u32 {
        self.mode.step()
    }

    pub fn linear_setpoint_m(&self) -> f64 {
        self.linear_setpoint_m
    }

    pub fn angular_setpoint_rad(&self) -> f64 {
        self.angular_setpoint_rad
    }

    /// The status word of trajectory control.
    ///
    /// - bit 0: ticked at least once
    /// - bit 8: an order is in progress
    pub fn status_bits(&self) -> u16 {
        let mut bits = 0;

        if self.alive {
            bits |= TRAJ_STATUS_ALIVE;
        }
        if !self.is_finished() {
            bits |= TRAJ_STATUS_MOVING;
        }

        bits
    }

    /// Build the status report for the current state.
    pub fn report(&self) -> StatusReport {
        StatusReport {
            mode: self.mode,
            step: self.mode.step(),
            finished: self.is_finished(),
            linear_setpoint_m: self.linear_setpoint_m,
            angular_setpoint_rad: self.angular_setpoint_rad,
            waypoint_cursor: match self.mode {
                Mode::DrawPlan(_) => Some(self.waypoints.cursor()),
                _ => None,
            },
            watchdog_tripped: self.watchdog_tripped,
            period_s: self.last_period_s,
        }
    }

    /// Point the setpoints at `target_m`: the angular setpoint takes the
    /// bearing of the target unwrapped around the current heading, the
    /// linear setpoint the current linear position plus the distance.
    ///
    /// Returns the linear position of the target.
    pub(crate) fn aim_at<O>(&mut self, target_m: Vector2<f64>, odom: &O) -> f64
    where
        O: Odometry + ?Sized
    {
        let pose = odom.pose();
        let (bearing_rad, dist_m) = crate::loc::bearing_dist(&pose.position_m, &target_m);

        // Already on the target, there's no bearing to speak of
        self.angular_setpoint_rad = if dist_m > f64::EPSILON {
            unwrap_near(bearing_rad, pose.heading_rad)
        }
        else {
            pose.heading_rad
        };
        self.linear_setpoint_m = pose.linear_m + dist_m;

        self.linear_setpoint_m
    }

    /// Wait for `done` in a polling step, moving to `next` once it is true.
    pub(crate) fn poll_until(&mut self, done: bool, next: Mode) {
        if done {
            self.mode = next;
        }
        else {
            self.check_watchdog();
        }
    }

    /// If the watchdog is enabled and the current step has been waiting for
    /// too long, abandon the order and stop.
    pub(crate) fn check_watchdog(&mut self) {
        let max_ticks = match self.params.max_poll_ticks {
            Some(m) => m,
            None => return,
        };

        if self.step_ticks >= max_ticks {
            warn!(
                "TrajCtrl: {} step {} still waiting after {} ticks, stopping",
                self.mode.name(),
                self.mode.step(),
                self.step_ticks
            );
            self.mode = Mode::Stop;
            self.watchdog_tripped = true;
        }
    }
}
