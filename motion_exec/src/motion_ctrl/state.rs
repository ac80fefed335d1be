//! Implementations for the MotionCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::sync::{
    atomic::{AtomicU16, Ordering},
    Arc,
};

// Internal
use super::{
    MotionCtrlError, OrderQueue, OrderSender, Params, QueueFull, MOTION_STATUS_ENABLED,
    MOTION_STATUS_SAFEGUARD, MOTION_STATUS_TRAJ_IDLE,
};
use crate::eqpt::Platform;
use crate::traj_ctrl::{self, Mode, TrajCtrl};
use comms_if::tc::TrajOrder;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Motion control module state
pub struct MotionCtrl<P: Platform> {
    params: Params,

    platform: P,

    traj_ctrl: TrajCtrl,

    queue: OrderQueue,

    enabled: bool,
    safeguard: bool,

    /// Time accumulated over the enabled and disabled ticks, used to divide
    /// the base rate.
    ///
    /// Units: milliseconds
    elapsed_ms: u64,

    /// Set while the last obstacle check found an obstruction.
    obstacle_latched: bool,

    status: StatusHandle,
}

/// A read-only, thread safe view of the motion control status word.
#[derive(Debug, Clone, Default)]
pub struct StatusHandle(Arc<AtomicU16>);

/// Status report for MotionCtrl processing.
#[derive(Clone, Debug, Default, Serialize)]
pub struct StatusReport {
    /// The status word at the end of the tick.
    pub status_word: u16,

    /// Units: milliseconds
    pub elapsed_ms: u64,

    /// Order taken from the queue and issued on this tick.
    pub dispatched: Option<TrajOrder>,

    /// The dispatched order was rejected by trajectory control.
    pub dispatch_rejected: bool,

    /// An obstruction was detected on this tick and the robot stopped.
    pub obstacle_stop: bool,

    /// Trajectory control report, if it ran on this tick.
    pub traj: Option<traj_ctrl::StatusReport>,

    /// True if the position servo ran on this tick.
    pub servo_ticked: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl<P: Platform> MotionCtrl<P> {
    /// Create a new instance driving the given platform.
    pub fn new(
        params: Params,
        traj_ctrl: TrajCtrl,
        platform: P,
    ) -> Result<Self, MotionCtrlError> {
        params.validate()?;

        let mut mc = Self {
            enabled: false,
            safeguard: params.safeguard_on_start,
            params,
            platform,
            traj_ctrl,
            queue: OrderQueue::new(),
            elapsed_ms: 0,
            obstacle_latched: false,
            status: StatusHandle::default(),
        };

        let enable = mc.params.enable_on_start;
        let safeguard = mc.params.safeguard_on_start;
        mc.configure(enable, safeguard);

        // The platform may have come up with its servo powered
        if !enable {
            mc.platform.disable();
        }

        Ok(mc)
    }

    /// Initialise the module from the motion control and trajectory control
    /// parameter files, relative to the params directory.
    pub fn init(
        params_path: &str,
        traj_params_path: &str,
        platform: P,
    ) -> Result<Self, MotionCtrlError> {
        let params = util::params::load(params_path)
            .map_err(MotionCtrlError::ParamLoadError)?;
        let traj_ctrl = TrajCtrl::init(traj_params_path)
            .map_err(MotionCtrlError::TrajCtrlError)?;

        Self::new(params, traj_ctrl, platform)
    }

    /// Set the operating flags.
    ///
    /// Disabling releases the servo at once and suspends every sub-schedule
    /// until re-enabled. Re-enabling only powers the servo back up if an
    /// order is in progress, an idle robot stays released until trajectory
    /// control next drives it.
    pub fn configure(&mut self, enable: bool, safeguard: bool) {
        if enable != self.enabled {
            if enable {
                info!("MotionCtrl enabled");
                if !self.traj_ctrl.is_finished() {
                    self.platform.enable();
                }
            }
            else {
                info!("MotionCtrl disabled");
                self.platform.disable();
            }
        }

        if safeguard != self.safeguard {
            info!(
                "MotionCtrl safeguard {}",
                if safeguard { "armed" } else { "disarmed" }
            );
        }

        self.enabled = enable;
        self.safeguard = safeguard;

        // Clear any stale obstruction so it is re-evaluated on the next check
        if !safeguard {
            self.obstacle_latched = false;
        }

        self.publish_status();
    }

    /// Queue an order for trajectory control.
    pub fn submit(&self, order: TrajOrder) -> Result<(), QueueFull> {
        self.queue.push(order)
    }

    /// Get a producer handle on the order queue for use in other threads.
    pub fn order_sender(&self) -> OrderSender {
        self.queue.sender()
    }

    /// Get a handle on the status word for use in other threads.
    pub fn status_handle(&self) -> StatusHandle {
        self.status.clone()
    }

    /// Run one base period of motion control.
    ///
    /// `period_s` is the time elapsed since the last tick. Sub-schedules are
    /// handed this period scaled by the ratio of their period to the base
    /// period.
    pub fn tick(&mut self, period_s: f64) -> StatusReport {
        let mut report = StatusReport::default();

        self.publish_status();

        self.elapsed_ms = self.elapsed_ms.wrapping_add(self.params.base_period_ms);
        report.elapsed_ms = self.elapsed_ms;

        if !self.enabled {
            report.status_word = self.status_word();
            return report;
        }

        // Obstacle check
        if self.is_due(self.params.obstacle_period_ms) && self.safeguard {
            report.obstacle_stop = self.check_obstacle();
        }

        // Trajectory control
        if self.is_due(self.params.traj_period_ms) {
            if self.traj_ctrl.is_finished() && !self.obstacle_latched {
                if let Some(order) = self.queue.pop() {
                    debug!("MotionCtrl dispatching {:?}", order);
                    report.dispatched = Some(order.clone());

                    if let Err(e) = self.traj_ctrl.issue(order, &self.platform) {
                        warn!("Order rejected by TrajCtrl: {}", e);
                        report.dispatch_rejected = true;
                    }
                }
            }

            let traj_period_s = self.scaled_period_s(period_s, self.params.traj_period_ms);
            report.traj = Some(self.traj_ctrl.tick(traj_period_s, &mut self.platform));
        }

        // Position servo
        if self.is_due(self.params.servo_period_ms) {
            let servo_period_s = self.scaled_period_s(period_s, self.params.servo_period_ms);
            self.platform.tick(servo_period_s);
            report.servo_ticked = true;
        }

        self.publish_status();
        report.status_word = self.status_word();

        trace!("MotionCtrl report: {:?}", report);

        report
    }

    /// The status word.
    ///
    /// - bit 0: enabled
    /// - bit 1: safeguard armed
    /// - bit 8: trajectory control idle
    pub fn status_word(&self) -> u16 {
        let mut word = 0;

        if self.enabled {
            word |= MOTION_STATUS_ENABLED;
        }
        if self.safeguard {
            word |= MOTION_STATUS_SAFEGUARD;
        }
        if self.traj_ctrl.is_finished() {
            word |= MOTION_STATUS_TRAJ_IDLE;
        }

        word
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_safeguarded(&self) -> bool {
        self.safeguard
    }

    /// True while the last obstacle check found an obstruction.
    pub fn is_obstructed(&self) -> bool {
        self.obstacle_latched
    }

    pub fn traj_ctrl(&self) -> &TrajCtrl {
        &self.traj_ctrl
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Number of orders waiting in the queue.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    fn is_due(&self, period_ms: u64) -> bool {
        self.elapsed_ms % period_ms == 0
    }

    fn scaled_period_s(&self, period_s: f64, sub_period_ms: u64) -> f64 {
        period_s * sub_period_ms as f64 / self.params.base_period_ms as f64
    }

    /// Stop the robot if an obstacle is in the way. Returns true if a stop
    /// was issued.
    fn check_obstacle(&mut self) -> bool {
        let obstructed = self.platform.obstructed();

        if obstructed && !self.obstacle_latched {
            warn!(
                "Obstacle detected, stopping (was in {})",
                self.traj_ctrl.mode().name()
            );
        }
        else if !obstructed && self.obstacle_latched {
            info!("Obstacle cleared");
        }

        self.obstacle_latched = obstructed;

        if obstructed && self.traj_ctrl.mode() != Mode::Stop {
            // Stop carries no data and cannot be rejected
            self.traj_ctrl.issue(TrajOrder::Stop, &self.platform).ok();
            return true;
        }

        false
    }

    fn publish_status(&self) {
        self.status.0.store(self.status_word(), Ordering::Release);
    }
}

impl StatusHandle {
    /// Read the last published status word.
    pub fn get(&self) -> u16 {
        self.0.load(Ordering::Acquire)
    }

    pub fn is_enabled(&self) -> bool {
        self.get() & MOTION_STATUS_ENABLED != 0
    }

    pub fn is_safeguarded(&self) -> bool {
        self.get() & MOTION_STATUS_SAFEGUARD != 0
    }

    pub fn is_traj_idle(&self) -> bool {
        self.get() & MOTION_STATUS_TRAJ_IDLE != 0
    }
}
