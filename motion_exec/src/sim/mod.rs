//! # Simulated robot
//!
//! A kinematic (unicycle) model of the robot standing in for the position
//! servo, odometry, range sensor and contact sensors. The servo moves the
//! robot towards its targets at bounded rates, turning on the spot first when
//! the heading error is large. The odometry is perfect.
//!
//! Obstacles are points on the table, detected when within range and inside
//! the sensor's forward cone.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::trace;
use nalgebra::Vector2;

// Internal
pub use params::Params;
use crate::eqpt::{ContactSensors, PositionServo, RangeSensor};
use crate::loc::{self, Odometry, Pose, PoseRebase};
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The simulated robot.
#[derive(Debug, Clone)]
pub struct SimRobot {
    params: Params,

    pose: Pose,

    linear_target_m: f64,
    angular_target_rad: f64,

    enabled: bool,

    obstacles_m: Vec<Vector2<f64>>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimRobot {
    /// Place a new robot at the given pose, servo disabled and targeting the
    /// pose it starts at.
    pub fn new(params: Params, pose: Pose) -> Self {
        let obstacles_m = params
            .obstacles_m
            .iter()
            .map(|p| Vector2::new(p[0], p[1]))
            .collect();

        Self {
            params,
            pose,
            linear_target_m: pose.linear_m,
            angular_target_rad: pose.heading_rad,
            enabled: false,
            obstacles_m,
        }
    }

    /// Put a point obstacle on the table.
    pub fn add_obstacle(&mut self, x_m: f64, y_m: f64) {
        self.obstacles_m.push(Vector2::new(x_m, y_m));
    }

    pub fn clear_obstacles(&mut self) {
        self.obstacles_m.clear();
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn linear_error_m(&self) -> f64 {
        self.linear_target_m - self.pose.linear_m
    }

    fn angular_error_rad(&self) -> f64 {
        self.angular_target_rad - self.pose.heading_rad
    }
}

impl PositionServo for SimRobot {
    fn set_linear_target(&mut self, linear_m: f64) {
        self.linear_target_m = linear_m;
    }

    fn set_angular_target(&mut self, angle_rad: f64) {
        self.angular_target_rad = angle_rad;
    }

    fn enable(&mut self) {
        self.enabled = true;
    }

    fn disable(&mut self) {
        self.enabled = false;
    }

    fn has_arrived(&self) -> bool {
        self.linear_error_m().abs() <= self.params.linear_tolerance_m
            && self.angular_error_rad().abs() <= self.params.angular_tolerance_rad
    }

    fn tick(&mut self, period_s: f64) {
        if !self.enabled {
            return;
        }

        // Turn
        let max_turn_rad = self.params.max_angular_speed_rads * period_s;
        self.pose.heading_rad += self.angular_error_rad().clamp(-max_turn_rad, max_turn_rad);

        // Drive, once roughly facing the right way
        if self.angular_error_rad().abs() <= self.params.rotate_first_threshold_rad {
            let max_move_m = self.params.max_linear_speed_ms * period_s;
            let move_m = self.linear_error_m().clamp(-max_move_m, max_move_m);

            self.pose.linear_m += move_m;
            self.pose.position_m += Vector2::new(
                self.pose.heading_rad.cos(),
                self.pose.heading_rad.sin()
            ) * move_m;
        }

        trace!(
            "SimRobot at ({:.3}, {:.3}, {:.3}), linear {:.3}",
            self.pose.x_m(),
            self.pose.y_m(),
            self.pose.heading_rad,
            self.pose.linear_m
        );
    }
}

impl Odometry for SimRobot {
    fn pose(&self) -> Pose {
        self.pose
    }

    fn rebase(&mut self, rebase: PoseRebase) {
        self.pose.apply_rebase(&rebase);
    }
}

impl RangeSensor for SimRobot {
    fn obstructed(&self) -> bool {
        self.obstacles_m.iter().any(|o| {
            let (bearing_rad, dist_m) = loc::bearing_dist(&self.pose.position_m, o);

            dist_m <= self.params.detection_range_m
                && wrap_pi(bearing_rad - self.pose.heading_rad).abs()
                    <= self.params.detection_half_angle_rad
        })
    }
}

// Contact switches are not simulated
impl ContactSensors for SimRobot {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_disabled_does_not_move() {
        let mut robot = SimRobot::new(Params::default(), Pose::default());
        robot.set_linear_target(1.0);

        robot.tick(0.2);
        assert_eq!(robot.pose(), Pose::default());
        assert!(!robot.has_arrived());
    }

    #[test]
    fn test_drive_forward() {
        let mut robot = SimRobot::new(Params::default(), Pose::new(0.0, 0.0, 0.5, 0.0));
        robot.enable();
        robot.set_linear_target(0.1);
        robot.set_angular_target(0.5);

        robot.tick(0.2);
        assert!((robot.pose().linear_m - 0.05).abs() < 1e-12);
        assert!(!robot.has_arrived());

        robot.tick(0.2);
        robot.tick(0.2);
        let pose = robot.pose();
        assert!((pose.linear_m - 0.1).abs() < 1e-12);
        assert!((pose.x_m() - 0.1 * 0.5f64.cos()).abs() < 1e-12);
        assert!((pose.y_m() - 0.1 * 0.5f64.sin()).abs() < 1e-12);
        assert!(robot.has_arrived());
    }

    #[test]
    fn test_turns_before_driving() {
        let mut robot = SimRobot::new(Params::default(), Pose::default());
        robot.enable();
        robot.set_linear_target(1.0);
        robot.set_angular_target(1.5);

        // 0.5 rad per tick, still 1.0 rad off
        robot.tick(0.2);
        assert!((robot.pose().heading_rad - 0.5).abs() < 1e-12);
        assert_eq!(robot.pose().linear_m, 0.0);

        robot.tick(0.2);
        robot.tick(0.2);
        assert!((robot.pose().heading_rad - 1.5).abs() < 1e-12);
        assert!((robot.pose().linear_m - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_obstacle_detection() {
        let mut robot = SimRobot::new(Params::default(), Pose::default());
        assert!(!robot.obstructed());

        // Behind
        robot.add_obstacle(-0.1, 0.0);
        assert!(!robot.obstructed());

        // Ahead but out of range
        robot.add_obstacle(1.0, 0.0);
        assert!(!robot.obstructed());

        // Ahead, in range
        robot.add_obstacle(0.2, 0.05);
        assert!(robot.obstructed());

        robot.clear_obstacles();
        assert!(!robot.obstructed());
    }

    #[test]
    fn test_rebase_and_contacts() {
        let mut robot = SimRobot::new(Params::default(), Pose::new(0.4, 0.3, 0.1, 2.0));
        robot.rebase(PoseRebase::x_heading(0.0, 0.0));

        assert_eq!(robot.pose(), Pose::new(0.0, 0.3, 0.0, 2.0));
        assert_eq!(robot.rear_contacts(), (true, true));
    }
}
