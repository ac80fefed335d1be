//! Path following calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::debug;

// Internal imports
use super::*;
use crate::eqpt::PositionServo;
use crate::loc::Odometry;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajCtrl {

    /// Path following.
    ///
    /// The setpoints are re-aimed at the targeted waypoint on every tick as
    /// the pose moves. The linear setpoint covers the distance to the
    /// waypoint plus every segment after it, so the servo is never asked to
    /// stop at an intermediate waypoint.
    pub(crate) fn calc_draw_plan<P>(&mut self, step: DrawPlanStep, platform: &mut P)
    where
        P: PositionServo + Odometry + ?Sized
    {
        use DrawPlanStep::*;

        let tolerance_m = self.params.waypoint_tolerance_m;

        // Start moves straight on to tracking the first waypoint
        let step = match step {
            Start => {
                self.waypoints.rewind();
                let first = if self.waypoints.at_last() {
                    LastWaypoint
                }
                else {
                    Follow
                };
                self.mode = Mode::DrawPlan(first);
                first
            }
            s => s,
        };

        self.update_waypoint_setpoints(&*platform);
        let linear_m = platform.pose().linear_m;

        match step {
            Start => (),
            Follow => {
                if (self.next_linear_setpoint_m - linear_m).abs() <= tolerance_m {
                    self.waypoints.advance();
                    debug!(
                        "TrajCtrl: waypoint reached, now targeting {} of {}",
                        self.waypoints.cursor() + 1,
                        self.waypoints.len()
                    );

                    if self.waypoints.at_last() {
                        self.mode = Mode::DrawPlan(LastWaypoint);
                    }
                    else {
                        // New waypoint, restart the watchdog count
                        self.step_ticks = 0;
                    }

                    self.update_waypoint_setpoints(&*platform);
                }
                else {
                    self.check_watchdog();
                }
            }
            LastWaypoint => {
                let reached = (self.linear_setpoint_m - linear_m).abs() <= tolerance_m;
                self.poll_until(reached, Mode::DrawPlan(Finishing));
            }
            Finishing => {
                self.mode = Mode::Free;
            }
        }

        if let Mode::DrawPlan(_) = self.mode {
            platform.set_linear_target(self.linear_setpoint_m);
            platform.set_angular_target(self.angular_setpoint_rad);
        }
    }

    /// Aim the setpoints at the targeted waypoint, adding the length of the
    /// rest of the path to the linear setpoint.
    pub(crate) fn update_waypoint_setpoints<O>(&mut self, odom: &O)
    where
        O: Odometry + ?Sized
    {
        let target_m = match self.waypoints.current() {
            Some(t) => *t,
            None => return,
        };

        self.next_linear_setpoint_m = self.aim_at(target_m, odom);
        self.linear_setpoint_m += self.waypoints.remaining_length_m();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::sim::{self, SimRobot};
    use crate::traj_ctrl::state::test::{assert_close, MockPlatform};
    use comms_if::tc::TrajOrder;

    fn follow_path(points_m: Vec<[f64; 2]>) -> TrajOrder {
        TrajOrder::FollowPath { points_m }
    }

    #[test]
    fn test_setpoints_include_remaining_path() {
        let mut tc = TrajCtrl::default();
        let plat = MockPlatform::at(Pose::new(0.0, 0.0, 0.0, 0.5));

        tc.issue(follow_path(vec![[1.0, 0.0], [2.0, 0.0], [2.0, 1.0]]), &plat)
            .unwrap();

        assert_eq!(tc.mode(), Mode::DrawPlan(DrawPlanStep::Start));
        assert!(!tc.is_finished());
        assert_close(tc.next_linear_setpoint_m, 1.5, 1e-12);
        assert_close(tc.linear_setpoint_m(), 3.5, 1e-12);
        assert_close(tc.angular_setpoint_rad(), 0.0, 1e-12);
    }

    #[test]
    fn test_start_falls_through_to_follow() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::default());

        tc.issue(follow_path(vec![[0.0, 1.0], [0.0, 2.0]]), &plat).unwrap();
        let report = tc.tick(0.2, &mut plat);

        assert_eq!(report.mode, Mode::DrawPlan(DrawPlanStep::Follow));
        assert_eq!(report.waypoint_cursor, Some(0));
        assert_close(plat.linear_target_m.unwrap(), 2.0, 1e-12);
        assert_close(plat.angular_target_rad.unwrap(), std::f64::consts::FRAC_PI_2, 1e-12);
    }

    #[test]
    fn test_single_point_path() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::default());

        tc.issue(follow_path(vec![[1.0, 0.0]]), &plat).unwrap();
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::DrawPlan(DrawPlanStep::LastWaypoint));

        // Move onto the point
        plat.pose = Pose::new(0.95, 0.0, 0.0, 0.95);
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::DrawPlan(DrawPlanStep::Finishing));

        tc.tick(0.2, &mut plat);
        assert!(tc.is_finished());
    }

    #[test]
    fn test_path_converges_in_sim() {
        let mut tc = TrajCtrl::default();
        let mut robot = SimRobot::new(sim::Params::default(), Pose::default());
        let path = vec![[1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]];

        tc.issue(follow_path(path.clone()), &robot).unwrap();

        let mut last_cursor = 0;
        let mut ticks = 0;
        while !tc.is_finished() {
            let report = tc.tick(0.2, &mut robot);
            robot.tick(0.2);

            // The cursor never moves backwards
            if let Some(c) = report.waypoint_cursor {
                assert!(c >= last_cursor);
                last_cursor = c;
            }

            ticks += 1;
            assert!(ticks < 1000, "path not completed");
        }

        assert_eq!(last_cursor, path.len() - 1);
        let pose = robot.pose();
        assert!(pose.position_m.norm() < 0.15);
    }
}
