//! Stall calibration against the table edges

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use log::info;

// Internal imports
use super::*;
use crate::eqpt::{ContactSensors, PositionServo};
use crate::loc::{Odometry, PoseRebase};
use std::f64::consts::FRAC_PI_2;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajCtrl {

    /// Stall calibration of either axis.
    ///
    /// Rotates to the calibration heading (0 for X, pi/2 for Y), backs into
    /// the edge until both rear contacts engage, then rebases the odometry.
    /// The stall mode (which edge, which side of the robot) is recorded but
    /// the edge geometry does not depend on it yet, the rebase always puts
    /// the calibrated coordinate at 0.
    pub(crate) fn calc_stall<P>(&mut self, step: StallStep, platform: &mut P)
    where
        P: PositionServo + Odometry + ContactSensors + ?Sized
    {
        let (to_mode, rebase): (fn(StallStep) -> Mode, PoseRebase) = match self.mode {
            Mode::StallY(_) => (Mode::StallY, PoseRebase::y_heading(0.0, FRAC_PI_2)),
            _ => (Mode::StallX, PoseRebase::x_heading(0.0, 0.0)),
        };

        // Setpoints are pushed on the first tick of each step
        let entering = self.step_ticks == 0;

        match step {
            StallStep::Rotate => {
                if entering {
                    let linear_m = platform.pose().linear_m;
                    platform.set_linear_target(linear_m);
                    platform.set_angular_target(self.angular_setpoint_rad);
                }
                else {
                    let arrived = platform.has_arrived();
                    self.poll_until(arrived, to_mode(StallStep::Contact));
                }
            }
            StallStep::Contact => {
                if entering {
                    self.linear_setpoint_m =
                        platform.pose().linear_m + self.params.stall_approach_m;
                    platform.set_linear_target(self.linear_setpoint_m);
                    platform.set_angular_target(self.angular_setpoint_rad);
                }

                let (left, right) = platform.rear_contacts();
                self.poll_until(left && right, to_mode(StallStep::Rebase));
            }
            StallStep::Rebase => {
                platform.rebase(rebase);

                // Hold the robot where it now thinks it is
                let pose = platform.pose();
                self.linear_setpoint_m = pose.linear_m;
                self.angular_setpoint_rad = pose.heading_rad;
                platform.set_linear_target(self.linear_setpoint_m);
                platform.set_angular_target(self.angular_setpoint_rad);

                info!(
                    "TrajCtrl: {} calibrated ({:?}), pose now ({:.3}, {:.3}, {:.3})",
                    self.mode.name(),
                    self.stall_mode,
                    pose.x_m(),
                    pose.y_m(),
                    pose.heading_rad
                );

                self.mode = Mode::Free;
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::traj_ctrl::state::test::{assert_close, MockPlatform};
    use comms_if::tc::{RobotSide, StallMode, TableEdge, TrajOrder};

    #[test]
    fn test_stall_x() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::new(0.3, 0.8, 6.5, 2.0));

        tc.issue(TrajOrder::StallX { mode: StallMode::default() }, &plat).unwrap();

        // Closest multiple of 2pi to the current heading
        assert_close(tc.angular_setpoint_rad(), std::f64::consts::TAU, 1e-12);

        // Rotate
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::StallX(StallStep::Rotate));
        assert_close(plat.angular_target_rad.unwrap(), std::f64::consts::TAU, 1e-12);
        assert_close(plat.linear_target_m.unwrap(), 2.0, 1e-12);

        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 1);

        plat.arrived = true;
        plat.pose.heading_rad = std::f64::consts::TAU;
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 2);

        // Back into the edge, contacts not engaged yet
        plat.contacts = (true, false);
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::StallX(StallStep::Contact));
        assert_close(plat.linear_target_m.unwrap(), 1.8, 1e-12);

        plat.contacts = (true, true);
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 3);
        assert!(plat.rebases.is_empty());

        // Rebase
        tc.tick(0.2, &mut plat);
        assert!(tc.is_finished());
        assert_eq!(plat.rebases, vec![PoseRebase::x_heading(0.0, 0.0)]);
        assert_eq!(plat.pose, Pose::new(0.0, 0.8, 0.0, 2.0));
        assert_close(plat.angular_target_rad.unwrap(), 0.0, 1e-12);
    }

    #[test]
    fn test_stall_y_with_stub_contacts() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::new(0.3, 0.8, 0.0, 0.0));
        plat.arrived = true;

        let mode = StallMode {
            edge: TableEdge::High,
            side: RobotSide::Front,
        };
        tc.issue(TrajOrder::StallY { mode }, &plat).unwrap();
        assert_close(tc.angular_setpoint_rad(), FRAC_PI_2, 1e-12);

        let mut ticks = 0;
        while !tc.is_finished() {
            tc.tick(0.2, &mut plat);
            ticks += 1;
        }

        // Rotate push, rotate poll, contact, rebase
        assert_eq!(ticks, 4);
        assert_eq!(tc.stall_mode, mode);
        assert_eq!(plat.pose, Pose::new(0.3, 0.0, FRAC_PI_2, 0.0));
    }
}
