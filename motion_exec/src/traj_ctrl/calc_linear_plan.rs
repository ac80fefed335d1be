//! Go to point calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::*;
use crate::eqpt::PositionServo;
use crate::loc::Odometry;

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl TrajCtrl {

    /// Go to point: rotate towards the target bearing, then drive the
    /// distance to it.
    ///
    /// Both setpoints were computed when the order was issued. The rotation
    /// is on the spot so the linear setpoint is still valid once it ends.
    pub(crate) fn calc_linear_plan<P>(&mut self, step: LinearPlanStep, platform: &mut P)
    where
        P: PositionServo + Odometry + ?Sized
    {
        use LinearPlanStep::*;

        match step {
            PushRotate => {
                let linear_m = platform.pose().linear_m;
                platform.set_linear_target(linear_m);
                platform.set_angular_target(self.angular_setpoint_rad);
                self.mode = Mode::LinearPlan(PollRotate);
            }
            PollRotate => {
                let arrived = platform.has_arrived();
                self.poll_until(arrived, Mode::LinearPlan(Settle));
            }
            Settle => {
                self.mode = Mode::LinearPlan(PushDrive);
            }
            PushDrive => {
                let heading_rad = platform.pose().heading_rad;
                platform.set_linear_target(self.linear_setpoint_m);
                platform.set_angular_target(heading_rad);
                self.mode = Mode::LinearPlan(PollDrive);
            }
            PollDrive => {
                let arrived = platform.has_arrived();
                self.poll_until(arrived, Mode::Free);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::traj_ctrl::state::test::{assert_close, MockPlatform};
    use comms_if::tc::TrajOrder;

    #[test]
    fn test_rotate_then_drive() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::new(0.0, 0.0, 0.0, 1.0));

        tc.issue(TrajOrder::GoToPoint { x_m: 3.0, y_m: 4.0 }, &plat).unwrap();

        // Rotation pushed with the current linear position
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 2);
        assert_close(plat.linear_target_m.unwrap(), 1.0, 1e-12);
        assert_close(plat.angular_target_rad.unwrap(), 4f64.atan2(3.0), 1e-12);

        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 2);

        // Rotation done
        plat.arrived = true;
        plat.pose.heading_rad = 4f64.atan2(3.0);
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::LinearPlan(LinearPlanStep::Settle));

        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 4);

        // Drive pushed with the heading reached
        plat.arrived = false;
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 5);
        assert_close(plat.linear_target_m.unwrap(), 6.0, 1e-12);
        assert_close(plat.angular_target_rad.unwrap(), 4f64.atan2(3.0), 1e-12);
        assert!(!tc.is_finished());

        plat.arrived = true;
        tc.tick(0.2, &mut plat);
        assert!(tc.is_finished());
        assert_eq!(tc.mode(), Mode::Free);
    }
}
