//! Simple linear and angular moves

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

    /// Straight line move: drive to the linear setpoint holding the current
    /// heading.
    pub(crate) fn calc_linear<P>(&mut self, step: MoveStep, platform: &mut P)
    where
        P: PositionServo + Odometry + ?Sized
    {
        match step {
            MoveStep::Push => {
                let heading_rad = platform.pose().heading_rad;
                platform.set_linear_target(self.linear_setpoint_m);
                platform.set_angular_target(heading_rad);
                self.mode = Mode::Linear(MoveStep::Poll);
            }
            MoveStep::Poll => {
                let arrived = platform.has_arrived();
                self.poll_until(arrived, Mode::Free);
            }
        }
    }

    /// Rotation on the spot: turn to the angular setpoint holding the current
    /// linear position.
    pub(crate) fn calc_angular<P>(&mut self, step: MoveStep, platform: &mut P)
    where
        P: PositionServo + Odometry + ?Sized
    {
        match step {
            MoveStep::Push => {
                let linear_m = platform.pose().linear_m;
                platform.set_linear_target(linear_m);
                platform.set_angular_target(self.angular_setpoint_rad);
                self.mode = Mode::Angular(MoveStep::Poll);
            }
            MoveStep::Poll => {
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
    use comms_if::tc::TrajOrder;
    use crate::traj_ctrl::state::test::{assert_close, MockPlatform};

    #[test]
    fn test_go_linear() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::new(0.0, 0.0, 0.5, 1.5));

        tc.issue(TrajOrder::GoLinear { distance_m: 0.7 }, &plat).unwrap();
        assert_close(tc.linear_setpoint_m(), 2.2, 1e-12);
        assert!(!tc.is_finished());

        // Push
        tc.tick(0.2, &mut plat);
        assert_eq!(tc.mode(), Mode::Linear(MoveStep::Poll));
        assert_eq!(tc.current_step(), 2);
        assert!(plat.enabled);
        assert_close(plat.linear_target_m.unwrap(), 2.2, 1e-12);
        assert_close(plat.angular_target_rad.unwrap(), 0.5, 1e-12);

        // Poll, not arrived
        tc.tick(0.2, &mut plat);
        tc.tick(0.2, &mut plat);
        assert!(!tc.is_finished());

        // Arrival
        plat.arrived = true;
        let report = tc.tick(0.2, &mut plat);
        assert_eq!(report.mode, Mode::Free);
        assert!(report.finished);
        assert!(tc.is_finished());

        // Free releases the servo on the next tick
        tc.tick(0.2, &mut plat);
        assert!(!plat.enabled);
    }

    #[test]
    fn test_go_angular() {
        let mut tc = TrajCtrl::default();
        let mut plat = MockPlatform::at(Pose::new(1.0, 2.0, 0.0, 4.0));

        tc.issue(TrajOrder::GoAngular { angle_rad: -1.2 }, &plat).unwrap();
        assert_close(tc.angular_setpoint_rad(), -1.2, 1e-12);

        tc.tick(0.2, &mut plat);
        assert_eq!(tc.current_step(), 2);
        assert_close(plat.linear_target_m.unwrap(), 4.0, 1e-12);
        assert_close(plat.angular_target_rad.unwrap(), -1.2, 1e-12);

        plat.arrived = true;
        tc.tick(0.2, &mut plat);
        assert!(tc.is_finished());
    }
}
