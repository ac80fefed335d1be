//! # Telecommand processor module
//!
//! The telecommand processor applies TCs, from a script or any other source,
//! to motion control.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use crate::eqpt::Platform;
use crate::motion_ctrl::{MotionCtrl, QueueFull};
use comms_if::tc::Tc;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Orders that do not fit in the queue are dropped with a warning and handed
/// back in the error.
pub fn exec<P: Platform>(mc: &mut MotionCtrl<P>, tc: &Tc) -> Result<(), QueueFull> {

    match tc {
        Tc::Configure { enable, safeguard } => {
            debug!(
                "Recieved Configure command (enable: {}, safeguard: {})",
                enable, safeguard
            );
            mc.configure(*enable, *safeguard);
        }
        Tc::Order(order) => {
            debug!("Recieved {} order", order.name());

            if let Err(e) = mc.submit(order.clone()) {
                warn!("{}", e);
                return Err(e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::loc::Pose;
    use crate::motion_ctrl::{self, ORDER_QUEUE_CAPACITY};
    use crate::sim::{self, SimRobot};
    use crate::traj_ctrl::TrajCtrl;
    use comms_if::tc::TrajOrder;

    fn motion_ctrl() -> MotionCtrl<SimRobot> {
        MotionCtrl::new(
            motion_ctrl::Params::default(),
            TrajCtrl::default(),
            SimRobot::new(sim::Params::default(), Pose::default()),
        )
        .unwrap()
    }

    #[test]
    fn test_configure() {
        let mut mc = motion_ctrl();

        exec(&mut mc, &Tc::Configure { enable: false, safeguard: false }).unwrap();
        assert!(!mc.is_enabled());
        assert!(!mc.is_safeguarded());

        let tc = Tc::from_json(
            r#"{"type": "CONFIGURE", "payload": {"enable": true, "safeguard": true}}"#
        ).unwrap();
        exec(&mut mc, &tc).unwrap();
        assert!(mc.is_enabled());
        assert!(mc.is_safeguarded());
    }

    #[test]
    fn test_orders_queued_until_full() {
        let mut mc = motion_ctrl();
        let tc = Tc::Order(TrajOrder::GoAngular { angle_rad: 1.0 });

        for _ in 0..ORDER_QUEUE_CAPACITY {
            exec(&mut mc, &tc).unwrap();
        }

        let err = exec(&mut mc, &tc).unwrap_err();
        assert_eq!(err.into_order(), TrajOrder::GoAngular { angle_rad: 1.0 });
        assert_eq!(mc.queue_len(), ORDER_QUEUE_CAPACITY);
    }
}
