//! Motion control parameters

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Deserialize;

// Internal
use super::MotionCtrlError;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for motion control
#[derive(Deserialize, Debug, Clone)]
pub struct Params {

    /// The period at which motion control is ticked.
    ///
    /// Units: milliseconds
    pub base_period_ms: u64,

    /// Units: milliseconds
    pub obstacle_period_ms: u64,

    /// Units: milliseconds
    pub traj_period_ms: u64,

    /// Units: milliseconds
    pub servo_period_ms: u64,

    /// Start with motion control enabled
    pub enable_on_start: bool,

    /// Start with the obstacle safeguard armed
    pub safeguard_on_start: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Params {
    /// Check that every sub-period can be derived from the base period.
    pub fn validate(&self) -> Result<(), MotionCtrlError> {
        if self.base_period_ms == 0 {
            return Err(MotionCtrlError::InvalidPeriod {
                name: "base",
                period_ms: 0,
                base_period_ms: 0,
            });
        }

        let periods = [
            ("obstacle", self.obstacle_period_ms),
            ("trajectory", self.traj_period_ms),
            ("servo", self.servo_period_ms),
        ];

        for (name, period_ms) in periods {
            if period_ms == 0 || period_ms % self.base_period_ms != 0 {
                return Err(MotionCtrlError::InvalidPeriod {
                    name,
                    period_ms,
                    base_period_ms: self.base_period_ms,
                });
            }
        }

        Ok(())
    }

    /// Base period in seconds.
    pub fn base_period_s(&self) -> f64 {
        self.base_period_ms as f64 / 1000.0
    }
}

impl Default for Params {
    fn default() -> Self {
        Self {
            base_period_ms: 5,
            obstacle_period_ms: 200,
            traj_period_ms: 200,
            servo_period_ms: 100,
            enable_on_start: true,
            safeguard_on_start: true,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validate() {
        assert!(Params::default().validate().is_ok());

        let p = Params {
            servo_period_ms: 12,
            ..Default::default()
        };
        assert!(matches!(
            p.validate(),
            Err(MotionCtrlError::InvalidPeriod { name: "servo", period_ms: 12, base_period_ms: 5 })
        ));

        let p = Params {
            obstacle_period_ms: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());

        let p = Params {
            base_period_ms: 0,
            ..Default::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn test_deserialise() {
        let p: Params = util::params::from_toml_str(
            "base_period_ms = 10\n\
            obstacle_period_ms = 100\n\
            traj_period_ms = 50\n\
            servo_period_ms = 10\n\
            enable_on_start = false\n\
            safeguard_on_start = true\n"
        ).unwrap();

        assert_eq!(p.traj_period_ms, 50);
        assert!(!p.enable_on_start);
        assert!(p.validate().is_ok());
    }
}
