//! # Telecommand module
//!
//! This module provides telecommand functionality to the communications
//! interface.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod traj_ctrl;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Internal
pub use traj_ctrl::{RobotSide, StallMode, TableEdge, TrajOrder};

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// A telecommand, i.e. an instruction sent to motion control by the mission
/// logic.
///
/// In JSON a TC is written as `{"type": "...", "payload": ...}`, for example
/// `{"type": "ORDER", "payload": {"GoLinear": {"distance_m": 0.5}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tc {
    /// Set the operating flags of motion control.
    Configure { enable: bool, safeguard: bool },

    /// Queue a trajectory order.
    Order(TrajOrder),
}

/// Possible parsing errors.
#[derive(Debug, Error)]
pub enum TcParseError {
    #[error("TC contains invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Tc {
    /// Parse a new TC from a JSON packet
    pub fn from_json(json_str: &str) -> Result<Self, TcParseError> {
        serde_json::from_str(json_str).map_err(TcParseError::InvalidJson)
    }

    /// Serialise the TC into a JSON string
    pub fn to_json(&self) -> Result<String, TcParseError> {
        serde_json::to_string(self).map_err(TcParseError::InvalidJson)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_order() {
        let tc = Tc::from_json(
            r#"{"type": "ORDER", "payload": {"GoToPoint": {"x_m": 3.0, "y_m": 4.0}}}"#,
        )
        .unwrap();

        assert_eq!(tc, Tc::Order(TrajOrder::GoToPoint { x_m: 3.0, y_m: 4.0 }));
    }

    #[test]
    fn test_parse_unit_order_and_configure() {
        let stop = Tc::from_json(r#"{"type": "ORDER", "payload": "Stop"}"#).unwrap();
        assert_eq!(stop, Tc::Order(TrajOrder::Stop));

        let cfg = Tc::from_json(
            r#"{"type": "CONFIGURE", "payload": {"enable": false, "safeguard": true}}"#,
        )
        .unwrap();
        assert_eq!(
            cfg,
            Tc::Configure {
                enable: false,
                safeguard: true
            }
        );
    }

    #[test]
    fn test_parse_stall_order() {
        let tc = Tc::from_json(
            r#"{"type": "ORDER", "payload": {"StallY": {"mode": {"edge": "High", "side": "Front"}}}}"#,
        )
        .unwrap();

        assert_eq!(
            tc,
            Tc::Order(TrajOrder::StallY {
                mode: StallMode {
                    edge: TableEdge::High,
                    side: RobotSide::Front
                }
            })
        );
    }

    #[test]
    fn test_invalid_tc() {
        assert!(Tc::from_json(r#"{"type": "LAUNCH"}"#).is_err());
        assert!(Tc::from_json("not json").is_err());
    }
}
