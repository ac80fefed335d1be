//! # Motion library.
//!
//! This library allows other crates in the workspace (and the benchmarks) to
//! access items defined inside the motion crate.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Equipment contracts - the servo, range sensor and contact sensors driven by motion control
pub mod eqpt;

/// Localisation module - pose of the robot, odometry contract and geometry helpers
pub mod loc;

/// Motion control module - multi-rate scheduler, order queue and safety gating
pub mod motion_ctrl;

/// Simulated robot - kinematic stand-in for the real platform
pub mod sim;

/// Telecommand processor - applies TCs to motion control
pub mod tc_processor;

/// Trajectory control module - decomposes orders into servo setpoints
pub mod traj_ctrl;
