//! Bounded waypoint buffer used by path following

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use nalgebra::Vector2;

// Internal
use super::{TrajCtrlError, MAX_WAYPOINTS};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// The waypoints of the path being followed and the cursor to the waypoint
/// currently targeted.
///
/// The capacity is fixed at `MAX_WAYPOINTS`, pushing beyond it is an error.
#[derive(Debug, Clone, Default)]
pub struct WaypointBuffer {
    points_m: heapless::Vec<Vector2<f64>, MAX_WAYPOINTS>,
    cursor: usize,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl WaypointBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from the `[x, y]` points of a path order.
    ///
    /// The path must contain between 1 and `MAX_WAYPOINTS` points.
    pub fn from_points(points_m: &[[f64; 2]]) -> Result<Self, TrajCtrlError> {
        if points_m.is_empty() || points_m.len() > MAX_WAYPOINTS {
            return Err(TrajCtrlError::InvalidWaypointCount(points_m.len()));
        }

        let mut buffer = Self::new();
        for p in points_m {
            buffer.push(Vector2::new(p[0], p[1]))?;
        }

        Ok(buffer)
    }

    /// Append a waypoint to the end of the path.
    pub fn push(&mut self, point_m: Vector2<f64>) -> Result<(), TrajCtrlError> {
        self.points_m
            .push(point_m)
            .map_err(|_| TrajCtrlError::InvalidWaypointCount(MAX_WAYPOINTS + 1))
    }

    pub fn len(&self) -> usize {
        self.points_m.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points_m.is_empty()
    }

    /// Index of the targeted waypoint.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor back to the first waypoint.
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// The targeted waypoint, if any.
    pub fn current(&self) -> Option<&Vector2<f64>> {
        self.points_m.get(self.cursor)
    }

    /// True if the cursor is on the final waypoint (or the buffer is empty).
    pub fn at_last(&self) -> bool {
        self.cursor + 1 >= self.points_m.len()
    }

    /// Move the cursor to the next waypoint. Returns false if already on the
    /// final one.
    pub fn advance(&mut self) -> bool {
        if self.at_last() {
            false
        }
        else {
            self.cursor += 1;
            true
        }
    }

    /// Length of the path from the targeted waypoint to the final one.
    ///
    /// Units: meters
    pub fn remaining_length_m(&self) -> f64 {
        self.points_m
            .iter()
            .skip(self.cursor)
            .zip(self.points_m.iter().skip(self.cursor + 1))
            .map(|(a, b)| (b - a).norm())
            .sum()
    }

    /// Empty the buffer.
    pub fn clear(&mut self) {
        self.points_m.clear();
        self.cursor = 0;
    }
}
