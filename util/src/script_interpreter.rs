//! # Motion script interpreter module
//!
//! This module provides an interpreter for motion scripts, allowing
//! telecommands to be executed at set times from a file.
//!
//! A script is a list of `<exec time in seconds>: <TC as JSON>;` entries, for
//! example:
//!
//! ```text
//! 0.5: {"type": "ORDER", "payload": {"GoLinear": {"distance_m": 0.5}}};
//! 4.0: {"type": "ORDER", "payload": "Freewheel"};
//! ```
//!
//! Lines which do not match this pattern are ignored, so they can be used as
//! comments.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::fs;
use regex::RegexBuilder;
use thiserror::Error;

// Internal
use comms_if::tc::{Tc, TcParseError};
use crate::session::get_elapsed_seconds;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A command which is scripted to occur at a specific time.
#[derive(Debug)]
struct Command {
    /// The time the command is supposed to execute at
    exec_time_s: f64,

    /// The Telecommand to run
    tc: Tc
}

/// A script interpreter.
///
/// After initialising with the path to the script to run use
/// `.get_pending_tcs` to acquire a list of telecommands that need executing.
#[derive(Debug)]
pub struct ScriptInterpreter {
    script_path: Option<PathBuf>,
    cmds: VecDeque<Command>
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Could not find the script at {0:?}")]
    ScriptNotFound(PathBuf),

    #[error("Could not load the script: {0}")]
    ScriptLoadError(std::io::Error),

    #[error("The script is empty (or is so bad it can't be read)")]
    ScriptEmpty,

    #[error(
        "Script contains an invalid timestamp: {0}. \
        Should be a float (like 1.0)")]
    InvalidTimestamp(String),

    #[error("Script contains an invalid TC at {0} s: {1}")]
    InvalidTc(f64, TcParseError)
}

#[derive(Debug, PartialEq)]
pub enum PendingTcs {
    None,
    Some(Vec<Tc>),
    EndOfScript
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl ScriptInterpreter {

    /// Create a new interpreter from the given script path.
    pub fn new<P: AsRef<Path>>(script_path: P) -> Result<Self, ScriptError> {

        // Get the path in a buffer
        let path = PathBuf::from(script_path.as_ref());

        // Check that the script file exists.
        if !path.exists() {
            return Err(ScriptError::ScriptNotFound(path));
        }

        // Load the script into a string
        let script = fs::read_to_string(&path)
            .map_err(ScriptError::ScriptLoadError)?;

        let mut si = Self::from_str(&script)?;
        si.script_path = Some(path);

        Ok(si)
    }

    /// Create a new interpreter from the contents of a script.
    pub fn from_str(script: &str) -> Result<Self, ScriptError> {

        // Empty queue of commands
        let mut tc_queue: VecDeque<Command> = VecDeque::new();

        // Go through the script executing __the magic regex__.
        let re = RegexBuilder::
            new(r"^\s*(\d+(\.\d+)?)\s*:\s*([^;]*);")
            .multi_line(true)
            .build()
            .map_err(|e| ScriptError::InvalidTimestamp(e.to_string()))?;

        for cap in re.captures_iter(script) {
            // Both groups are mandatory in the pattern
            let (time_str, tc_str) = match (cap.get(1), cap.get(3)) {
                (Some(t), Some(c)) => (t.as_str(), c.as_str()),
                _ => continue
            };

            // Parse the exec time
            let exec_time_s: f64 = time_str
                .parse()
                .map_err(|e| ScriptError::InvalidTimestamp(format!("{}", e)))?;

            // Parse the TC from the payload. The scripts contain JSON only.
            let tc = Tc::from_json(tc_str)
                .map_err(|e| ScriptError::InvalidTc(exec_time_s, e))?;

            tc_queue.push_back(Command {
                exec_time_s,
                tc
            });
        }

        if tc_queue.is_empty() {
            return Err(ScriptError::ScriptEmpty)
        }

        // Commands are released in time order regardless of the order they
        // were written in.
        tc_queue
            .make_contiguous()
            .sort_by(|a, b| a.exec_time_s.total_cmp(&b.exec_time_s));

        Ok(ScriptInterpreter {
            script_path: None,
            cmds: tc_queue
        })
    }

    /// Return the TCs that are due at the current session time.
    pub fn get_pending_tcs(&mut self) -> PendingTcs {
        self.get_pending_tcs_at(get_elapsed_seconds())
    }

    /// Return the TCs whose exec time is before `current_time_s`.
    pub fn get_pending_tcs_at(&mut self, current_time_s: f64) -> PendingTcs {

        // If the queue is empty the script is over and we return the end of
        // script variant
        if self.cmds.is_empty() {
            return PendingTcs::EndOfScript
        }

        let mut tc_vec: Vec<Tc> = vec![];

        // Pop commands from the head of the queue until one is found that
        // isn't due yet.
        while let Some(cmd) = self.cmds.front() {
            if cmd.exec_time_s >= current_time_s {
                break;
            }
            if let Some(cmd) = self.cmds.pop_front() {
                tc_vec.push(cmd.tc);
            }
        }

        if tc_vec.is_empty() {
            PendingTcs::None
        }
        else {
            PendingTcs::Some(tc_vec)
        }
    }

    /// Get the number of TCs remaining in the script
    pub fn get_num_tcs(&self) -> usize {
        self.cmds.len()
    }

    /// Get the length of the script in seconds
    pub fn get_duration(&self) -> f64 {
        match self.cmds.back() {
            Some(c) => c.exec_time_s,
            None => 0f64
        }
    }

    /// Path the script was loaded from, if any
    pub fn script_path(&self) -> Option<&Path> {
        self.script_path.as_deref()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use comms_if::tc::TrajOrder;

    const SCRIPT: &str = r#"
# Square side then release
1.0: {"type": "ORDER", "payload": {"GoLinear": {"distance_m": 0.5}}};
0.5: {"type": "CONFIGURE", "payload": {"enable": true, "safeguard": true}};
3.0: {"type": "ORDER", "payload": "Freewheel"};
"#;

    #[test]
    fn test_parse_script() {
        let si = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(si.get_num_tcs(), 3);
        assert_eq!(si.get_duration(), 3.0);
        assert!(si.script_path().is_none());
    }

    #[test]
    fn test_pending_tcs() {
        let mut si = ScriptInterpreter::from_str(SCRIPT).unwrap();

        assert_eq!(si.get_pending_tcs_at(0.1), PendingTcs::None);

        assert_eq!(
            si.get_pending_tcs_at(2.0),
            PendingTcs::Some(vec![
                Tc::Configure { enable: true, safeguard: true },
                Tc::Order(TrajOrder::GoLinear { distance_m: 0.5 }),
            ])
        );

        assert_eq!(si.get_pending_tcs_at(2.5), PendingTcs::None);
        assert_eq!(
            si.get_pending_tcs_at(3.5),
            PendingTcs::Some(vec![Tc::Order(TrajOrder::Freewheel)])
        );
        assert_eq!(si.get_pending_tcs_at(4.0), PendingTcs::EndOfScript);
    }

    #[test]
    fn test_empty_script() {
        assert!(matches!(
            ScriptInterpreter::from_str("# nothing here\n"),
            Err(ScriptError::ScriptEmpty)
        ));
    }

    #[test]
    fn test_invalid_tc() {
        assert!(matches!(
            ScriptInterpreter::from_str(r#"1.0: {"type": "DANCE"};"#),
            Err(ScriptError::InvalidTc(_, _))
        ));
    }
}
