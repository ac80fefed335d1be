//! Session logger
//!
//! Every record goes to the session log file at the requested level. The
//! console gets the same stream, minus the per-module caps given by the
//! executable, so the per-tick traces of the control loop can be kept on disk
//! without flooding the terminal.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External imports
use colored::{ColoredString, Colorize};
use log::{info, Level, Record};
use thiserror::Error;

// Internal imports
use crate::session::{self, Session};

// Re-exports
pub use log::LevelFilter;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Maximum level shown on the console for a module path (and its children).
pub type ConsoleCap = (&'static str, LevelFilter);

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Errors associated with initialising the logger.
#[derive(Debug, Error)]
pub enum LoggerInitError {
    #[error("The minimum log level must be at least `INFO`, found `{0}`")]
    InvalidMinLogLevel(LevelFilter),

    #[error("Could not open the session log file: {0}")]
    LogFileInitError(std::io::Error),

    #[error("A logger has already been set: {0}")]
    FernInitError(log::SetLoggerError),
}

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Initialise the logger for this session.
///
/// `min_level` applies to the log file and is the upper bound on the console,
/// `console_caps` lowers the console level of individual modules.
///
/// May only be called once per process.
pub fn logger_init(
    min_level: LevelFilter,
    session: &Session,
    console_caps: &[ConsoleCap],
) -> Result<(), LoggerInitError> {

    if min_level < LevelFilter::Info {
        return Err(LoggerInitError::InvalidMinLogLevel(min_level));
    }

    let log_file = fern::log_file(&session.log_file_path)
        .map_err(LoggerInitError::LogFileInitError)?;

    let console = console_caps.iter().fold(
        fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{:10.4} {}] {}",
                    session::get_elapsed_seconds(),
                    level_tag(record.level()),
                    console_body(record, message)
                ))
            })
            .chain(std::io::stdout()),
        |dispatch, (module, level)| dispatch.level_for(*module, (*level).min(min_level)),
    );

    let file = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{:.6} {:<5} {}: {}",
                session::get_elapsed_seconds(),
                record.level(),
                record.target(),
                message
            ))
        })
        .chain(log_file);

    fern::Dispatch::new()
        .level(min_level)
        .chain(console)
        .chain(file)
        .apply()
        .map_err(LoggerInitError::FernInitError)?;

    info!("Logging to {:?} at {:?}", session.log_file_path, min_level);
    for (module, level) in console_caps {
        info!("    console shows {} up to {:?}", module, (*level).min(min_level));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// PRIVATE FUNCTIONS
// ---------------------------------------------------------------------------

/// Console level tag, fixed width.
fn level_tag(level: Level) -> ColoredString {
    match level {
        Level::Trace => "TRC".dimmed().italic(),
        Level::Debug => "DBG".dimmed(),
        Level::Info => "INF".normal(),
        Level::Warn => "WRN".yellow().bold(),
        Level::Error => "ERR".on_red().bold(),
    }
}

/// Debug and trace lines are prefixed with the short name of their module.
fn console_body(record: &Record, message: &std::fmt::Arguments) -> String {
    match record.level() {
        Level::Debug | Level::Trace => {
            format!("{}: {}", short_target(record.target()), message)
        }
        _ => message.to_string(),
    }
}

/// Strip the crate and the trailing `state` module from a target path, e.g.
/// `motion_lib::traj_ctrl::state` becomes `traj_ctrl`.
fn short_target(target: &str) -> &str {
    let target = target.strip_suffix("::state").unwrap_or(target);

    match target.split_once("::") {
        Some((_, rest)) => rest,
        None => target,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_short_target() {
        assert_eq!(short_target("motion_lib::traj_ctrl::state"), "traj_ctrl");
        assert_eq!(short_target("motion_lib::sim"), "sim");
        assert_eq!(short_target("motion_lib::motion_ctrl::queue"), "motion_ctrl::queue");
        assert_eq!(short_target("motion_exec"), "motion_exec");
    }

    #[test]
    fn test_level_tags_same_width() {
        for level in [Level::Trace, Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert_eq!(level_tag(level).chars().count(), 3);
        }
    }
}
