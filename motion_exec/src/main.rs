//! Main motion executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise the session, logger and modules
//!     - Main loop, once per base period:
//!         - Telecommand processing from the script
//!         - Motion control tick (obstacle check, trajectory control and
//!           position servo at their own rates)
//!         - Cycle management
//!
//! The robot is simulated, see `motion_lib::sim`.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{eyre::WrapErr, Report};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};
use structopt::StructOpt;

// Internal
use motion_lib::{
    loc::{Odometry, Pose},
    motion_ctrl::MotionCtrl,
    sim::{self, SimRobot},
    tc_processor,
};
use util::{
    logger::{logger_init, ConsoleCap, LevelFilter},
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Per-tick traces are written to the log file only.
const CONSOLE_CAPS: &[ConsoleCap] = &[
    ("motion_lib::sim", LevelFilter::Debug),
    ("motion_lib::motion_ctrl::state", LevelFilter::Debug),
    ("motion_lib::traj_ctrl::state", LevelFilter::Debug),
];

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Command line options
#[derive(Debug, StructOpt)]
#[structopt(name = "motion_exec", about = "Runs motion control on the simulated robot")]
struct Opts {
    /// Path to the telecommand script to execute
    #[structopt(parse(from_os_str))]
    script: PathBuf,

    /// Minimum level of the messages logged (info, debug or trace)
    #[structopt(short, long, default_value = "debug")]
    log_level: LevelFilter,
}

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {

    color_eyre::install()?;

    let opts = Opts::from_args();

    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session = Session::new(
        "motion_exec",
        "sessions"
    ).wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(opts.log_level, &session, CONSOLE_CAPS)
        .wrap_err("Failed to initialise logging")?;

    info!("Motion Executable, session started {}\n", util::session::get_epoch()?);
    info!("Session directory: {:?}\n", session.session_root);
    debug!("CLI options: {:?}", opts);

    // ---- LOAD SCRIPT ----

    info!("Loading script from {:?}", &opts.script);

    let mut si = ScriptInterpreter::new(&opts.script)
        .wrap_err("Failed to load script")?;

    info!(
        "Loaded script lasts {:.02} s and contains {} TCs\n",
        si.get_duration(),
        si.get_num_tcs()
    );

    // ---- INITIALISE MODULES ----

    info!("Initialising modules...");

    let sim_params: sim::Params = util::params::load("sim.toml")
        .wrap_err("Could not load sim params")?;
    let robot = SimRobot::new(sim_params, Pose::default());
    info!("SimRobot init complete");

    let mut motion_ctrl = MotionCtrl::init(
        "motion_ctrl.toml",
        "traj_ctrl.toml",
        robot
    ).wrap_err("Failed to initialise MotionCtrl")?;
    info!("MotionCtrl init complete");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    let base_period = Duration::from_millis(motion_ctrl.params().base_period_ms);
    let mut script_ended = false;

    info!("Begining main loop\n");

    loop {

        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // ---- TELECOMMAND PROCESSING ----

        if !script_ended {
            match si.get_pending_tcs() {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        // Rejections are logged by the processor, the script
                        // carries on
                        tc_processor::exec(&mut motion_ctrl, tc).ok();
                    }
                }
                PendingTcs::EndOfScript => {
                    info!("End of TC script reached, waiting for queued orders");
                    script_ended = true;
                }
            }
        }

        // ---- MOTION CONTROL ----

        motion_ctrl.tick(base_period.as_secs_f64());

        if script_ended
            && motion_ctrl.queue_len() == 0
            && motion_ctrl.traj_ctrl().is_finished()
        {
            break;
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        match base_period.checked_sub(cycle_dur) {
            Some(d) => thread::sleep(d),
            None => warn!(
                "Cycle overran by {:.06} s",
                cycle_dur.as_secs_f64() - base_period.as_secs_f64()
            ),
        }
    }

    // ---- SHUTDOWN ----

    let pose = motion_ctrl.platform().pose();
    info!(
        "Final pose: ({:.3}, {:.3}, {:.3}), linear {:.3} m",
        pose.x_m(),
        pose.y_m(),
        pose.heading_rad,
        pose.linear_m
    );

    info!("End of execution");

    Ok(())
}
