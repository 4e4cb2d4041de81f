/// Command line frontend
///
/// Parses the arguments, opens the chosen store and passes the habit on to the
/// controller. All output goes to the writer handed to `run`, so the same code
/// drives both the binary and the tests.

use std::io::Write;
use std::path::PathBuf;

use clap::{CommandFactory, Parser};

use crate::config::{default_store_dir, TrackerConfig};
use crate::controller::Controller;
use crate::storage::StoreKind;
use crate::{ErrorKind, TrackerError};

/// Argument that lists every habit instead of logging one
pub const ALL_HABITS: &str = "all";

/// Command line arguments for the habit tracker
#[derive(Parser, Debug, Clone)]
#[command(
    name = "habit",
    author,
    version,
    about = "habit is an application to assist you in building habits",
    long_about = None
)]
pub struct Cli {
    /// Habit to create or log, or `all` to list every habit
    pub habit: Option<String>,

    /// Frequency of a new habit: daily, weekly
    #[arg(short, long, default_value = "daily")]
    pub frequency: String,

    /// Store backend for the habit tracker
    #[arg(short, long, value_enum, default_value_t = StoreKind::Db)]
    pub store: StoreKind,

    /// Store directory (defaults to the home directory)
    #[arg(short = 'd', long, env = "HABIT_DIR")]
    pub dir: Option<PathBuf>,

    /// Serve habits over HTTP on this address instead
    #[arg(long, value_name = "ADDRESS")]
    pub serve: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Enable verbose output (implies debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Store selection derived from the flags
    pub fn config(&self) -> TrackerConfig {
        let dir = self.dir.clone().unwrap_or_else(default_store_dir);
        TrackerConfig::new(self.store, dir)
    }

    /// Log level for the `habit_tracker` target
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.debug {
            "info"
        } else {
            "warn"
        }
    }
}

/// Usage text shown when the arguments don't describe anything to do
pub fn usage() -> String {
    Cli::command().render_help().to_string()
}

/// Run one CLI invocation, writing everything the user sees to `output`
///
/// Invalid input is reported with the usage text. The error is still returned
/// so the caller can choose an exit status.
pub fn run(cli: &Cli, output: &mut impl Write) -> Result<(), TrackerError> {
    let Some(habit) = cli.habit.as_deref() else {
        writeln!(output, "{}", usage())?;
        return Ok(());
    };

    let result = execute(cli, habit, output);
    if let Err(e) = &result {
        writeln!(output, "{}", e)?;
        if e.kind() == ErrorKind::InvalidInput {
            writeln!(output, "{}", usage())?;
        }
    }
    result
}

fn execute(cli: &Cli, habit: &str, output: &mut impl Write) -> Result<(), TrackerError> {
    let store = cli.config().open_store()?;
    let mut controller = Controller::new(store);

    if habit == ALL_HABITS {
        writeln!(output, "{}", controller.summary()?)?;
        return Ok(());
    }

    let habit = controller.handle(habit, &cli.frequency)?;
    writeln!(output, "{}", habit)?;
    Ok(())
}
