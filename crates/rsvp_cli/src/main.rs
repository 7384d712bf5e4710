//! Command-line surface for wedding RSVP intake and admin reports.
//!
//! # Responsibility
//! - Map subcommands onto core Intake and Aggregator calls.
//! - Gate admin subcommands behind the configured admin credential.
//! - Resolve configuration from flags with environment fallbacks.

mod commands;
mod gate;

use clap::{Args, Parser, Subcommand};
use commands::admin::ExportConfig;
use commands::submit::SubmitConfig;
use commands::CommandError;
use gate::AdminGate;
use log::info;
use rsvp_core::{
    default_log_level, flush_logging, init_logging, parse_log_level, LoggingError, RsvpSubmission,
};
use std::path::PathBuf;

const DEFAULT_DB_PATH: &str = "wedding_rsvp.sqlite3";

/// Wedding RSVP intake and admin reports
#[derive(Parser)]
#[command(name = "wedding-rsvp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = "WEDDING_RSVP_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true, env = "WEDDING_RSVP_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "WEDDING_RSVP_LOG_DIR")]
    log_dir: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit one guest response
    Submit {
        /// Primary guest's full name
        #[arg(long)]
        name: String,
        /// Event to attend (reception|muhurtham); repeat for both
        #[arg(long = "event")]
        events: Vec<String>,
        /// Guest status (solo|plus_one)
        #[arg(long)]
        status: String,
        /// Companion's name, required with plus_one
        #[arg(long)]
        plus_one: Option<String>,
    },
    /// List every response as JSON (admin)
    List(AdminArgs),
    /// Show summary counters as JSON (admin)
    Stats(AdminArgs),
    /// Export every response as CSV (admin)
    Export {
        #[command(flatten)]
        admin: AdminArgs,
        /// Output file, `-` for stdout; defaults to wedding_rsvps.csv
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Args)]
struct AdminArgs {
    /// Admin credential presented by the caller
    #[arg(long, env = "WEDDING_RSVP_ADMIN_CREDENTIAL", hide_env_values = true)]
    credential: Option<String>,

    /// Configured admin secret
    #[arg(
        long = "admin-password",
        env = "WEDDING_RSVP_ADMIN_PASSWORD",
        hide = true,
        hide_env_values = true
    )]
    admin_password: Option<String>,
}

impl AdminArgs {
    fn authorize(self) -> Result<gate::AdminAccess, CommandError> {
        let gate = AdminGate::new(self.admin_password);
        Ok(gate.authorize(self.credential.as_deref())?)
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(err) = start_logging(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        eprintln!("error: {err}");
        std::process::exit(commands::EXIT_FAILED);
    }

    let exit_code = match run(cli.command, cli.db) {
        Ok(()) => 0,
        Err(err) => {
            report(&err);
            err.exit_code()
        }
    };

    flush_logging();
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
}

/// File logging is on only with a log dir. A level is validated even
/// without one, then ignored with a warning.
fn start_logging(level: Option<&str>, log_dir: Option<&str>) -> Result<(), LoggingError> {
    let level = level.map(parse_log_level).transpose()?;
    let Some(log_dir) = log_dir else {
        if let Some(level) = level {
            eprintln!("warning: log level `{level}` has no effect without --log-dir");
        }
        return Ok(());
    };
    init_logging(level.unwrap_or_else(default_log_level), log_dir)
}

fn report(err: &CommandError) {
    match err {
        CommandError::Rejected(reason) => {
            let body = serde_json::json!({
                "error": reason.code(),
                "message": reason.message(),
            });
            println!("{body}");
        }
        other => eprintln!("error: {other}"),
    }
}

fn run(command: Commands, db_path: PathBuf) -> Result<(), CommandError> {
    match command {
        Commands::Submit {
            name,
            events,
            status,
            plus_one,
        } => {
            info!("event=cli_command module=cli command=submit");
            commands::submit::run(&SubmitConfig {
                db_path,
                submission: RsvpSubmission {
                    full_name: name,
                    attending_events: events,
                    guest_status: status,
                    plus_one_name: plus_one,
                },
            })
        }
        Commands::List(admin) => {
            info!("event=cli_command module=cli command=list");
            let access = admin.authorize()?;
            commands::admin::list(&access, &db_path)
        }
        Commands::Stats(admin) => {
            info!("event=cli_command module=cli command=stats");
            let access = admin.authorize()?;
            commands::admin::stats(&access, &db_path)
        }
        Commands::Export { admin, out } => {
            info!("event=cli_command module=cli command=export");
            let access = admin.authorize()?;
            commands::admin::export(&access, &ExportConfig { db_path, out })
        }
    }
}
