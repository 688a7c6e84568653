use crate::{
    algebra::DOWN_TRIGGER,
    domain::{HostId, TriggerId},
};
use clap::{Parser, Subcommand, ValueEnum};

/// Command-line arguments for `zabbix-dependencies`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "zabbix-dependencies",
    version,
    about = "Create Zabbix trigger dependencies for one host or for whole branch sites.",
    long_about = None
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(long, value_enum, value_name = "LEVEL", default_value = "info", global = true)]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Create a dependency from each eligible trigger on HOST_ID to PARENT_TRIGGER_ID.
    Run {
        /// Numeric id of the host whose triggers become dependent.
        host_id: HostId,

        /// Numeric id of the trigger the others will depend on.
        parent_trigger_id: TriggerId,

        /// Only consider enabled triggers.
        #[arg(long)]
        enabled_only: bool,

        /// How the final report is printed to stdout.
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
    /// Make the Down trigger of every switch in SWITCH_GROUP depend on the Down
    /// triggers of its site's hosts in the parent group.
    Branch {
        /// Host groups holding the site switches.
        #[arg(required = true, value_name = "SWITCH_GROUP")]
        groups: Vec<String>,

        /// Host group holding the site firewalls.
        #[arg(long, value_name = "GROUP")]
        parent_group: String,

        /// Substring that selects the availability trigger on every host.
        #[arg(long, default_value = DOWN_TRIGGER)]
        description: String,

        /// How the final report is printed to stdout.
        #[arg(long, value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}
