use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "jobtrack", version)]
#[command(about = "Run the job application tracker handlers locally", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Data directory holding the table file and jobtrack.toml
    #[arg(long, global = true, value_name = "DIR")]
    pub data: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Invoke a handler with a gateway-style event
    #[command(alias = "i")]
    Invoke {
        /// Handler to run (e.g. get-profile); routed by method and path when omitted
        #[arg(long, short = 'H')]
        handler: Option<String>,

        /// Event file, or - for stdin
        #[arg(long, short, default_value = "-")]
        event: String,

        /// Pretty-print the response
        #[arg(long)]
        pretty: bool,
    },

    /// Create an empty table file if none exists
    Init,

    /// Show the resolved configuration
    Config,

    /// List handlers and the endpoints they serve
    Routes,
}
