//! # Command Handling
//!
//! The only place that touches stdout, stdin, the process environment for
//! logging, and exit codes. Each subcommand builds the tracker context,
//! calls into the library, and prints the result.
//!
//! An `invoke` whose handler answers 4xx/5xx still exits 0: the response was
//! produced and printed. Non-zero exits are reserved for failures to produce
//! a response at all (unreadable event, unknown handler, bad config).

use super::setup::{Cli, Commands};
use anyhow::{bail, Context, Result};
use clap::Parser;
use jobtrackapp::api::Route;
use jobtrackapp::http::ApiRequest;
use jobtrackapp::init::{initialize, TrackerContext};
use std::fs;
use std::io::Read;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Commands::Routes = cli.command {
        handle_routes();
        return Ok(());
    }

    let ctx = initialize(cli.data.as_deref()).context("failed to initialize tracker")?;
    match cli.command {
        Commands::Invoke {
            handler,
            event,
            pretty,
        } => handle_invoke(&ctx, handler.as_deref(), &event, pretty),
        Commands::Init => handle_init(&ctx),
        Commands::Config => handle_config(&ctx),
        Commands::Routes => Ok(()),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn read_event(source: &str) -> Result<String> {
    if source == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read event from stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(source).with_context(|| format!("failed to read event file {source}"))
    }
}

fn handle_invoke(
    ctx: &TrackerContext,
    handler: Option<&str>,
    source: &str,
    pretty: bool,
) -> Result<()> {
    let text = read_event(source)?;
    let request: ApiRequest = serde_json::from_str(&text).context("event is not a valid request")?;

    let response = match handler {
        Some(name) => {
            let Some(route) = Route::from_name(name) else {
                let known: Vec<_> = Route::ALL.iter().map(Route::name).collect();
                bail!("unknown handler {name:?} (expected one of: {})", known.join(", "));
            };
            debug!(%route, "invoking handler");
            ctx.api.handle(route, &request)
        }
        None => ctx.api.dispatch(&request),
    };

    let output = if pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{output}");
    Ok(())
}

fn handle_init(ctx: &TrackerContext) -> Result<()> {
    let table = ctx.table();
    if table.create_if_missing()? {
        println!("Initialized table at {}", table.path().display());
    } else {
        println!("Table already exists at {}", table.path().display());
    }
    Ok(())
}

fn handle_config(ctx: &TrackerContext) -> Result<()> {
    println!("data_dir = {}", ctx.data_dir.display());
    let values = serde_json::to_value(ctx.config())?;
    if let serde_json::Value::Object(map) = values {
        for (key, value) in &map {
            println!("{key} = {value}");
        }
    }
    Ok(())
}

fn handle_routes() {
    for route in Route::ALL {
        let (method, path) = route.endpoint();
        println!("{:<20} {:<8} {}", route.name(), method, path);
    }
}
