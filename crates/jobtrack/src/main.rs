//! # Jobtrack CLI
//!
//! The tracker's handlers normally run behind an API gateway. This binary
//! runs the same handlers locally: it reads a gateway-style event, invokes the
//! matching handler against a file-backed table, and prints the gateway-style
//! response. The binary is intentionally thin; everything from
//! `TrackerApi` inward lives in the `jobtrackapp` library.
//!
//! ```text
//! $ echo '{"httpMethod":"GET","path":"/profiles",
//!          "requestContext":{"authorizer":{"User-Id":"u-1"}}}' | jobtrack invoke
//! {"statusCode":404,"headers":{...},"body":"Profile not found for user: u-1"}
//! ```
//!
//! Logs go to stderr (`RUST_LOG`, or `-v` for debug); stdout carries only the
//! response.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
