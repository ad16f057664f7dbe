//! CLI layer: argument parsing (`setup.rs`) and command handling (`commands.rs`).

mod commands;
mod setup;

pub use commands::run;
