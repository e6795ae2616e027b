//! Command-line interface layer.
//!
//! Core logic lives in `crate::core`; this module parses arguments, runs the
//! command and prints the result.

pub mod args;
pub mod commands;
pub mod exit_status;
pub mod report;
mod run;

pub use args::{Arguments, Command};
pub use exit_status::ExitStatus;
pub use run::run;
