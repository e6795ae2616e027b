use anyhow::{Result, bail};

use super::{
    args::{Arguments, Command},
    commands::{extract::extract, init::init, lookup::lookup},
    exit_status::ExitStatus,
};

/// Dispatch to the command handler.
///
/// `serve` is handled by `main` before this is called.
pub fn run(args: Arguments) -> Result<ExitStatus> {
    let Some(Arguments { command, .. }) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    match command {
        Some(Command::Extract(cmd)) => extract(cmd),
        Some(Command::Lookup(cmd)) => lookup(cmd),
        Some(Command::Init) => init(),
        Some(Command::Serve) => bail!("Serve command should be handled before run()"),
        None => bail!("No command provided. Use --help to see available commands."),
    }
}
