use std::process::ExitCode;

use clap::Parser;
use strloc::cli::{Arguments, Command, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();
    strloc::logging::init(args.log_file.as_deref(), args.verbose());

    let result = if matches!(args.command, Some(Command::Serve)) {
        strloc::mcp::run_server().map(|()| ExitStatus::Success)
    } else {
        strloc::cli::run(args)
    };

    match result {
        Ok(status) => status.into(),
        Err(err) => {
            tracing::error!("{:?}", err);
            eprintln!("Error: {:#}", err);
            ExitStatus::Error.into()
        }
    }
}
