use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): everything was extracted and written
/// - `Failure` (1): the run finished but some files could not be parsed or
///   some languages could not be written
/// - `Error` (2): the run could not proceed (bad config, missing directory)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` if any error-severity issue was reported.
    pub fn from_error_count(error_count: usize) -> Self {
        if error_count > 0 {
            ExitStatus::Failure
        } else {
            ExitStatus::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
