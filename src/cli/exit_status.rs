use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing left to do
/// - `Failure` (1): untranslated keys remain, or a batch was cancelled
/// - `Error` (2): the command could not run (bad config, unreadable store,
///   failed write)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// `Failure` when `found` is true, `Success` otherwise.
    pub fn from_findings(found: bool) -> Self {
        if found {
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
