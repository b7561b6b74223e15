use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): every locale was processed and written
/// - `Failure` (1): a configuration error, no resolvable locales, or a failed write
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
        }
    }
}
