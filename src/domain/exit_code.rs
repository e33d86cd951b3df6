//! Process exit status policy

use super::ClearState;
use std::process::ExitCode;

/// Every exit status the tool can terminate with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitStatus {
    /// Include: all requested files registered
    Success,
    /// Include: one or more files failed
    PartialFailure,
    /// Clear: purge completed
    Purged,
    /// Clear: user declined, nothing changed
    Declined,
    /// Configuration error or unusable registry
    Fatal,
}

impl ExitStatus {
    pub const fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::PartialFailure => 100,
            ExitStatus::Purged => 34,
            ExitStatus::Declined => 2,
            ExitStatus::Fatal => 1,
        }
    }

    /// Exit status of an include batch
    pub fn for_include(attempted: usize, succeeded: usize) -> Self {
        if succeeded == attempted {
            ExitStatus::Success
        } else {
            ExitStatus::PartialFailure
        }
    }

    /// Exit status of a clear operation from its terminal state
    pub fn for_clear(state: &ClearState) -> Self {
        match state {
            ClearState::Done(_) => ExitStatus::Purged,
            ClearState::Aborted => ExitStatus::Declined,
            _ => ExitStatus::Fatal,
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(status.code() as u8)
    }
}
