use super::exit_code::ExitStatus;
use super::{ClearRequest, OperationResult};
use crate::registry::RegistryGateway;
use tracing::{debug, info, warn};

/// States of the purge confirmation protocol
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClearState {
    AwaitingConfirmation,
    Confirmed,
    Declined,
    Purging,
    /// Purge completed, with the number of entries removed
    Done(usize),
    /// User declined; the registry was not touched
    Aborted,
    /// The store could not be purged
    Failed(String),
}

impl ClearState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ClearState::Done(_) | ClearState::Aborted | ClearState::Failed(_)
        )
    }
}

/// Removes every entry from the registry after confirmation
#[derive(Debug, Default, Clone, Copy)]
pub struct ClearOperation;

impl ClearOperation {
    /// Drives the confirmation state machine to a terminal state.
    ///
    /// `confirm` is asked at most once and only when `force` is off; it owns
    /// any re-prompting. `purge_all` is called at most once.
    pub fn run<R, C>(req: &ClearRequest, gateway: &mut R, confirm: C) -> OperationResult
    where
        R: RegistryGateway + ?Sized,
        C: FnOnce() -> bool,
    {
        let mut confirm = Some(confirm);
        let mut state = if req.force {
            ClearState::Purging
        } else {
            ClearState::AwaitingConfirmation
        };

        while !state.is_terminal() {
            debug!(?state, "clear");
            state = match state {
                ClearState::AwaitingConfirmation => match confirm.take().map(|ask| ask()) {
                    Some(true) => ClearState::Confirmed,
                    _ => ClearState::Declined,
                },
                ClearState::Confirmed => ClearState::Purging,
                ClearState::Declined => ClearState::Aborted,
                ClearState::Purging => match gateway.purge_all() {
                    Ok(removed) => {
                        info!(removed, "recent files cleared");
                        ClearState::Done(removed)
                    }
                    Err(e) => {
                        warn!(error = %e, "purge failed");
                        ClearState::Failed(e.to_string())
                    }
                },
                terminal => terminal,
            };
        }

        OperationResult {
            attempted: 0,
            succeeded: 0,
            exit_status: ExitStatus::for_clear(&state),
            per_file: Vec::new(),
            clear_state: Some(state),
        }
    }
}
