//! Deferred computer moves.
//!
//! The engine never sleeps. When a human move hands the turn to the
//! computer, the driver asks [`TurnScheduler`] for a [`ComputerTurn`] after a
//! short pause. Only one tick is ever pending: scheduling again or calling
//! [`TurnScheduler::cancel`] aborts the previous task. The tick carries its
//! session id, so one that slipped into the channel before a reset is still
//! refused by `GameEngine::computer_move_for`.

use std::time::Duration;
use tictactoe_engine::SessionId;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, instrument};

/// Signal that the computer may move in `session_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComputerTurn {
    /// Session the move was scheduled for.
    pub session_id: SessionId,
}

/// Holds at most one pending computer move.
#[derive(Debug)]
pub struct TurnScheduler {
    tx: UnboundedSender<ComputerTurn>,
    pending: Option<JoinHandle<()>>,
}

impl TurnScheduler {
    /// Creates a scheduler that delivers ticks on `tx`.
    pub fn new(tx: UnboundedSender<ComputerTurn>) -> Self {
        Self { tx, pending: None }
    }

    /// Sends a [`ComputerTurn`] after `delay`, replacing any pending one.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn schedule(&mut self, session_id: SessionId, delay: Duration) {
        if self.cancel() {
            debug!("Superseded pending computer move");
        }

        let tx = self.tx.clone();
        self.pending = Some(tokio::spawn(async move {
            sleep(delay).await;
            if tx.send(ComputerTurn { session_id }).is_err() {
                debug!(%session_id, "Receiver gone, dropping computer move");
            }
        }));
    }

    /// Aborts the pending move. Returns true if one was still waiting.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                debug!("Cancelled pending computer move");
                true
            }
            _ => false,
        }
    }

    /// True while a scheduled move has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for TurnScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}
