//! Background list loading
//!
//! A loader runs one unit of work on its own thread and hands the result back
//! to whichever thread owns the dialog, through a channel that thread polls.
//! Disposing a loader detaches it: a result that arrives afterwards is never
//! observed.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::Error;

/// Where a background load currently stands
#[derive(Debug)]
pub enum LoadState<T> {
    /// Still running
    Pending,
    /// Finished successfully; handed out exactly once
    Ready(T),
    /// The work failed, or the worker went away without an answer
    Failed(Error),
    /// A result was already handed out
    Consumed,
    /// The loader was disposed; any result is discarded
    Disposed,
}

/// Handle to a single background load
#[derive(Debug)]
pub struct Loader<T> {
    what: &'static str,
    receiver: Receiver<anyhow::Result<T>>,
    cancelled: Arc<AtomicBool>,
    consumed: bool,
}

impl<T: Send + 'static> Loader<T> {
    /// Start `work` on a background thread
    ///
    /// `what` names the list being loaded, for logs and errors.
    pub fn spawn<F>(what: &'static str, work: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel();
        let cancelled = Arc::new(AtomicBool::new(false));
        let token = Arc::clone(&cancelled);

        let spawned = thread::Builder::new()
            .name(format!("load-{what}"))
            .spawn(move || {
                let result = work();
                if token.load(Ordering::Acquire) {
                    debug!(what, "Load finished after dispose, dropping result");
                    return;
                }
                // The receiver may be gone if the handle was dropped meanwhile
                let _ = sender.send(result);
            });

        // On spawn failure the sender is dropped with the closure, so the
        // first poll reports a LoadFailure.
        if let Err(e) = spawned {
            warn!(what, error = %e, "Failed to spawn loader thread");
        }

        debug!(what, "Load started");
        Self {
            what,
            receiver,
            cancelled,
            consumed: false,
        }
    }
}

impl<T> Loader<T> {
    /// Name of the list this loader fetches
    #[must_use]
    pub const fn what(&self) -> &'static str {
        self.what
    }

    /// Whether [`Loader::dispose`] has been called
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Detach from the background work
    ///
    /// Idempotent. After this, no poll ever yields the result.
    pub fn dispose(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            debug!(what = self.what, "Loader disposed");
        }
    }

    /// Non-blocking poll
    pub fn try_take(&mut self) -> LoadState<T> {
        if self.is_disposed() {
            return LoadState::Disposed;
        }
        if self.consumed {
            return LoadState::Consumed;
        }

        match self.receiver.try_recv() {
            Ok(result) => self.deliver(result),
            Err(TryRecvError::Empty) => LoadState::Pending,
            Err(TryRecvError::Disconnected) => self.worker_gone(),
        }
    }

    /// Blocking poll, giving up after `timeout`
    pub fn wait(&mut self, timeout: Duration) -> LoadState<T> {
        if self.is_disposed() {
            return LoadState::Disposed;
        }
        if self.consumed {
            return LoadState::Consumed;
        }

        match self.receiver.recv_timeout(timeout) {
            Ok(_) if self.is_disposed() => LoadState::Disposed,
            Ok(result) => self.deliver(result),
            Err(RecvTimeoutError::Timeout) => LoadState::Pending,
            Err(RecvTimeoutError::Disconnected) => self.worker_gone(),
        }
    }

    fn deliver(&mut self, result: anyhow::Result<T>) -> LoadState<T> {
        self.consumed = true;
        match result {
            Ok(value) => {
                debug!(what = self.what, "Load finished");
                LoadState::Ready(value)
            }
            Err(e) => LoadState::Failed(Error::LoadFailure {
                what: self.what,
                message: format!("{e:#}"),
            }),
        }
    }

    fn worker_gone(&mut self) -> LoadState<T> {
        self.consumed = true;
        LoadState::Failed(Error::LoadFailure {
            what: self.what,
            message: "loader exited without a result".to_string(),
        })
    }
}

impl<T> Drop for Loader<T> {
    fn drop(&mut self) {
        self.dispose();
    }
}
