//! One-shot deferred task with an explicit cancellation handle.
//!
//! Used to undo the submit button's loading state when no completion signal
//! arrives. Arming again replaces the pending task; dropping the watchdog
//! cancels it.

use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::errors::FormError;

pub struct Watchdog {
    runtime: Handle,
    pending: Option<JoinHandle<()>>,
}

impl Watchdog {
    /// Captures the current tokio runtime. Fails outside of one.
    pub fn new() -> Result<Self, FormError> {
        let runtime = Handle::try_current().map_err(|_| FormError::NoRuntime)?;
        Ok(Self::with_runtime(runtime))
    }

    pub fn with_runtime(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: None,
        }
    }

    /// Runs `on_fire` after `delay` unless cancelled first.
    pub fn arm<F>(&mut self, delay: Duration, on_fire: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.pending = Some(self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            on_fire();
        }));
    }

    /// Cancels the pending task. Returns true if one was still waiting.
    pub fn cancel(&mut self) -> bool {
        match self.pending.take() {
            Some(task) => {
                let was_waiting = !task.is_finished();
                task.abort();
                was_waiting
            }
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }
}

impl Drop for Watchdog {
    fn drop(&mut self) {
        self.cancel();
    }
}
