//! Scheduled tasks
//!
//! Periodic event sources for the session loop. A [`PeriodicTask`] owns a
//! ticker thread that posts a fixed event to a channel at a fixed
//! interval until cancelled. Cancellation joins the thread, so after
//! [`cancel`](PeriodicTask::cancel) returns no further events arrive.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{bounded, RecvTimeoutError, Sender};

use crate::error::Result;

/// Handle to a running ticker thread
pub struct PeriodicTask {
    /// Name for thread naming and logs
    name: String,

    /// Signals the ticker to exit before its next fire
    stop: Sender<()>,

    handle: Option<JoinHandle<()>>,
}

impl PeriodicTask {
    /// Spawn a ticker that sends `event` to `events` every `interval`
    ///
    /// The first event fires one full interval after spawn. The ticker
    /// exits on its own if the event receiver goes away.
    pub fn spawn<T>(
        name: impl Into<String>,
        interval: Duration,
        events: Sender<T>,
        event: T,
    ) -> Result<Self>
    where
        T: Clone + Send + 'static,
    {
        let name = name.into();
        let (stop_tx, stop_rx) = bounded::<()>(1);

        let handle = thread::Builder::new()
            .name(format!("tick-{}", name))
            .spawn(move || loop {
                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => {
                        if events.send(event.clone()).is_err() {
                            return; // receiver gone, session is over
                        }
                    }
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => return,
                }
            })?;

        tracing::debug!("Periodic task '{}' started ({}ms)", name, interval.as_millis());

        Ok(Self {
            name,
            stop: stop_tx,
            handle: Some(handle),
        })
    }

    /// Stop the ticker and wait for its thread to exit
    pub fn cancel(self) {
        tracing::debug!("Periodic task '{}' cancelled", self.name);
        // Drop stops and joins
    }
}

impl Drop for PeriodicTask {
    fn drop(&mut self) {
        let _ = self.stop.try_send(());
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}
