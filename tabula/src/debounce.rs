//! Input debouncing.
//!
//! Two forms of the same coalescing policy: [`Debouncer`] is driven by an
//! injected clock and is what [`ViewContext`](crate::ViewContext) uses;
//! [`SearchInput`] runs the policy on a tokio task for hosts that already
//! have an event loop, and a context follows it with
//! [`ViewContext::follow_search`](crate::ViewContext::follow_search). Debouncing only rate-limits derivation. Flushing
//! immediately always yields the same committed value.

use std::time::{Duration, Instant};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Default quiet window before a raw search query is committed.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Coalesces a burst of values into the last one, after a quiet window.
///
/// Each [`push`](Self::push) replaces the pending value and restarts the
/// window, which is how a new keystroke cancels the previous timer.
#[derive(Debug, Clone)]
pub struct Debouncer<V> {
    window: Duration,
    pending: Option<(V, Instant)>,
}

impl<V> Debouncer<V> {
    /// Creates a debouncer with the given quiet window.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a new raw value at `now`.
    pub fn push(&mut self, value: V, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Returns `true` if a value is waiting to be committed.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the instant at which the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.window)
    }

    /// Takes the pending value if its window has elapsed by `now`.
    pub fn poll(&mut self, now: Instant) -> Option<V> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.flush(),
            _ => None,
        }
    }

    /// Takes the pending value regardless of the window.
    pub fn flush(&mut self) -> Option<V> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Drops the pending value.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl<V> Default for Debouncer<V> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

/// Debounced search box running on a tokio task.
///
/// Raw keystroke states go in through [`send`](Self::send); committed queries
/// come out on a `watch` channel once the input has been quiet for the
/// window. Dropping the input (or calling [`close`](Self::close)) flushes the
/// last pending value before the task ends.
///
/// Must be created inside a tokio runtime.
#[derive(Debug)]
pub struct SearchInput {
    raw: mpsc::UnboundedSender<String>,
    committed: watch::Receiver<String>,
    task: JoinHandle<()>,
}

impl SearchInput {
    /// Spawns the debounce task.
    pub fn spawn(window: Duration) -> Self {
        let (raw_tx, raw_rx) = mpsc::unbounded_channel();
        let (committed_tx, committed_rx) = watch::channel(String::new());
        let task = tokio::spawn(run_debounce(raw_rx, committed_tx, window));
        Self {
            raw: raw_tx,
            committed: committed_rx,
            task,
        }
    }

    /// Feeds the current raw text of the search box.
    ///
    /// Returns `false` if the task has already stopped.
    pub fn send(&self, raw: impl Into<String>) -> bool {
        self.raw.send(raw.into()).is_ok()
    }

    /// Returns a receiver of committed queries.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.committed.clone()
    }

    /// Returns the most recently committed query.
    pub fn committed(&self) -> String {
        self.committed.borrow().clone()
    }

    /// Closes the input and waits for the pending value to be flushed.
    pub async fn close(self) -> String {
        let Self {
            raw,
            committed,
            task,
        } = self;
        drop(raw);
        if let Err(e) = task.await {
            log::warn!("search debounce task ended abnormally: {}", e);
        }
        committed.borrow().clone()
    }
}

async fn run_debounce(
    mut raw: mpsc::UnboundedReceiver<String>,
    committed: watch::Sender<String>,
    window: Duration,
) {
    let mut pending: Option<String> = None;
    loop {
        match pending.take() {
            None => match raw.recv().await {
                Some(value) => pending = Some(value),
                None => break,
            },
            Some(value) => {
                tokio::select! {
                    next = raw.recv() => match next {
                        Some(newer) => pending = Some(newer),
                        None => {
                            publish(&committed, value);
                            break;
                        }
                    },
                    _ = tokio::time::sleep(window) => publish(&committed, value),
                }
            }
        }
    }
}

fn publish(committed: &watch::Sender<String>, value: String) {
    log::debug!("search query committed: {:?}", value);
    committed.send_if_modified(|current| {
        if *current == value {
            false
        } else {
            *current = value;
            true
        }
    });
}
