//! Wait policy for long-running provider operations.

use pitchcraft_error::{GenerationError, GenerationErrorKind};
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Fixed wait between operation status queries.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// How long to wait between status queries, and when to give up.
///
/// The default polls every ten seconds with no deadline and no
/// cancellation, so a stalled provider blocks the caller indefinitely.
/// Set [`PollPolicy::with_max_wait`] or attach a [`CancelHandle`] to bound it.
///
/// # Examples
///
/// ```
/// use pitchcraft_interface::PollPolicy;
/// use std::time::Duration;
///
/// let (policy, cancel) = PollPolicy::default()
///     .with_max_wait(Duration::from_secs(600))
///     .cancellable();
/// assert_eq!(policy.interval(), Duration::from_secs(10));
/// cancel.cancel();
/// ```
#[derive(Debug, Clone)]
pub struct PollPolicy {
    interval: Duration,
    max_wait: Option<Duration>,
    cancel: Option<watch::Receiver<bool>>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

impl PollPolicy {
    /// Poll every `interval`, with no deadline.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            max_wait: None,
            cancel: None,
        }
    }

    /// Give up with `Timeout` once `max_wait` has elapsed since submission.
    pub fn with_max_wait(mut self, max_wait: Duration) -> Self {
        self.max_wait = Some(max_wait);
        self
    }

    /// Attach a cancellation signal and return the handle that fires it.
    pub fn cancellable(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    /// Interval between status queries.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Maximum total wait, if bounded.
    pub fn max_wait(&self) -> Option<Duration> {
        self.max_wait
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Sleep one interval before the next status query.
    ///
    /// `started` is when the operation was submitted.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` if the signal fires first, or `Timeout` if the
    /// deadline passes first.
    pub async fn wait(&self, started: Instant) -> Result<(), GenerationError> {
        self.guard(started, async {
            tokio::time::sleep(self.interval).await;
            Ok(())
        })
        .await
    }

    /// Run `work` unless the deadline or the cancellation signal comes first.
    ///
    /// Status queries and downloads go through here so a stalled request
    /// cannot outlive the policy. `work` is dropped when it loses the race.
    ///
    /// # Errors
    ///
    /// Returns `Cancelled` or `Timeout` when those win, otherwise the
    /// result of `work`.
    pub async fn guard<T, F>(&self, started: Instant, work: F) -> Result<T, GenerationError>
    where
        F: Future<Output = Result<T, GenerationError>>,
    {
        if self.is_cancelled() {
            return Err(GenerationError::new(GenerationErrorKind::Cancelled));
        }

        let deadline = self.max_wait.map(|max| started + max);
        if let Some(deadline) = deadline
            && Instant::now() >= deadline
        {
            return Err(self.timeout(started));
        }

        let expiry = async {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = work => result,
            _ = expiry => Err(self.timeout(started)),
            _ = Self::cancelled(self.cancel.clone()) => {
                Err(GenerationError::new(GenerationErrorKind::Cancelled))
            }
        }
    }

    fn timeout(&self, started: Instant) -> GenerationError {
        GenerationError::new(GenerationErrorKind::Timeout {
            waited_secs: started.elapsed().as_secs(),
        })
    }

    async fn cancelled(rx: Option<watch::Receiver<bool>>) {
        match rx {
            // A dropped handle can never cancel
            Some(mut rx) => {
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending().await,
        }
    }
}

/// Fires the cancellation signal of a [`PollPolicy`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}
