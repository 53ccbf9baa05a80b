use std::future::Future;
use std::sync::Arc;

use domain::Error;
use tokio::sync::watch;

/// Lifetime of one screen. Requests run through [`ScreenScope::run`] stop when it is cancelled.
///
/// Clones share the same lifetime.
#[derive(Clone, Debug)]
pub struct ScreenScope {
    cancelled: Arc<watch::Sender<bool>>,
}

impl Default for ScreenScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ScreenScope {
    pub fn new() -> Self {
        let (cancelled, _) = watch::channel(false);
        Self { cancelled: Arc::new(cancelled) }
    }

    pub fn cancel(&self) {
        self.cancelled.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.cancelled.borrow()
    }

    /// Drives `fut` unless the scope is cancelled first, in which case `fut` is dropped
    /// mid-flight and `Cancelled` is returned.
    pub async fn run<T, F>(&self, operation: &'static str, fut: F) -> Result<T, Error>
    where
        F: Future<Output = Result<T, Error>>,
    {
        let mut cancelled = self.cancelled.subscribe();
        tokio::select! {
            biased;
            _ = cancelled.wait_for(|c| *c) => {
                tracing::debug!(operation, "cancelled with its screen");
                Err(Error::Cancelled { operation })
            }
            result = fut => result,
        }
    }
}
