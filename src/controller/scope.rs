//! Page lifecycle scope.
//!
//! A scope is open while its page is displayed. Closing it aborts loads that
//! are still waiting on the network, and any result that arrives afterwards is
//! dropped instead of being written into a page nobody is looking at.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct PageScope {
    closed: Arc<watch::Sender<bool>>,
}

impl Default for PageScope {
    fn default() -> Self {
        Self::new()
    }
}

impl PageScope {
    pub fn new() -> Self {
        let (closed, _) = watch::channel(false);
        Self {
            closed: Arc::new(closed),
        }
    }

    /// Tear the page down. Idempotent.
    pub fn close(&self) {
        self.closed.send_replace(true);
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Fail with `Closed` if the page is gone.
    pub fn ensure_open(&self) -> Result<(), AppError> {
        if self.is_closed() {
            return Err(AppError::Closed);
        }
        Ok(())
    }

    /// Run `work` until it finishes or the scope closes, whichever comes first.
    pub async fn run<T, F>(&self, work: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, AppError>>,
    {
        self.ensure_open()?;
        let mut closed = self.closed.subscribe();

        tokio::select! {
            result = work => result,
            _ = closed.wait_for(|closed| *closed) => Err(AppError::Closed),
        }
    }
}
