//! Per-request operator context.

use tokio::sync::watch;

/// Credentials and cancellation for the caller on whose behalf requests run.
///
/// The bearer token is opaque to this crate. It is attached to each request as
/// an `Authorization: Bearer` header and never logged.
#[derive(Clone, Default)]
pub struct OperatorContext {
    bearer_token: Option<String>,
    cancel: Option<watch::Receiver<bool>>,
}

impl OperatorContext {
    /// Create a context carrying a bearer token.
    #[must_use]
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: Some(bearer_token.into()),
            cancel: None,
        }
    }

    /// Create a context without credentials.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Attach a cancellation signal. Flipping the sender to `true` aborts the
    /// in-flight request.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Bearer token, if any.
    #[must_use]
    pub fn bearer_token(&self) -> Option<&str> {
        self.bearer_token.as_deref()
    }

    /// Returns `true` if the cancellation signal has already fired.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Resolve once the cancellation signal fires.
    ///
    /// Never resolves when no signal is attached or the sender is dropped
    /// without cancelling.
    pub async fn cancelled(&self) {
        if let Some(rx) = &self.cancel {
            let mut rx = rx.clone();
            if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                return;
            }
        }
        std::future::pending::<()>().await;
    }
}

impl std::fmt::Debug for OperatorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperatorContext")
            .field(
                "bearer_token",
                &self.bearer_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}
