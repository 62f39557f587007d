//! Per-invocation context.
//!
//! Carries the invocation's request ID and a cancellation token. A clone is
//! attached to every translated request as an extension so that delegate code
//! reading the body or doing its own I/O can observe cancellation.

use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Context shared by one invocation's translator, handler and collector.
#[derive(Debug, Clone)]
pub struct InvocationContext {
    request_id: String,
    cancellation: CancellationToken,
}

impl InvocationContext {
    pub fn new(request_id: impl Into<String>, cancellation: CancellationToken) -> Self {
        Self {
            request_id: request_id.into(),
            cancellation,
        }
    }

    /// Context with a generated request ID and a token nobody else holds.
    pub fn detached() -> Self {
        Self::new(Uuid::new_v4().to_string(), CancellationToken::new())
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }
}

impl Default for InvocationContext {
    fn default() -> Self {
        Self::detached()
    }
}
