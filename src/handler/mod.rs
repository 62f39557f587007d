//! Invocation dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! AlbTargetGroupRequest + InvocationContext
//!     → alb.rs (AlbHandler: translate, run delegate, finalize)
//!     → Handler::serve (delegate writes into the collector)
//!     → adapter.rs (ServiceAdapter bridges tower services / axum routers)
//!     → AlbTargetGroupResponse
//! ```
//!
//! # Design Decisions
//! - One invocation runs strictly in sequence: translate → serve → finish
//! - A failed translation or handler aborts with no partial reply
//! - No state survives between invocations

use std::future::Future;

use axum::body::Body;
use axum::http::Request;

use crate::error::BoxError;
use crate::http::ResponseWriter;

pub mod adapter;
pub mod alb;
pub mod context;

pub use adapter::ServiceAdapter;
pub use alb::AlbHandler;
pub use context::InvocationContext;

/// Delegate that produces application behavior for a translated request.
///
/// Implementations may use `async fn serve(...)` directly.
pub trait Handler: Send + Sync {
    fn serve(
        &self,
        cx: &InvocationContext,
        req: Request<Body>,
        w: &mut dyn ResponseWriter,
    ) -> impl Future<Output = Result<(), BoxError>> + Send;
}
