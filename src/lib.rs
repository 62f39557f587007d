//! Bridge between load balancer target group invocations and HTTP handlers.
//!
//! ```text
//!  AlbTargetGroupRequest ──▶ http::request ──▶ Request<Body> ──┐
//!                                                             ▼
//!                                                   Handler::serve
//!                                                             │
//!  AlbTargetGroupResponse ◀── http::response ◀── ResponseWriter┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod http;
pub mod observability;

pub use config::BridgeConfig;
pub use error::{BoxError, Error};
pub use event::{AlbTargetGroupRequest, AlbTargetGroupResponse};
pub use handler::{AlbHandler, Handler, InvocationContext, ServiceAdapter};
pub use http::{AlbResponseCollector, ResponseWriter};
