//! HTTP translation subsystem.
//!
//! # Data Flow
//! ```text
//! AlbTargetGroupRequest
//!     → request.rs (query, headers, host/scheme/client, body)
//!     → Request<Body> handed to the delegate handler
//!     → response.rs (collector the handler writes into)
//!     → sniff.rs (Content-Type when the handler set none)
//!     → AlbTargetGroupResponse
//! ```

pub mod common;
pub mod request;
pub mod response;
pub mod sniff;

pub use request::{convert_alb_request, RemoteAddr, RequestMetadataExt};
pub use response::{AlbResponseCollector, ResponseWriter};
pub use sniff::detect_content_type;
