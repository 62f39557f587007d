//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! http/request.rs, http/response.rs, handler/alb.rs
//!     → tracing events (request ID on every invocation-level event)
//!     → logging.rs subscriber (stderr, text or JSON)
//! ```

pub mod logging;

pub use logging::init_logging;
