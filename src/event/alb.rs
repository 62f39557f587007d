//! Target-group invocation payloads.
//!
//! The wire types come from `aws_lambda_events`. The load balancer populates
//! either the single-value or the multi-value maps depending on the target
//! group's multi-value headers attribute; the other side decodes as empty.
//! Null scalars (`body`, `path`, `isBase64Encoded`) decode to their empty
//! values.

pub use aws_lambda_events::encodings::Body as AlbBody;
pub use aws_lambda_events::event::alb::{
    AlbTargetGroupRequest, AlbTargetGroupRequestContext, AlbTargetGroupResponse, ElbContext,
};

/// Body text of a reply, if it was sent as text.
pub fn reply_text(reply: &AlbTargetGroupResponse) -> Option<&str> {
    match &reply.body {
        Some(AlbBody::Text(text)) => Some(text.as_str()),
        _ => None,
    }
}
