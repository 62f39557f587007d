//! Invocation payloads exchanged with the platform's routing tier.

pub mod alb;

pub use alb::{
    reply_text, AlbBody, AlbTargetGroupRequest, AlbTargetGroupRequestContext, AlbTargetGroupResponse,
    ElbContext,
};
