//! Target group dispatch wrapper.

use crate::config::BridgeConfig;
use crate::error::{Error, Result};
use crate::event::{AlbTargetGroupRequest, AlbTargetGroupResponse};
use crate::handler::{Handler, InvocationContext};
use crate::http::{convert_alb_request, AlbResponseCollector};

/// Runs target group invocations through a delegate [`Handler`].
#[derive(Debug, Clone)]
pub struct AlbHandler<H> {
    handler: H,
    config: BridgeConfig,
}

impl<H: Handler> AlbHandler<H> {
    /// Create a wrapper with the given delegate and configuration.
    pub fn new(handler: H, config: BridgeConfig) -> Self {
        Self { handler, config }
    }

    /// Handle one invocation.
    ///
    /// Translation and handler failures are returned as-is; no reply is
    /// produced for them, even if the handler had already written output.
    pub async fn handle(
        &self,
        cx: &InvocationContext,
        event: AlbTargetGroupRequest,
    ) -> Result<AlbTargetGroupResponse> {
        tracing::debug!(
            request_id = %cx.request_id(),
            target_group = event.request_context.elb.target_group_arn.as_deref().unwrap_or("-"),
            "Handling target group invocation"
        );

        let req = convert_alb_request(cx, event, &self.config.defaults).inspect_err(|e| {
            tracing::warn!(request_id = %cx.request_id(), error = %e, "Event translation failed");
        })?;

        let mut collector = AlbResponseCollector::new(self.config.multi_value_headers);

        if let Err(e) = self.handler.serve(cx, req, &mut collector).await {
            tracing::warn!(request_id = %cx.request_id(), error = %e, "Delegate handler failed");
            return Err(Error::Handler(e));
        }

        let reply = collector.finish();
        tracing::debug!(
            request_id = %cx.request_id(),
            status = reply.status_code,
            "Invocation complete"
        );
        Ok(reply)
    }
}
