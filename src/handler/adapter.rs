//! Bridges tower services into the [`Handler`] seam.
//!
//! Any `Service<Request<Body>, Response = Response<Body>>` works, which
//! includes an axum `Router`. The service's response is replayed into the
//! collector: headers first, then status, then the fully collected body.

use axum::body::Body;
use axum::http::{Request, Response};
use tower::{Service, ServiceExt};

use crate::error::BoxError;
use crate::handler::{Handler, InvocationContext};
use crate::http::ResponseWriter;

/// [`Handler`] that delegates to a tower service.
#[derive(Debug, Clone)]
pub struct ServiceAdapter<S> {
    service: S,
}

impl<S> ServiceAdapter<S> {
    pub fn new(service: S) -> Self {
        Self { service }
    }
}

impl<S> Handler for ServiceAdapter<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + Sync + 'static,
    S::Error: Into<BoxError>,
    S::Future: Send,
{
    async fn serve(
        &self,
        _cx: &InvocationContext,
        req: Request<Body>,
        w: &mut dyn ResponseWriter,
    ) -> Result<(), BoxError> {
        let response = self.service.clone().oneshot(req).await.map_err(Into::<BoxError>::into)?;
        let (parts, body) = response.into_parts();

        let headers = w.headers_mut();
        for (name, value) in parts.headers.iter() {
            headers.append(name.clone(), value.clone());
        }
        w.write_head(parts.status);

        let bytes = axum::body::to_bytes(body, usize::MAX).await?;
        w.write_body(&bytes)?;
        Ok(())
    }
}
