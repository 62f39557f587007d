//! Event → request translation.
//!
//! # Responsibilities
//! - Rebuild the query string (multi-value map wins, never merged)
//! - Merge single- and multi-value headers (union, single first)
//! - Resolve host, client address and scheme with configured fallbacks
//! - Escape the raw path and wrap the body, decoding base64 lazily
//!
//! # Design Decisions
//! - The only failure is the HTTP builder rejecting the URL
//! - Context and client address travel as request extensions

use axum::body::Body;
use axum::http::{HeaderMap, Request};

use crate::config::RequestDefaults;
use crate::error::Result;
use crate::event::AlbTargetGroupRequest;
use crate::handler::InvocationContext;
use crate::http::common::{build_request_url, encode_query, event_body, join_host_port};

pub const X_FORWARDED_HOST: &str = "x-forwarded-host";
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";
pub const X_FORWARDED_PROTO: &str = "x-forwarded-proto";

/// Client address of a translated request, as `host:port`.
///
/// The port is symbolic (see [`RequestDefaults::remote_port`]), so this is
/// kept as text rather than a `SocketAddr`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteAddr(pub String);

impl RemoteAddr {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Extension trait for reading translation metadata off a request.
pub trait RequestMetadataExt {
    fn remote_addr(&self) -> Option<&str>;
    fn invocation_context(&self) -> Option<&InvocationContext>;
}

impl<B> RequestMetadataExt for Request<B> {
    fn remote_addr(&self) -> Option<&str> {
        self.extensions().get::<RemoteAddr>().map(RemoteAddr::as_str)
    }

    fn invocation_context(&self) -> Option<&InvocationContext> {
        self.extensions().get::<InvocationContext>()
    }
}

/// Convert a target-group event into a request.
pub fn convert_alb_request(
    cx: &InvocationContext,
    event: AlbTargetGroupRequest,
    defaults: &RequestDefaults,
) -> Result<Request<Body>> {
    let query = alb_query(&event);
    let headers = alb_headers(&event);

    let host = first_value(&headers, X_FORWARDED_HOST)
        .or_else(|| first_value(&headers, "host"))
        .unwrap_or(defaults.host.as_str());
    let source_ip = first_value(&headers, X_FORWARDED_FOR).unwrap_or(defaults.source_ip.as_str());
    let scheme = first_value(&headers, X_FORWARDED_PROTO).unwrap_or(defaults.scheme.as_str());

    let url = build_request_url(scheme, host, event.path.as_deref().unwrap_or_default(), &query);
    let remote_addr = RemoteAddr(join_host_port(source_ip, &defaults.remote_port));

    tracing::debug!(
        request_id = %cx.request_id(),
        method = %event.http_method,
        url = %url,
        remote_addr = %remote_addr.as_str(),
        "Translated target group event"
    );

    let mut req = Request::builder()
        .method(event.http_method)
        .uri(url)
        .extension(cx.clone())
        .extension(remote_addr)
        .body(event_body(event.body.unwrap_or_default(), event.is_base64_encoded))?;

    *req.headers_mut() = headers;
    Ok(req)
}

fn alb_query(event: &AlbTargetGroupRequest) -> String {
    let params = if event.multi_value_query_string_parameters.is_empty() {
        &event.query_string_parameters
    } else {
        &event.multi_value_query_string_parameters
    };
    encode_query(params.iter())
}

fn alb_headers(event: &AlbTargetGroupRequest) -> HeaderMap {
    let mut headers = event.headers.clone();
    for (name, value) in event.multi_value_headers.iter() {
        headers.append(name.clone(), value.clone());
    }
    headers
}

/// First value of `name`, treating an empty value as absent.
fn first_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    /// Decode an event, filling in the method, path and request context.
    fn event(method: &str, path: &str, fields: Value) -> AlbTargetGroupRequest {
        let mut raw = json!({
            "requestContext": { "elb": { "targetGroupArn": "arn:aws:elasticloadbalancing:region:123456789012:targetgroup/tg/1" } },
            "httpMethod": method,
            "path": path,
        });
        if let (Some(raw), Value::Object(fields)) = (raw.as_object_mut(), fields) {
            raw.extend(fields);
        }
        serde_json::from_value(raw).unwrap()
    }

    fn convert(event: AlbTargetGroupRequest) -> Request<Body> {
        convert_alb_request(&InvocationContext::detached(), event, &RequestDefaults::default()).unwrap()
    }

    #[test]
    fn test_defaults_when_no_routing_headers() {
        let req = convert(event("GET", "/lambda", json!({})));

        assert_eq!(req.method(), "GET");
        assert_eq!(req.uri().to_string(), "http://127.0.0.1/lambda");
        assert_eq!(req.remote_addr(), Some("127.0.0.1:http"));
        assert!(req.invocation_context().is_some());
    }

    #[test]
    fn test_forwarded_headers_win() {
        let req = convert(event(
            "GET",
            "/",
            json!({ "headers": {
                "host": "internal.local",
                "x-forwarded-host": "public.example.com",
                "x-forwarded-proto": "https",
                "x-forwarded-for": "203.0.113.9"
            }}),
        ));

        assert_eq!(req.uri().scheme_str(), Some("https"));
        assert_eq!(req.uri().host(), Some("public.example.com"));
        assert_eq!(req.remote_addr(), Some("203.0.113.9:http"));
    }

    #[test]
    fn test_host_header_fallback() {
        let req = convert(event(
            "GET",
            "/",
            json!({ "headers": { "Host": "internal.local", "X-Forwarded-Host": "" } }),
        ));
        assert_eq!(req.uri().host(), Some("internal.local"));
    }

    #[test]
    fn test_path_forced_absolute() {
        let req = convert(event("GET", "relative/path", json!({})));
        assert_eq!(req.uri().path(), "/relative/path");
    }

    #[test]
    fn test_missing_path_is_root() {
        let req = convert(event("GET", "", json!({ "path": null })));
        assert_eq!(req.uri().path(), "/");
    }

    #[test]
    fn test_raw_path_escaped() {
        let req = convert(event("GET", "/a b/c`d<e>", json!({})));
        assert_eq!(req.uri().path(), "/a%20b/c%60d%3Ce%3E");
    }

    #[test]
    fn test_single_value_query() {
        let req = convert(event(
            "GET",
            "/search",
            json!({ "queryStringParameters": { "q": "rust lang", "page": "2" } }),
        ));
        assert_eq!(req.uri().query(), Some("page=2&q=rust+lang"));
    }

    #[test]
    fn test_multi_value_query_ignores_single() {
        let req = convert(event(
            "GET",
            "/search",
            json!({
                "queryStringParameters": { "q": "ignored", "only_single": "x" },
                "multiValueQueryStringParameters": { "q": ["a", "b"] }
            }),
        ));
        assert_eq!(req.uri().query(), Some("q=a&q=b"));
    }

    #[test]
    fn test_empty_multi_value_query_falls_back_to_single() {
        let req = convert(event(
            "GET",
            "/",
            json!({
                "queryStringParameters": { "k": "v" },
                "multiValueQueryStringParameters": {}
            }),
        ));
        assert_eq!(req.uri().query(), Some("k=v"));
    }

    #[test]
    fn test_headers_union_single_first() {
        let req = convert(event(
            "GET",
            "/",
            json!({
                "headers": { "accept": "text/html" },
                "multiValueHeaders": { "accept": ["application/json", "*/*"], "x-trace": ["1"] }
            }),
        ));

        let accept: Vec<_> = req.headers().get_all("accept").iter().collect();
        assert_eq!(accept, vec!["text/html", "application/json", "*/*"]);
        assert_eq!(req.headers()["x-trace"], "1");
    }

    #[test]
    fn test_ipv6_remote_addr() {
        let req = convert(event("GET", "/", json!({ "headers": { "x-forwarded-for": "2001:db8::1" } })));
        assert_eq!(req.remote_addr(), Some("[2001:db8::1]:http"));
    }

    #[test]
    fn test_configured_defaults() {
        let defaults = RequestDefaults {
            host: "fallback.internal".to_string(),
            source_ip: "10.0.0.1".to_string(),
            scheme: "https".to_string(),
            remote_port: "443".to_string(),
        };

        let req = convert_alb_request(&InvocationContext::detached(), event("GET", "/", json!({})), &defaults)
            .unwrap();
        assert_eq!(req.uri().to_string(), "https://fallback.internal/");
        assert_eq!(req.remote_addr(), Some("10.0.0.1:443"));
    }

    #[test]
    fn test_malformed_host_is_translation_error() {
        let err = convert_alb_request(
            &InvocationContext::detached(),
            event("GET", "/", json!({ "headers": { "x-forwarded-host": "bad host" } })),
            &RequestDefaults::default(),
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::Error::Translate(_)));
    }

    #[tokio::test]
    async fn test_body_decoding() {
        let ev = event("POST", "/", json!({ "body": "SGVsbG8=", "isBase64Encoded": true }));
        let body = axum::body::to_bytes(convert(ev).into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello");

        let ev = event("POST", "/", json!({ "body": "Hello", "isBase64Encoded": false }));
        let body = axum::body::to_bytes(convert(ev).into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Hello");
    }

    #[test]
    fn test_empty_body_is_absent() {
        use axum::body::HttpBody;

        let req = convert(event("GET", "/", json!({ "body": null })));
        assert!(req.body().is_end_stream());
        assert_eq!(req.body().size_hint().exact(), Some(0));
    }
}
