//! Helpers shared by the event converters.

use std::collections::BTreeMap;

use axum::body::{Body, Bytes};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

/// Characters escaped in a request path. `%` is absent so existing escapes
/// pass through untouched.
const PATH: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|')
    .add(b'\\')
    .add(b'^');

/// Encode query parameters as `application/x-www-form-urlencoded`.
///
/// Keys are emitted in sorted order; each key's values keep their order.
pub fn encode_query<'a, I>(params: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut sorted: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (key, value) in params {
        sorted.entry(key).or_default().push(value);
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, values) in sorted {
        for value in values {
            serializer.append_pair(key, value);
        }
    }

    serializer.finish()
}

/// Assemble `scheme://host/path?query`.
///
/// The path is forced to be absolute and escaped; the `?` is only added for a
/// non-empty query.
pub fn build_request_url(scheme: &str, host: &str, path: &str, query: &str) -> String {
    let mut url = String::with_capacity(scheme.len() + host.len() + path.len() + query.len() + 5);
    url.push_str(scheme);
    url.push_str("://");
    url.push_str(host);

    if !path.starts_with('/') {
        url.push('/');
    }
    url.extend(utf8_percent_encode(path, PATH));

    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }

    url
}

/// Build the request body from the event's body string.
///
/// An empty string yields an empty body that never reports data. Base64
/// content is decoded when the body is first polled, so a malformed payload
/// surfaces as a body read error rather than a translation error.
pub fn event_body(body: String, is_base64_encoded: bool) -> Body {
    if body.is_empty() {
        return Body::empty();
    }

    if is_base64_encoded {
        let decoded = futures_util::stream::once(async move {
            // Line breaks are tolerated inside the payload.
            let packed: Vec<u8> = body.bytes().filter(|b| !matches!(*b, b'\r' | b'\n')).collect();
            STANDARD.decode(packed).map(Bytes::from)
        });
        Body::from_stream(decoded)
    } else {
        Body::from(body)
    }
}

/// Join host and port, bracketing IPv6 literals.
pub fn join_host_port(host: &str, port: &str) -> String {
    if host.contains(':') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}
