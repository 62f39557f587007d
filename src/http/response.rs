//! Buffered response collection.
//!
//! # Responsibilities
//! - Provide the sink delegate handlers write into
//! - Freeze status and headers on the first write ("first write wins")
//! - Fill in Content-Type / Content-Length the handler left out
//! - Pick a text or base64 body encoding for the reply
//!
//! # Design Decisions
//! - Lifecycle is an explicit `Open → Committed → Finalized` state machine
//! - Header edits after commit are accepted but never reach the reply
//! - Valid UTF-8 is sent as text; anything else is base64 encoded

use std::io;

use axum::http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};

use crate::event::{AlbBody, AlbTargetGroupResponse};
use crate::http::sniff::detect_content_type;

/// The response-writing contract exposed to delegate handlers.
pub trait ResponseWriter: Send {
    /// Mutable header map. Only effective until the response is committed.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commit the status and current headers. Later calls are ignored.
    fn write_head(&mut self, status: StatusCode);

    /// Append body bytes, committing with `200 OK` first if needed.
    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize>;
}

#[derive(Debug)]
enum CollectorState {
    /// Headers still mutable, nothing written.
    Open,
    /// Status and headers frozen into the reply; body accumulating.
    Committed {
        reply: AlbTargetGroupResponse,
        content_type_set: bool,
        content_length_set: bool,
    },
    /// Reply produced; further finishes return it unchanged.
    Finalized(AlbTargetGroupResponse),
}

/// Collects a handler's output into a target group reply.
#[derive(Debug)]
pub struct AlbResponseCollector {
    multi_value_headers: bool,
    headers: HeaderMap,
    body: Vec<u8>,
    state: CollectorState,
}

impl AlbResponseCollector {
    /// Create a collector. `multi_value_headers` selects the reply header shape.
    pub fn new(multi_value_headers: bool) -> Self {
        Self {
            multi_value_headers,
            headers: HeaderMap::new(),
            body: Vec::new(),
            state: CollectorState::Open,
        }
    }

    fn is_committed(&self) -> bool {
        !matches!(self.state, CollectorState::Open)
    }

    /// Produce the reply.
    ///
    /// Commits with `200 OK` if the handler never wrote anything. Calling this
    /// again returns the reply produced the first time.
    pub fn finish(&mut self) -> AlbTargetGroupResponse {
        let (mut reply, content_type_set, content_length_set) =
            match std::mem::replace(&mut self.state, CollectorState::Open) {
                CollectorState::Open => self.snapshot(StatusCode::OK),
                CollectorState::Committed {
                    reply,
                    content_type_set,
                    content_length_set,
                } => (reply, content_type_set, content_length_set),
                CollectorState::Finalized(reply) => {
                    self.state = CollectorState::Finalized(reply.clone());
                    return reply;
                }
            };

        let body = std::mem::take(&mut self.body);

        if !content_type_set {
            let detected = HeaderValue::from_static(detect_content_type(&body));
            self.insert_reply_header(&mut reply, CONTENT_TYPE, detected);
        }
        if !content_length_set {
            self.insert_reply_header(&mut reply, CONTENT_LENGTH, HeaderValue::from(body.len()));
        }

        let body_len = body.len();
        // Binary bodies are base64 encoded when the reply is serialized.
        match String::from_utf8(body) {
            Ok(text) => {
                reply.body = Some(AlbBody::Text(text));
                reply.is_base64_encoded = false;
            }
            Err(e) => {
                reply.body = Some(AlbBody::Binary(e.into_bytes()));
                reply.is_base64_encoded = true;
            }
        }

        tracing::debug!(
            status = reply.status_code,
            body_len,
            base64 = reply.is_base64_encoded,
            "Finalized target group reply"
        );

        self.state = CollectorState::Finalized(reply.clone());
        reply
    }

    fn insert_reply_header(&self, reply: &mut AlbTargetGroupResponse, name: HeaderName, value: HeaderValue) {
        if self.multi_value_headers {
            reply.multi_value_headers.insert(name, value);
        } else {
            reply.headers.insert(name, value);
        }
    }

    /// Freeze `status` and the current headers into a reply, along with
    /// whether the handler set Content-Type / Content-Length itself.
    fn snapshot(&self, status: StatusCode) -> (AlbTargetGroupResponse, bool, bool) {
        let mut reply = AlbTargetGroupResponse {
            status_code: i64::from(status.as_u16()),
            status_description: Some(status_description(status)),
            ..Default::default()
        };

        if self.multi_value_headers {
            reply.multi_value_headers = self.headers.clone();
        } else {
            reply.headers = join_values(&self.headers);
        }

        (
            reply,
            self.headers.contains_key(CONTENT_TYPE),
            self.headers.contains_key(CONTENT_LENGTH),
        )
    }
}

impl ResponseWriter for AlbResponseCollector {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_head(&mut self, status: StatusCode) {
        if self.is_committed() {
            tracing::trace!(status = %status, "Ignoring status write after commit");
            return;
        }

        let (reply, content_type_set, content_length_set) = self.snapshot(status);
        self.state = CollectorState::Committed {
            reply,
            content_type_set,
            content_length_set,
        };
    }

    fn write_body(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let CollectorState::Finalized(_) = self.state {
            return Err(io::Error::other("response already finalized"));
        }

        self.write_head(StatusCode::OK);
        self.body.extend_from_slice(buf);
        Ok(buf.len())
    }
}

impl io::Write for AlbResponseCollector {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_body(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Collapse repeated headers into one comma-joined value per name.
fn join_values(headers: &HeaderMap) -> HeaderMap {
    let mut joined = HeaderMap::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let mut values = headers.get_all(name).iter();
        let Some(first) = values.next() else { continue };

        let mut bytes = first.as_bytes().to_vec();
        for value in values {
            bytes.push(b',');
            bytes.extend_from_slice(value.as_bytes());
        }
        match HeaderValue::from_bytes(&bytes) {
            Ok(value) => {
                joined.insert(name.clone(), value);
            }
            Err(_) => tracing::warn!(header = %name, "Dropping header that cannot be joined"),
        }
    }
    joined
}

fn status_description(status: StatusCode) -> String {
    match status.canonical_reason() {
        Some(reason) => format!("{} {}", status.as_u16(), reason),
        None => status.as_u16().to_string(),
    }
}
