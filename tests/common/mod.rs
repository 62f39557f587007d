//! Shared event builders for integration tests.

use serde_json::{json, Map, Value};

use lambda_http_bridge::AlbTargetGroupRequest;

/// Builder for target group events, assembled as the JSON the load balancer
/// would send.
pub struct EventBuilder {
    event: Map<String, Value>,
}

#[allow(dead_code)]
impl EventBuilder {
    pub fn new(method: &str, path: &str) -> Self {
        let mut event = Map::new();
        event.insert(
            "requestContext".into(),
            json!({ "elb": { "targetGroupArn": "arn:aws:elasticloadbalancing:region:123456789012:targetgroup/tests/1" } }),
        );
        event.insert("httpMethod".into(), json!(method));
        event.insert("path".into(), json!(path));
        Self { event }
    }

    fn entry(&mut self, field: &str, name: &str, value: Value) {
        let map = self
            .event
            .entry(field)
            .or_insert_with(|| Value::Object(Map::new()));
        if let Value::Object(map) = map {
            map.insert(name.to_string(), value);
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.entry("headers", name, json!(value));
        self
    }

    pub fn multi_header(mut self, name: &str, values: &[&str]) -> Self {
        self.entry("multiValueHeaders", name, json!(values));
        self
    }

    pub fn query(mut self, name: &str, value: &str) -> Self {
        self.entry("queryStringParameters", name, json!(value));
        self
    }

    pub fn multi_query(mut self, name: &str, values: &[&str]) -> Self {
        self.entry("multiValueQueryStringParameters", name, json!(values));
        self
    }

    pub fn body(mut self, body: &str, is_base64_encoded: bool) -> Self {
        self.event.insert("body".into(), json!(body));
        self.event.insert("isBase64Encoded".into(), json!(is_base64_encoded));
        self
    }

    pub fn build(self) -> AlbTargetGroupRequest {
        serde_json::from_value(Value::Object(self.event)).expect("event should decode")
    }
}
