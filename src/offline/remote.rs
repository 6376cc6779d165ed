//! Remote persistence collaborators.
//!
//! The sync coordinator hands cached payloads to a [`RemoteSink`]. The
//! shipped implementation is [`HttpRemote`], a blocking JSON-over-HTTP
//! client; tests substitute scripted doubles.

use std::error::Error;

use serde::Deserialize;
use serde_json::Value;

/// A remote service that persists one record and returns its server id.
///
/// `create` must be safely retryable per logical key: the coordinator is
/// at-least-once and may resend the same record after a failure or crash.
pub trait RemoteSink {
    fn create(&self, key: &str, payload: &Value) -> Result<String, Box<dyn Error>>;
}

/// Response body of the persistence endpoint.
#[derive(Deserialize)]
struct CreateResponse {
    id: String,
}

/// JSON-over-HTTP sink. The logical cache key travels as an
/// `Idempotency-Key` header so the server can deduplicate retries.
pub struct HttpRemote {
    endpoint: String,
}

impl HttpRemote {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl RemoteSink for HttpRemote {
    fn create(&self, key: &str, payload: &Value) -> Result<String, Box<dyn Error>> {
        let response: CreateResponse = ureq::post(&self.endpoint)
            .set("Idempotency-Key", key)
            .send_json(payload)?
            .into_json()?;
        Ok(response.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_response_parses_server_reply() {
        let body = "{\"id\":\"srv-42\",\"created_at\":\"2026-08-25T10:00:00Z\"}";
        let response: CreateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.id, "srv-42");
    }

    #[test]
    fn test_unreachable_endpoint_is_an_error_not_a_panic() {
        let remote = HttpRemote::new("http://127.0.0.1:1/records");
        let result = remote.create("quote_1", &serde_json::json!({}));
        assert!(result.is_err());
    }
}
