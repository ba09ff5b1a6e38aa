//! HTTP transport speaking the bot API's JSON envelope convention.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use serde_json::Value;
use tracing::trace;

use ferrite_core::{ApiError, ApiResult, Transport};

/// [`Transport`] posting each method call to
/// `<api_url>/bot<token>/<method>` as a JSON body.
///
/// The platform's response envelope is unwrapped here: `ok: true`
/// yields the `result` field, `ok: false` becomes [`ApiError::Api`].
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(api_url: &str, token: &str, timeout: Duration) -> ApiResult<Self> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .build()
            .map_err(|err| ApiError::Transport(err.to_string()))?;
        Ok(Self {
            client,
            base_url: format!("{}/bot{}", api_url.trim_end_matches('/'), token),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, method: &str, params: Value) -> ApiResult<Value> {
        let url = format!("{}/{}", self.base_url, method);
        trace!(method, "posting API call");

        let response = self
            .client
            .post(&url)
            .json(&params)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    ApiError::Timeout
                } else {
                    ApiError::Transport(err.to_string())
                }
            })?;

        let envelope: Value = response
            .json()
            .await
            .map_err(|err| ApiError::Transport(err.to_string()))?;

        unwrap_envelope(envelope)
    }
}

/// Splits the platform's `{ok, result, error_code, description}`
/// envelope into `Ok(result)` or [`ApiError::Api`].
fn unwrap_envelope(mut envelope: Value) -> ApiResult<Value> {
    if envelope["ok"].as_bool() == Some(true) {
        Ok(envelope
            .get_mut("result")
            .map(Value::take)
            .unwrap_or(Value::Null))
    } else {
        Err(ApiError::Api {
            code: envelope["error_code"].as_i64().unwrap_or(0),
            description: envelope["description"]
                .as_str()
                .unwrap_or("no description")
                .to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn ok_envelope_yields_result() {
        let result = unwrap_envelope(json!({"ok": true, "result": {"id": 1}})).unwrap();
        assert_eq!(result, json!({"id": 1}));
    }

    #[test]
    fn ok_without_result_yields_null() {
        let result = unwrap_envelope(json!({"ok": true})).unwrap();
        assert_eq!(result, Value::Null);
    }

    #[test]
    fn error_envelope_carries_code_and_description() {
        let err = unwrap_envelope(json!({
            "ok": false,
            "error_code": 429,
            "description": "Too Many Requests"
        }))
        .unwrap_err();
        match err {
            ApiError::Api { code, description } => {
                assert_eq!(code, 429);
                assert_eq!(description, "Too Many Requests");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn base_url_strips_trailing_slash() {
        let transport =
            HttpTransport::new("http://localhost:8081/", "123:abc", Duration::from_secs(5))
                .unwrap();
        assert_eq!(transport.base_url, "http://localhost:8081/bot123:abc");
    }
}
