use crate::submit::port::{Ack, SubmitError, SubmitPort, SubmitRequest};
use std::time::Duration;

/// Posts submissions to the content service as `{"data": payload}`.
pub struct HttpSubmitPort {
    agent: ureq::Agent,
    base_url: String,
    access_token: Option<String>,
}

impl HttpSubmitPort {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            base_url: base_url.into(),
            access_token: None,
        }
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token.filter(|token| !token.is_empty());
        self
    }

    pub fn endpoint_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl SubmitPort for HttpSubmitPort {
    fn submit(&self, request: &SubmitRequest) -> Result<Ack, SubmitError> {
        let url = self.endpoint_url(&request.endpoint);
        let body = serde_json::to_string(&serde_json::json!({ "data": request.payload }))
            .map_err(|err| SubmitError::Encode(err.to_string()))?;

        let mut call = self
            .agent
            .post(&url)
            .set("Content-Type", "application/json");
        if let Some(token) = &self.access_token {
            call = call.set("Authorization", &format!("Bearer {token}"));
        }

        match call.send_string(&body) {
            Ok(response) => match response.into_string() {
                Ok(text) => Ok(ack_from_body(&text)),
                Err(err) => {
                    // The service already accepted it; only the reference is lost.
                    tracing::warn!(%url, error = %err, "could not read submission response");
                    Ok(Ack::default())
                }
            },
            Err(ureq::Error::Status(status, _)) => {
                tracing::warn!(%url, status, "submission rejected");
                Err(SubmitError::Rejected { status })
            }
            Err(ureq::Error::Transport(transport)) => {
                Err(SubmitError::Transport(transport.to_string()))
            }
        }
    }
}

/// Pulls `data.id` out of a response body when there is one.
fn ack_from_body(body: &str) -> Ack {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return Ack::default();
    };

    match json.pointer("/data/id") {
        Some(serde_json::Value::String(id)) => Ack::with_reference(id.clone()),
        Some(serde_json::Value::Number(id)) => Ack::with_reference(id.to_string()),
        _ => Ack::default(),
    }
}
