use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmitRequest {
    pub form: String,
    pub endpoint: String,
    pub payload: serde_json::Value,
}

/// Acknowledgement from whatever received the submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Ack {
    pub reference: Option<String>,
}

impl Ack {
    pub fn with_reference(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
        }
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("server rejected submission with status {status}")]
    Rejected { status: u16 },
    #[error("transport error: {0}")]
    Transport(String),
    #[error("could not encode submission: {0}")]
    Encode(String),
    #[error("submission worker stopped before reporting back")]
    Abandoned,
}

/// Where a validated form goes. Calls may block; the executor runs them off
/// the event loop.
pub trait SubmitPort: Send + Sync {
    fn submit(&self, request: &SubmitRequest) -> Result<Ack, SubmitError>;
}

/// Stand-in backend: waits a fixed time, then accepts everything.
#[derive(Debug, Clone)]
pub struct DelaySubmitPort {
    delay: Duration,
}

impl DelaySubmitPort {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1_000);

    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for DelaySubmitPort {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY)
    }
}

impl SubmitPort for DelaySubmitPort {
    fn submit(&self, request: &SubmitRequest) -> Result<Ack, SubmitError> {
        tracing::debug!(
            form = %request.form,
            delay_ms = self.delay.as_millis() as u64,
            "simulating submission"
        );
        std::thread::sleep(self.delay);
        Ok(Ack::default())
    }
}

#[cfg(test)]
mod tests {
    use super::{Ack, DelaySubmitPort, SubmitPort, SubmitRequest};
    use std::time::{Duration, Instant};

    #[test]
    fn delay_port_waits_then_accepts() {
        let port = DelaySubmitPort::new(Duration::from_millis(20));
        let request = SubmitRequest {
            form: "contact".into(),
            endpoint: "contact-messages".into(),
            payload: serde_json::json!({}),
        };

        let started = Instant::now();
        assert_eq!(port.submit(&request), Ok(Ack::default()));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }
}
