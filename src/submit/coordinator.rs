use crate::core::form_event::FormEvent;
use crate::core::form_state::{FormError, FormState};
use crate::core::schema::FormSchema;
use crate::core::validation::{self, FieldErrors};
use crate::donation::format_amount;
use crate::submit::executor::{SubmitCompletion, SubmitExecutor, SubmitInvocation};
use crate::submit::notify::{Notification, Notifier};
use crate::submit::port::{SubmitPort, SubmitRequest};
use crate::submit::run_state::SubmitRunState;
use crate::submit::template;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitAttempt {
    /// A submission was already in flight; nothing happened.
    Ignored,
    /// Validation failed; errors are now on the form.
    Blocked(FieldErrors),
    Started { run_id: u64 },
}

/// Drives one form through validate, submit, and report.
pub struct SubmissionCoordinator {
    schema: FormSchema,
    state: FormState,
    runs: SubmitRunState,
    executor: SubmitExecutor,
    notifier: Box<dyn Notifier>,
}

impl SubmissionCoordinator {
    pub fn new(
        schema: FormSchema,
        port: Arc<dyn SubmitPort>,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let state = FormState::new(&schema);
        Self {
            schema,
            state,
            runs: SubmitRunState::default(),
            executor: SubmitExecutor::new(port),
            notifier,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn errors(&self) -> &FieldErrors {
        self.state.errors()
    }

    pub fn is_submitting(&self) -> bool {
        self.state.is_submitting()
    }

    pub fn set_text(
        &mut self,
        id: &str,
        text: impl Into<String>,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.state.set_text(id, text)
    }

    pub fn select_preset_amount(
        &mut self,
        id: &str,
        amount: u32,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.state.select_preset_amount(id, amount)
    }

    pub fn enter_custom_amount(
        &mut self,
        id: &str,
        text: &str,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.state.enter_custom_amount(id, text)
    }

    /// Errors the current values would produce, without touching the form.
    pub fn validate(&self) -> FieldErrors {
        validation::validate(&self.schema, self.state.values())
    }

    pub fn submit(&mut self) -> SubmitAttempt {
        if self.state.is_submitting() || self.runs.is_running() {
            tracing::debug!(form = %self.schema.id, "submit ignored, already in flight");
            return SubmitAttempt::Ignored;
        }

        let errors = self.validate();
        if !errors.is_valid() {
            tracing::debug!(
                form = %self.schema.id,
                invalid = errors.len(),
                "submit blocked by validation"
            );
            self.state.set_errors(errors.clone());
            return SubmitAttempt::Blocked(errors);
        }

        let Some(run_id) = self.runs.try_start(Instant::now()) else {
            return SubmitAttempt::Ignored;
        };

        let request = SubmitRequest {
            form: self.schema.id.clone(),
            endpoint: self.schema.endpoint.clone(),
            payload: self.state.values().payload(&self.schema.context),
        };
        tracing::debug!(form = %request.form, payload = %request.payload, "form submitted");
        tracing::info!(form = %request.form, run_id, "submission started");

        self.state.set_submitting(true);
        self.state.clear_errors();
        self.executor.spawn(SubmitInvocation { run_id, request });

        SubmitAttempt::Started { run_id }
    }

    /// Applies any submissions that finished since the last call.
    pub fn tick(&mut self) -> Vec<FormEvent> {
        self.executor
            .drain_ready()
            .into_iter()
            .filter_map(|completion| self.complete(completion))
            .collect()
    }

    /// Blocks until the in-flight submission settles or `timeout` passes.
    pub fn wait_settled(&mut self, timeout: Duration) -> Vec<FormEvent> {
        let deadline = Instant::now() + timeout;
        let mut events = self.tick();

        while self.is_submitting() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            let Some(completion) = self.executor.wait_next(remaining) else {
                break;
            };
            events.extend(self.complete(completion));
        }

        events
    }

    fn complete(&mut self, completion: SubmitCompletion) -> Option<FormEvent> {
        let run_id = completion.run_id;
        if !self.runs.finish(run_id, Instant::now()) {
            tracing::debug!(run_id, "dropping completion for a run that is not in flight");
            return None;
        }
        self.state.set_submitting(false);

        let lookup = |key: &str| payload_text(&completion.request.payload, key);
        match completion.result {
            Ok(ack) => {
                tracing::info!(
                    form = %self.schema.id,
                    run_id,
                    reference = ack.reference.as_deref().unwrap_or("-"),
                    "submission accepted"
                );
                let message = template::render(&self.schema.success_message, lookup);
                self.notifier.notify(&Notification::success(message));
                self.state.reset();
                Some(FormEvent::SubmitSucceeded { run_id })
            }
            Err(err) => {
                tracing::warn!(form = %self.schema.id, run_id, error = %err, "submission failed");
                let message = template::render(&self.schema.failure_message, lookup);
                self.notifier.notify(&Notification::failure(message));
                Some(FormEvent::SubmitFailed {
                    run_id,
                    error: err.to_string(),
                })
            }
        }
    }
}

fn payload_text(payload: &serde_json::Value, key: &str) -> Option<String> {
    match payload.get(key)? {
        serde_json::Value::String(text) => Some(text.clone()),
        serde_json::Value::Number(number) => number.as_f64().map(format_amount),
        serde_json::Value::Null => Some(String::new()),
        other => Some(other.to_string()),
    }
}
