use crate::core::FieldId;
use crate::core::form_event::FormEvent;
use crate::core::schema::FormSchema;
use crate::core::validation::FieldErrors;
use crate::core::value::{FormValues, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("form has no field '{0}'")]
    UnknownField(FieldId),
    #[error("field '{field}' does not accept {expected} input")]
    KindMismatch {
        field: FieldId,
        expected: &'static str,
    },
}

/// Values, errors and the in-flight flag of one form instance.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    values: FormValues,
    errors: FieldErrors,
    submitting: bool,
    initial: FormValues,
}

impl FormState {
    pub fn new(schema: &FormSchema) -> Self {
        let mut initial = FormValues::new();
        for field in &schema.fields {
            initial.set(field.id.clone(), field.kind.initial_value());
        }

        Self {
            values: initial.clone(),
            errors: FieldErrors::new(),
            submitting: false,
            initial,
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn set_text(
        &mut self,
        id: &str,
        text: impl Into<String>,
    ) -> Result<Vec<FormEvent>, FormError> {
        let text = text.into();
        self.update(id, "text", |value| match value {
            Value::Text(current) => {
                *current = text;
                true
            }
            Value::Amount(_) => false,
        })
    }

    pub fn select_preset_amount(
        &mut self,
        id: &str,
        amount: u32,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.update(id, "amount", |value| match value {
            Value::Amount(selection) => {
                selection.select_preset(amount);
                true
            }
            Value::Text(_) => false,
        })
    }

    pub fn enter_custom_amount(
        &mut self,
        id: &str,
        text: &str,
    ) -> Result<Vec<FormEvent>, FormError> {
        self.update(id, "amount", |value| match value {
            Value::Amount(selection) => {
                selection.enter_custom(text);
                true
            }
            Value::Text(_) => false,
        })
    }

    pub fn set_errors(&mut self, errors: FieldErrors) {
        self.errors = errors;
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    pub(crate) fn set_submitting(&mut self, submitting: bool) {
        self.submitting = submitting;
    }

    /// Back to the state the form had when it was created.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.errors.clear();
    }

    fn update<F>(
        &mut self,
        id: &str,
        expected: &'static str,
        apply: F,
    ) -> Result<Vec<FormEvent>, FormError>
    where
        F: FnOnce(&mut Value) -> bool,
    {
        let Some(value) = self.values.get_mut(id) else {
            return Err(FormError::UnknownField(FieldId::from(id)));
        };

        let before = value.clone();
        if !apply(value) {
            return Err(FormError::KindMismatch {
                field: FieldId::from(id),
                expected,
            });
        }

        let mut events = Vec::new();
        if *value != before {
            events.push(FormEvent::ValueChanged { id: FieldId::from(id) });
        }
        if self.errors.remove(id).is_some() {
            events.push(FormEvent::ErrorCleared { id: FieldId::from(id) });
        }

        Ok(events)
    }
}
