use crate::core::FieldId;
use crate::core::field::{FieldKind, FieldSpec};
use crate::core::schema::FormSchema;
use crate::core::value::{FormValues, Value};
use crate::donation::AmountSelection;
use crate::input::validators;
use indexmap::IndexMap;
use serde::Serialize;

/// One message per failing field, in schema order. Empty means valid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FieldErrors {
    errors: IndexMap<FieldId, String>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.errors.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.errors.contains_key(id)
    }

    pub fn insert(&mut self, id: impl Into<FieldId>, message: impl Into<String>) {
        self.errors.insert(id.into(), message.into());
    }

    pub fn remove(&mut self, id: &str) -> Option<String> {
        self.errors.shift_remove(id)
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &str)> {
        self.errors.iter().map(|(id, message)| (id, message.as_str()))
    }
}

/// Checks a single field against its current value. A missing value is
/// treated as empty.
pub fn validate_field(field: &FieldSpec, value: Option<&Value>) -> Result<(), String> {
    let message = field.required_message();

    match &field.kind {
        FieldKind::Text => validators::required(text_of(value), &message),
        FieldKind::Email => validators::email(text_of(value), &message),
        FieldKind::Selection { options } => {
            validators::selection(text_of(value), options, &message)
        }
        FieldKind::DonationAmount { rule, .. } => {
            let none = AmountSelection::None;
            let selection = value.and_then(Value::as_amount).unwrap_or(&none);
            if selection.is_empty() {
                return Err(message);
            }
            validators::amount(selection, rule).map(|_| ())
        }
    }
}

/// Computes the complete error set for `values`. Pure: the same input
/// always yields the same errors.
pub fn validate(schema: &FormSchema, values: &FormValues) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for field in &schema.fields {
        if let Err(message) = validate_field(field, values.get(field.id.as_str())) {
            errors.insert(field.id.clone(), message);
        }
    }
    errors
}

fn text_of(value: Option<&Value>) -> &str {
    value.and_then(Value::as_text).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::validate;
    use crate::core::value::{FormValues, Value};
    use crate::donation::AmountSelection;
    use crate::forms;

    fn text_values(pairs: &[(&str, &str)]) -> FormValues {
        let mut values = FormValues::new();
        for (id, text) in pairs {
            values.set(*id, Value::Text(text.to_string()));
        }
        values
    }

    #[test]
    fn complete_contact_form_is_valid() {
        let values = text_values(&[
            ("name", "Jane Doe"),
            ("email", "jane@example.com"),
            ("subject", "Hello"),
            ("message", "Test message"),
        ]);

        assert!(validate(&forms::contact(), &values).is_valid());
    }

    #[test]
    fn whitespace_only_required_fields_fail() {
        let values = text_values(&[
            ("name", "   "),
            ("email", "jane@example.com"),
            ("subject", "Hello"),
            ("message", "\n\t"),
        ]);

        let errors = validate(&forms::contact(), &values);
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("message"), Some("Message is required"));
    }

    #[test]
    fn volunteer_form_reports_every_field() {
        let values = text_values(&[
            ("name", ""),
            ("email", "x"),
            ("skills", ""),
            ("availability", ""),
        ]);

        let errors = validate(&forms::volunteer(), &values);
        let collected: Vec<(&str, &str)> = errors
            .iter()
            .map(|(id, message)| (id.as_str(), message))
            .collect();

        assert_eq!(
            collected,
            vec![
                ("name", "Name is required"),
                ("email", "Please enter a valid email address"),
                ("skills", "Please describe your skills or interests"),
                ("availability", "Please select your availability"),
            ]
        );
    }

    #[test]
    fn event_registration_requires_event() {
        let values = text_values(&[("name", "Sam"), ("email", "sam@example.org"), ("event", "")]);

        let errors = validate(&forms::event_registration(), &values);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("event"), Some("Please select an event"));
    }

    #[test]
    fn flagged_and_accepted_emails() {
        for bad in ["abc", "a@b", "@b.com"] {
            let values =
                text_values(&[("name", "N"), ("email", bad), ("event", "Fundraiser Gala")]);
            let errors = validate(&forms::event_registration(), &values);
            assert!(errors.contains("email"), "{bad} should be flagged");
        }

        let values = text_values(&[
            ("name", "N"),
            ("email", "a@b.co"),
            ("event", "Fundraiser Gala"),
        ]);
        assert!(validate(&forms::event_registration(), &values).is_valid());
    }

    #[test]
    fn validation_is_idempotent() {
        let values = text_values(&[("name", ""), ("email", "nope")]);
        let schema = forms::contact();

        assert_eq!(validate(&schema, &values), validate(&schema, &values));
    }

    #[test]
    fn missing_entries_count_as_empty() {
        let errors = validate(&forms::contact(), &FormValues::new());
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get("email"), Some("Email is required"));
    }

    #[test]
    fn donation_amount_scenarios() {
        let mut values = FormValues::new();
        values.set("amount", Value::Amount(AmountSelection::Custom("0.5".into())));
        let errors = validate(&forms::donation(), &values);
        assert_eq!(errors.get("amount"), Some("Custom amount must be at least $1"));

        values.set("amount", Value::Amount(AmountSelection::Custom("15000".into())));
        let errors = validate(&forms::project_donation(Default::default()), &values);
        assert_eq!(errors.get("amount"), Some("Maximum donation amount is $10,000"));

        values.set("amount", Value::Amount(AmountSelection::None));
        let errors = validate(&forms::donation(), &values);
        assert_eq!(
            errors.get("amount"),
            Some("Please select or enter a donation amount")
        );
    }
}
