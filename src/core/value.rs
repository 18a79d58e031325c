use crate::core::FieldId;
use crate::donation::{AmountSelection, format_amount};
use indexmap::IndexMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Amount(AmountSelection),
}

impl Value {
    pub fn empty_text() -> Self {
        Self::Text(String::new())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(v) => v.is_empty(),
            Self::Amount(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v.as_str()),
            Self::Amount(_) => None,
        }
    }

    pub fn as_amount(&self) -> Option<&AmountSelection> {
        match self {
            Self::Amount(v) => Some(v),
            Self::Text(_) => None,
        }
    }

    /// Human-readable form used in notification messages.
    pub fn display(&self) -> String {
        match self {
            Self::Text(v) => v.clone(),
            Self::Amount(selection) => match selection.resolved() {
                Some(amount) => format_amount(amount),
                None => selection.custom_text().unwrap_or_default().to_string(),
            },
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Self::Text(v) => serde_json::Value::String(v.clone()),
            Self::Amount(selection) => match selection {
                AmountSelection::None => serde_json::Value::Null,
                AmountSelection::Preset(amount) => serde_json::json!(amount),
                AmountSelection::Custom(text) => selection
                    .resolved()
                    .and_then(serde_json::Number::from_f64)
                    .map(serde_json::Value::Number)
                    .unwrap_or_else(|| serde_json::Value::String(text.clone())),
            },
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// Current field values of one form, in schema order.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct FormValues {
    values: IndexMap<FieldId, Value>,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: impl Into<FieldId>, value: Value) {
        self.values.insert(id.into(), value);
    }

    pub fn get(&self, id: &str) -> Option<&Value> {
        self.values.get(id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut Value> {
        self.values.get_mut(id)
    }

    pub fn text(&self, id: &str) -> Option<&str> {
        self.get(id).and_then(Value::as_text)
    }

    pub fn amount(&self, id: &str) -> Option<&AmountSelection> {
        self.get(id).and_then(Value::as_amount)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.values.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldId, &Value)> {
        self.values.iter()
    }

    /// JSON body for a submit port: every field, followed by context entries
    /// that no field already claims.
    pub fn payload(&self, context: &IndexMap<String, String>) -> serde_json::Value {
        let mut object = serde_json::Map::new();
        for (id, value) in &self.values {
            object.insert(id.to_string(), value.to_json());
        }
        for (key, value) in context {
            object
                .entry(key.clone())
                .or_insert_with(|| serde_json::Value::String(value.clone()));
        }
        serde_json::Value::Object(object)
    }
}

#[cfg(test)]
mod tests {
    use super::{FormValues, Value};
    use crate::donation::AmountSelection;
    use indexmap::IndexMap;

    #[test]
    fn payload_carries_fields_with_their_types() {
        let mut values = FormValues::new();
        values.set("name", Value::Text("Jane Doe".into()));
        values.set("amount", Value::Amount(AmountSelection::Preset(25)));

        let payload = values.payload(&IndexMap::new());
        assert_eq!(
            payload,
            serde_json::json!({ "name": "Jane Doe", "amount": 25 })
        );
    }

    #[test]
    fn custom_amount_serialises_as_number_when_readable() {
        let readable = Value::Amount(AmountSelection::Custom("12.5".into()));
        assert_eq!(readable.to_json(), serde_json::json!(12.5));

        let unreadable = Value::Amount(AmountSelection::Custom("lots".into()));
        assert_eq!(unreadable.to_json(), serde_json::json!("lots"));
    }

    #[test]
    fn context_never_overrides_fields() {
        let mut values = FormValues::new();
        values.set("project", Value::Text("typed".into()));

        let mut context = IndexMap::new();
        context.insert("project".to_string(), "context".to_string());
        context.insert("project_id".to_string(), "42".to_string());

        let payload = values.payload(&context);
        assert_eq!(payload["project"], "typed");
        assert_eq!(payload["project_id"], "42");
    }
}
