use crate::core::FieldId;
use crate::core::field::{FieldKind, FieldSpec};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("form '{form}' declares field '{field}' more than once")]
    DuplicateField { form: String, field: FieldId },
    #[error("form '{form}' has no fields")]
    NoFields { form: String },
    #[error("selection '{field}' in form '{form}' has no options")]
    NoOptions { form: String, field: FieldId },
    #[error("amount field '{field}' in form '{form}' has minimum {min} above maximum {max}")]
    InvertedLimits {
        form: String,
        field: FieldId,
        min: f64,
        max: f64,
    },
    #[error("invalid form schema: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Everything that distinguishes one form from another: its fields, where it
/// is sent, and what the donor or visitor is told afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub id: String,
    pub title: String,
    /// Path segment under `/api/` the form posts to.
    pub endpoint: String,
    pub fields: Vec<FieldSpec>,
    pub success_message: String,
    pub failure_message: String,
    /// Fixed entries merged into the payload and available to messages.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub context: IndexMap<String, String>,
}

impl FormSchema {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            endpoint: id.clone(),
            id,
            title: title.into(),
            fields: Vec::new(),
            success_message: "Thank you! Your submission has been received.".to_string(),
            failure_message: "Something went wrong. Please try again.".to_string(),
            context: IndexMap::new(),
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_success_message(mut self, message: impl Into<String>) -> Self {
        self.success_message = message.into();
        self
    }

    pub fn with_failure_message(mut self, message: impl Into<String>) -> Self {
        self.failure_message = message.into();
        self
    }

    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, id: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.id.as_str() == id)
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.iter().map(|field| &field.id)
    }

    pub fn amount_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|field| field.kind.is_amount())
    }

    pub fn check(&self) -> Result<(), SchemaError> {
        if self.fields.is_empty() {
            return Err(SchemaError::NoFields {
                form: self.id.clone(),
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateField {
                    form: self.id.clone(),
                    field: field.id.clone(),
                });
            }

            match &field.kind {
                FieldKind::Selection { options } if options.is_empty() => {
                    return Err(SchemaError::NoOptions {
                        form: self.id.clone(),
                        field: field.id.clone(),
                    });
                }
                FieldKind::DonationAmount { rule, .. } => {
                    if let Some(max) = rule.max.filter(|max| *max < rule.min) {
                        return Err(SchemaError::InvertedLimits {
                            form: self.id.clone(),
                            field: field.id.clone(),
                            min: rule.min,
                            max,
                        });
                    }
                }
                _ => {}
            }
        }

        Ok(())
    }

    pub fn from_yaml_str(source: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_yaml::from_str(source)?;
        schema.check()?;
        Ok(schema)
    }

    pub fn to_yaml_string(&self) -> Result<String, SchemaError> {
        Ok(serde_yaml::to_string(self)?)
    }
}
