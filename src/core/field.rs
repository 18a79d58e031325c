use crate::core::FieldId;
use crate::core::value::Value;
use crate::donation::{AmountRule, AmountSelection, PresetAmount};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl SelectOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Email,
    Selection {
        #[serde(default)]
        options: Vec<SelectOption>,
    },
    DonationAmount {
        #[serde(default)]
        presets: Vec<PresetAmount>,
        #[serde(default)]
        rule: AmountRule,
    },
}

impl FieldKind {
    pub fn is_amount(&self) -> bool {
        matches!(self, Self::DonationAmount { .. })
    }

    pub fn initial_value(&self) -> Value {
        match self {
            Self::DonationAmount { .. } => Value::Amount(AmountSelection::None),
            _ => Value::empty_text(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub id: FieldId,
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
    /// Replaces the default "is required" / "Please select" wording.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_message: Option<String>,
}

impl FieldSpec {
    pub fn new(id: impl Into<FieldId>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            required_message: None,
        }
    }

    pub fn text(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    pub fn email(id: impl Into<FieldId>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Email)
    }

    pub fn selection(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(id, label, FieldKind::Selection { options })
    }

    pub fn donation_amount(
        id: impl Into<FieldId>,
        label: impl Into<String>,
        presets: Vec<PresetAmount>,
        rule: AmountRule,
    ) -> Self {
        Self::new(id, label, FieldKind::DonationAmount { presets, rule })
    }

    pub fn with_required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    pub fn required_message(&self) -> String {
        if let Some(message) = &self.required_message {
            return message.clone();
        }

        match &self.kind {
            FieldKind::Selection { .. } => {
                let noun = self.label.to_lowercase();
                format!("Please select {} {noun}", indefinite_article(&noun))
            }
            FieldKind::DonationAmount { rule, .. } => rule.missing_message(),
            FieldKind::Text | FieldKind::Email => format!("{} is required", self.label),
        }
    }
}

fn indefinite_article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}
