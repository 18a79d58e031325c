use crate::donation::currency::format_usd;
use serde::{Deserialize, Serialize};

/// The donor's amount choice. A preset and a custom amount can never both be
/// populated: picking one replaces the other.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AmountSelection {
    #[default]
    None,
    Preset(u32),
    Custom(String),
}

impl AmountSelection {
    /// Nothing picked and nothing typed. Whitespace in the custom box counts
    /// as typed, so it is reported as an unreadable amount.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::None => true,
            Self::Preset(_) => false,
            Self::Custom(text) => text.is_empty(),
        }
    }

    pub fn select_preset(&mut self, amount: u32) {
        *self = Self::Preset(amount);
    }

    /// Typing a non-empty custom amount drops any preset. Clearing the box
    /// only clears a custom amount; a preset picked afterwards stays put.
    pub fn enter_custom(&mut self, text: &str) {
        if !text.is_empty() {
            *self = Self::Custom(text.to_string());
        } else if matches!(self, Self::Custom(_)) {
            *self = Self::None;
        }
    }

    pub fn preset(&self) -> Option<u32> {
        match self {
            Self::Preset(amount) => Some(*amount),
            _ => None,
        }
    }

    pub fn custom_text(&self) -> Option<&str> {
        match self {
            Self::Custom(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// The numeric amount the donor means, if one can be read.
    pub fn resolved(&self) -> Option<f64> {
        match self {
            Self::None => None,
            Self::Preset(amount) => Some(f64::from(*amount)),
            Self::Custom(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmountMessages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invalid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmountRule {
    #[serde(default = "default_min")]
    pub min: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub messages: AmountMessages,
}

fn default_min() -> f64 {
    1.0
}

impl Default for AmountRule {
    fn default() -> Self {
        Self::general()
    }
}

impl AmountRule {
    /// Rule used by the main donate page: a lower bound only.
    pub fn general() -> Self {
        Self {
            min: default_min(),
            max: None,
            messages: AmountMessages::default(),
        }
    }

    /// Rule used on a project page, which also caps a single gift.
    pub fn project() -> Self {
        let min = default_min();
        let valid = "Please select or enter a valid donation amount".to_string();
        Self {
            min,
            max: Some(10_000.0),
            messages: AmountMessages {
                missing: Some(valid.clone()),
                invalid: Some(valid),
                minimum: Some(format!("Minimum donation amount is {}", format_usd(min))),
                maximum: None,
            },
        }
    }

    pub fn with_max(mut self, max: Option<f64>) -> Self {
        self.max = max;
        self
    }

    pub fn with_messages(mut self, messages: AmountMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn missing_message(&self) -> String {
        self.messages
            .missing
            .clone()
            .unwrap_or_else(|| "Please select or enter a donation amount".to_string())
    }

    pub fn minimum_message(&self) -> String {
        self.messages
            .minimum
            .clone()
            .unwrap_or_else(|| format!("Custom amount must be at least {}", format_usd(self.min)))
    }

    /// Unreadable or non-positive input. Falls back to the minimum message.
    pub fn invalid_message(&self) -> String {
        self.messages
            .invalid
            .clone()
            .unwrap_or_else(|| self.minimum_message())
    }

    pub fn maximum_message(&self) -> String {
        match (&self.messages.maximum, self.max) {
            (Some(message), _) => message.clone(),
            (None, Some(max)) => format!("Maximum donation amount is {}", format_usd(max)),
            (None, None) => "Maximum donation amount exceeded".to_string(),
        }
    }
}
