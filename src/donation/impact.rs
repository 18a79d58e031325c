use crate::donation::currency::format_amount;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("static pattern"));

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetAmount {
    pub value: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
}

impl PresetAmount {
    pub fn new(value: u32) -> Self {
        Self {
            value,
            impact: None,
        }
    }

    pub fn with_impact(mut self, impact: impl Into<String>) -> Self {
        self.impact = Some(impact.into());
        self
    }
}

/// Describes what `amount` buys, borrowing the line of the closest preset.
///
/// Off-preset amounts scale the first number in that line, so $50 against
/// "feeds a family for 3 days" at $25 reads "feeds a family for 6 days".
pub fn impact_preview(amount: f64, presets: &[PresetAmount]) -> Option<String> {
    if !amount.is_finite() || amount <= 0.0 {
        return None;
    }

    let mut closest: Option<(&PresetAmount, &str)> = None;
    for preset in presets {
        let Some(impact) = preset.impact.as_deref() else {
            continue;
        };
        let distance = (f64::from(preset.value) - amount).abs();
        let better = match closest {
            None => true,
            Some((current, _)) => distance < (f64::from(current.value) - amount).abs(),
        };
        if better {
            closest = Some((preset, impact));
        }
    }

    let (preset, impact) = closest?;
    let shown = format_amount(amount);

    if amount == f64::from(preset.value) {
        return Some(format!("${shown} {impact}"));
    }

    let ratio = amount / f64::from(preset.value.max(1));
    let base = FIRST_NUMBER
        .find(impact)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(1.0);
    let scaled = (ratio * base).round() as i64;
    let line = FIRST_NUMBER.replace(impact, scaled.to_string().as_str());

    Some(format!("${shown} {line}"))
}
