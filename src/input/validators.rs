use crate::core::field::SelectOption;
use crate::donation::{AmountRule, AmountSelection};
use regex::Regex;
use std::sync::LazyLock;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static pattern"));

pub const INVALID_EMAIL: &str = "Please enter a valid email address";

pub fn required(value: &str, message: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(message.to_string())
    } else {
        Ok(())
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL.is_match(value)
}

/// Required first, then the shape check.
pub fn email(value: &str, required_message: &str) -> Result<(), String> {
    required(value, required_message)?;
    if is_email(value) {
        Ok(())
    } else {
        Err(INVALID_EMAIL.to_string())
    }
}

/// An empty value, or one outside a declared option list, counts as nothing
/// selected.
pub fn selection(value: &str, options: &[SelectOption], message: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(message.to_string());
    }
    if !options.is_empty() && !options.iter().any(|option| option.value == value) {
        return Err(message.to_string());
    }
    Ok(())
}

pub fn amount(selection: &AmountSelection, rule: &AmountRule) -> Result<f64, String> {
    if selection.is_empty() {
        return Err(rule.missing_message());
    }

    let Some(amount) = selection.resolved() else {
        return Err(rule.invalid_message());
    };

    if amount <= 0.0 {
        return Err(rule.invalid_message());
    }
    if amount < rule.min {
        return Err(rule.minimum_message());
    }
    if rule.max.is_some_and(|max| amount > max) {
        return Err(rule.maximum_message());
    }

    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::{amount, email, is_email, required, selection};
    use crate::core::field::SelectOption;
    use crate::donation::{AmountRule, AmountSelection};

    #[test]
    fn required_trims_whitespace() {
        assert!(required("   \t", "Name is required").is_err());
        assert!(required(" Jane ", "Name is required").is_ok());
    }

    #[test]
    fn email_pattern() {
        for bad in ["abc", "a@b", "@b.com", "a b@c.de", "a@b@c.de", "a@.com"] {
            assert!(!is_email(bad), "{bad} should be rejected");
        }
        for good in ["a@b.co", "jane@example.com", "first.last@sub.example.org"] {
            assert!(is_email(good), "{good} should be accepted");
        }
    }

    #[test]
    fn email_reports_required_before_shape() {
        assert_eq!(
            email("", "Email is required"),
            Err("Email is required".to_string())
        );
        assert_eq!(
            email("x", "Email is required"),
            Err("Please enter a valid email address".to_string())
        );
    }

    #[test]
    fn selection_must_be_a_declared_option() {
        let options = vec![SelectOption::new("Full-time"), SelectOption::new("Part-time")];
        assert!(selection("", &options, "pick").is_err());
        assert!(selection("Weekends", &options, "pick").is_err());
        assert!(selection("Part-time", &options, "pick").is_ok());
        assert!(selection("anything", &[], "pick").is_ok());
    }

    #[test]
    fn general_amount_rules() {
        let rule = AmountRule::general();
        let custom = |text: &str| AmountSelection::Custom(text.to_string());

        assert_eq!(
            amount(&AmountSelection::None, &rule),
            Err("Please select or enter a donation amount".to_string())
        );
        assert_eq!(
            amount(&custom("0.5"), &rule),
            Err("Custom amount must be at least $1".to_string())
        );
        assert_eq!(
            amount(&custom("abc"), &rule),
            Err("Custom amount must be at least $1".to_string())
        );
        assert_eq!(amount(&custom("15000"), &rule), Ok(15000.0));
        assert_eq!(amount(&AmountSelection::Preset(25), &rule), Ok(25.0));
    }

    #[test]
    fn blank_custom_amount_is_entered_but_unreadable() {
        let blank = AmountSelection::Custom("   ".to_string());
        assert!(!blank.is_empty());

        assert_eq!(
            amount(&blank, &AmountRule::general()),
            Err("Custom amount must be at least $1".to_string())
        );
        assert_eq!(
            amount(&blank, &AmountRule::project()),
            Err("Please select or enter a valid donation amount".to_string())
        );
    }

    #[test]
    fn project_amount_rules() {
        let rule = AmountRule::project();
        let custom = |text: &str| AmountSelection::Custom(text.to_string());

        assert_eq!(
            amount(&custom("15000"), &rule),
            Err("Maximum donation amount is $10,000".to_string())
        );
        assert_eq!(
            amount(&custom("0.5"), &rule),
            Err("Minimum donation amount is $1".to_string())
        );
        assert_eq!(
            amount(&custom("0"), &rule),
            Err("Please select or enter a valid donation amount".to_string())
        );
        assert_eq!(amount(&custom("10000"), &rule), Ok(10000.0));
    }
}
