use regex::{Captures, Regex};
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static pattern"));

/// Fills `{name}` placeholders from `lookup`. Unknown names stay as written.
pub fn render<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures<'_>| {
            lookup(&caps[1]).unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::render;

    #[test]
    fn fills_known_placeholders() {
        let message = render("Thank you, {name}! You've been registered for {event}.", |key| {
            match key {
                "name" => Some("Sam".to_string()),
                "event" => Some("Fundraiser Gala".to_string()),
                _ => None,
            }
        });
        assert_eq!(message, "Thank you, Sam! You've been registered for Fundraiser Gala.");
    }

    #[test]
    fn leaves_unknown_placeholders_and_dollar_signs() {
        let message = render("Thank you for your ${amount} gift {unknown}", |key| {
            (key == "amount").then(|| "25".to_string())
        });
        assert_eq!(message, "Thank you for your $25 gift {unknown}");
    }
}
