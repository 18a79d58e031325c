use crate::donation::currency::format_usd;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignProgress {
    pub name: String,
    pub goal: f64,
    pub raised: f64,
}

impl CampaignProgress {
    pub fn new(name: impl Into<String>, goal: f64, raised: f64) -> Self {
        Self {
            name: name.into(),
            goal,
            raised,
        }
    }

    /// Share of the goal raised, capped at 100.
    pub fn percentage(&self) -> f64 {
        if self.goal <= 0.0 || !self.goal.is_finite() {
            return 0.0;
        }
        (self.raised * 100.0 / self.goal).clamp(0.0, 100.0)
    }

    pub fn summary(&self) -> String {
        format!(
            "{}: {} raised of {} goal ({:.0}%)",
            self.name,
            format_usd(self.raised),
            format_usd(self.goal),
            self.percentage()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::CampaignProgress;

    #[test]
    fn percentage_is_capped() {
        let water = CampaignProgress::new("Clean Water Project", 50_000.0, 30_000.0);
        assert_eq!(water.percentage(), 60.0);

        let overfunded = CampaignProgress::new("Food Relief", 1_000.0, 2_500.0);
        assert_eq!(overfunded.percentage(), 100.0);
    }

    #[test]
    fn zero_goal_reports_nothing_raised() {
        assert_eq!(CampaignProgress::new("Empty", 0.0, 10.0).percentage(), 0.0);
    }

    #[test]
    fn summary_uses_whole_dollars() {
        let education = CampaignProgress::new("Education Support Program", 25_000.0, 22_000.0);
        assert_eq!(
            education.summary(),
            "Education Support Program: $22,000 raised of $25,000 goal (88%)"
        );
    }
}
