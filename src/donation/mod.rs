pub mod amount;
pub mod currency;
pub mod impact;
pub mod progress;

pub use amount::{AmountMessages, AmountRule, AmountSelection};
pub use currency::{format_amount, format_usd};
pub use impact::{PresetAmount, impact_preview};
pub use progress::CampaignProgress;
