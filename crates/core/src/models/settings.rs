use serde::{Deserialize, Serialize};

/// User-configurable settings, stored inside the encrypted ledger file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Display names of the two portfolio owners. Hypothesis contribution
    /// fields owner1/owner2 refer to these, in order.
    pub owners: [String; 2],

    /// The currency all values are stored and displayed in.
    /// Quotes in other currencies are converted on refresh.
    pub base_currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            owners: ["Owner 1".to_string(), "Owner 2".to_string()],
            base_currency: "EUR".to_string(),
        }
    }
}
