use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A watched ticker that is not (necessarily) held.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: Uuid,
    /// Ticker symbol, uppercased
    pub ticker: String,
    #[serde(default)]
    pub company_name: Option<String>,
}

impl Favorite {
    pub fn new(ticker: impl Into<String>, company_name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            ticker: ticker.into().trim().to_uppercase(),
            company_name,
        }
    }
}
