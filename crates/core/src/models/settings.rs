use serde::{Deserialize, Serialize};

/// Label used for holdings that carry no class.
pub const DEFAULT_UNCLASSIFIED_LABEL: &str = "Unclassified";

/// User-configurable settings, stored inside the portfolio file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency all values are entered in (e.g., "BRL", "USD"). Informational only:
    /// no conversion happens anywhere in the library.
    pub default_currency: String,

    /// Group key for holdings whose class is missing or blank.
    pub unclassified_label: String,

    /// Exchange suffix appended to tickers when asking for quotes (e.g., ".SA" for B3).
    #[serde(default)]
    pub ticker_suffix: Option<String>,

    /// Field separator used by CSV exports.
    pub csv_delimiter: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_currency: "BRL".to_string(),
            unclassified_label: DEFAULT_UNCLASSIFIED_LABEL.to_string(),
            ticker_suffix: None,
            csv_delimiter: ';',
        }
    }
}

impl Settings {
    /// Ticker as it should be sent to a quote provider.
    #[must_use]
    pub fn quote_symbol(&self, ticker: &str) -> String {
        let ticker = ticker.trim().to_uppercase();
        match self.ticker_suffix.as_deref() {
            Some(suffix) if !suffix.is_empty() && !ticker.ends_with(&suffix.to_uppercase()) => {
                format!("{ticker}{}", suffix.to_uppercase())
            }
            _ => ticker,
        }
    }
}
