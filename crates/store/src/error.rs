use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to access journal file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse journal file: {0}")]
    Parse(#[from] serde_json::Error),

    /// An unparseable trade date is fatal: silently misattributing the trade
    /// would corrupt the equity curve ordering.
    #[error("Trade '{id}' has an unparseable trade_date: '{raw}'")]
    InvalidTradeDate { id: String, raw: String },

    #[error("Trade '{id}' failed validation: {source}")]
    InvalidTrade {
        id: String,
        #[source]
        source: CoreError,
    },
}
