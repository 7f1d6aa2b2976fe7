use crate::error::StoreError;
use chrono::DateTime;
use core_types::{Trade, TradeStatus, TradeType};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

/// A journal record as it appears on disk, before coercion.
///
/// Monetary fields are `Decimal` behind serde, which already accepts strings
/// and numbers interchangeably; the date is kept raw so a bad value can be
/// reported with the record id instead of failing the whole document parse.
#[derive(Debug, Deserialize)]
struct RawTrade {
    id: String,
    asset_pair: String,
    trade_type: TradeType,
    entry_price: Decimal,
    #[serde(default)]
    exit_price: Option<Decimal>,
    quantity: Decimal,
    #[serde(default)]
    fees: Option<Decimal>,
    #[serde(default)]
    pnl: Option<Decimal>,
    #[serde(default)]
    strategy_tag: Option<String>,
    #[serde(default)]
    exchange: Option<String>,
    status: TradeStatus,
    trade_date: String,
    #[serde(default)]
    notes: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl RawTrade {
    fn into_trade(self) -> Result<Trade, StoreError> {
        let trade_date = DateTime::parse_from_rfc3339(&self.trade_date)
            .map_err(|_| StoreError::InvalidTradeDate {
                id: self.id.clone(),
                raw: self.trade_date.clone(),
            })?
            .to_utc();

        let trade = Trade {
            id: self.id,
            asset_pair: self.asset_pair,
            trade_type: self.trade_type,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            quantity: self.quantity,
            fees: self.fees.unwrap_or(Decimal::ZERO),
            pnl: self.pnl,
            strategy_tag: self.strategy_tag,
            exchange: self.exchange,
            status: self.status,
            trade_date,
            notes: self.notes,
            image_url: self.image_url,
        };

        trade.validate().map_err(|source| StoreError::InvalidTrade {
            id: trade.id.clone(),
            source,
        })?;

        Ok(trade)
    }
}

/// Parses a journal document into validated trades.
pub fn parse_journal(json: &str) -> Result<Vec<Trade>, StoreError> {
    let raw: Vec<RawTrade> = serde_json::from_str(json)?;
    raw.into_iter().map(RawTrade::into_trade).collect()
}

/// The journal file on disk. All reads re-parse the file, so the store always
/// reflects the latest snapshot.
#[derive(Debug, Clone)]
pub struct TradeStore {
    path: PathBuf,
}

impl TradeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Loads and validates every trade in the journal. A journal that does not
    /// exist yet is an empty journal, not an error.
    pub fn load(&self) -> Result<Vec<Trade>, StoreError> {
        if !self.path.exists() {
            tracing::warn!(path = %self.path.display(), "journal file not found, treating as empty");
            return Ok(Vec::new());
        }
        let json = fs::read_to_string(&self.path)?;
        let trades = parse_journal(&json)?;
        tracing::debug!(count = trades.len(), "journal loaded");
        Ok(trades)
    }

    /// Replaces the journal contents with the given trades.
    pub fn save(&self, trades: &[Trade]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(trades)?;
        fs::write(&self.path, json)?;
        Ok(())
    }

    /// Appends one trade to the journal. The trade is validated first, so a
    /// record `load` would reject can never be written and poison the file.
    pub fn append(&self, trade: Trade) -> Result<(), StoreError> {
        trade.validate().map_err(|source| StoreError::InvalidTrade {
            id: trade.id.clone(),
            source,
        })?;
        let mut trades = self.load()?;
        tracing::info!(id = %trade.id, asset_pair = %trade.asset_pair, "appending trade to journal");
        trades.push(trade);
        self.save(&trades)
    }
}
