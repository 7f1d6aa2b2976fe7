use crate::enums::{TradeStatus, TradeType};
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single journal entry: one trade as recorded by the user.
///
/// This is the input entity for the entire analytics pipeline. The struct is
/// treated as immutable once it enters the system; aggregation never mutates
/// a trade and never re-derives `pnl` from the price fields. When `pnl` is
/// present it is the authoritative realized result, produced by the
/// trade-entry layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// An opaque unique identifier for this trade.
    pub id: String,
    /// The traded market, free-form (e.g. "BTC/USDT").
    pub asset_pair: String,
    pub trade_type: TradeType,
    pub entry_price: Decimal,
    /// Absent while the position is still open.
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    /// Exchange fees paid, defaults to zero when not recorded.
    pub fees: Decimal,
    /// Realized profit or loss. `None` means not yet closed or not computed.
    pub pnl: Option<Decimal>,
    pub strategy_tag: Option<String>,
    pub exchange: Option<String>,
    pub status: TradeStatus,
    /// The instant the trade is attributed to. Sole ordering and filtering key.
    pub trade_date: DateTime<Utc>,
    /// Free-form user notes. Not consumed by the analytics engine.
    pub notes: Option<String>,
    /// Screenshot or chart attachment reference. Not consumed by the engine.
    pub image_url: Option<String>,
}

impl Trade {
    /// Checks the numeric invariants every trade must satisfy before it may
    /// enter the analytics engine: prices, quantity and fees are non-negative.
    pub fn validate(&self) -> Result<(), CoreError> {
        let non_negative = |field: &str, value: Decimal| {
            if value.is_sign_negative() {
                Err(CoreError::InvalidField {
                    field: field.to_string(),
                    reason: format!("must be >= 0, got {}", value),
                })
            } else {
                Ok(())
            }
        };

        non_negative("entry_price", self.entry_price)?;
        if let Some(exit) = self.exit_price {
            non_negative("exit_price", exit)?;
        }
        non_negative("quantity", self.quantity)?;
        non_negative("fees", self.fees)?;
        Ok(())
    }

    /// Returns the realized result of this trade, treating an absent `pnl` as zero.
    pub fn realized_pnl(&self) -> Decimal {
        self.pnl.unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_trade() -> Trade {
        Trade {
            id: "t-1".to_string(),
            asset_pair: "BTC/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(40000),
            exit_price: Some(dec!(41000)),
            quantity: dec!(0.5),
            fees: dec!(2.50),
            pnl: Some(dec!(497.50)),
            strategy_tag: Some("Breakout".to_string()),
            exchange: Some("Binance".to_string()),
            status: TradeStatus::Closed,
            trade_date: "2025-03-01T12:00:00Z".parse().unwrap(),
            notes: None,
            image_url: None,
        }
    }

    #[test]
    fn validate_accepts_well_formed_trade() {
        assert!(sample_trade().validate().is_ok());
    }

    #[test]
    fn validate_rejects_negative_quantity() {
        let mut trade = sample_trade();
        trade.quantity = dec!(-1);
        assert!(trade.validate().is_err());
    }

    #[test]
    fn realized_pnl_defaults_to_zero() {
        let mut trade = sample_trade();
        trade.pnl = None;
        assert_eq!(trade.realized_pnl(), Decimal::ZERO);
    }

    #[test]
    fn enums_serialize_lowercase() {
        let trade = sample_trade();
        let json = serde_json::to_value(&trade).unwrap();
        assert_eq!(json["trade_type"], "long");
        assert_eq!(json["status"], "closed");
    }
}
