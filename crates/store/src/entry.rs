use chrono::{DateTime, Utc};
use core_types::{Trade, TradeStatus, TradeType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

/// A fully specified trade as entered through the advanced form.
///
/// This is the single place where `pnl` is derived from prices: once the
/// draft becomes a `Trade`, the stored pnl is authoritative and the analytics
/// engine never recomputes it.
#[derive(Debug, Clone)]
pub struct TradeDraft {
    pub asset_pair: String,
    pub trade_type: TradeType,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub quantity: Decimal,
    pub fees: Decimal,
    pub exchange: Option<String>,
    pub strategy_tag: Option<String>,
    pub notes: Option<String>,
    pub status: TradeStatus,
}

impl TradeDraft {
    /// Materializes the draft, deriving pnl when the trade is closed with a
    /// known exit price: `(exit - entry) * quantity - fees` for longs, with
    /// entry and exit swapped for shorts.
    pub fn into_trade(self, trade_date: DateTime<Utc>) -> Trade {
        let pnl = match (self.exit_price, self.status) {
            (Some(exit), TradeStatus::Closed) => {
                let gross = match self.trade_type {
                    TradeType::Long => (exit - self.entry_price) * self.quantity,
                    TradeType::Short => (self.entry_price - exit) * self.quantity,
                };
                Some(gross - self.fees)
            }
            _ => None,
        };

        Trade {
            id: Uuid::new_v4().to_string(),
            asset_pair: self.asset_pair,
            trade_type: self.trade_type,
            entry_price: self.entry_price,
            exit_price: self.exit_price,
            quantity: self.quantity,
            fees: self.fees,
            pnl,
            strategy_tag: self.strategy_tag,
            exchange: self.exchange,
            status: self.status,
            trade_date,
            notes: self.notes,
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

/// The quick-add form: the user records only the outcome and the amount.
///
/// Entry and exit prices are synthesized around a fixed placeholder so the
/// record still carries plausible price fields; the supplied amount is the
/// authoritative pnl.
#[derive(Debug, Clone)]
pub struct QuickAdd {
    pub asset_pair: String,
    pub outcome: Outcome,
    pub amount: Decimal,
    pub exchange: Option<String>,
    pub strategy_tag: Option<String>,
}

impl QuickAdd {
    const PLACEHOLDER_ENTRY: Decimal = dec!(100);

    pub fn into_trade(self, trade_date: DateTime<Utc>) -> Trade {
        let amount = self.amount.abs();
        let (pnl, exit_price) = match self.outcome {
            Outcome::Win => (amount, Self::PLACEHOLDER_ENTRY + amount),
            // A loss larger than the placeholder entry would synthesize a
            // negative exit price, which the journal refuses to load.
            Outcome::Loss => (
                -amount,
                (Self::PLACEHOLDER_ENTRY - amount).max(Decimal::ZERO),
            ),
        };

        Trade {
            id: Uuid::new_v4().to_string(),
            asset_pair: self.asset_pair,
            trade_type: TradeType::Long,
            entry_price: Self::PLACEHOLDER_ENTRY,
            exit_price: Some(exit_price),
            quantity: dec!(1),
            fees: Decimal::ZERO,
            pnl: Some(pnl),
            strategy_tag: self.strategy_tag,
            exchange: self.exchange,
            status: TradeStatus::Closed,
            trade_date,
            notes: None,
            image_url: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn when() -> DateTime<Utc> {
        "2025-06-01T10:00:00Z".parse().unwrap()
    }

    fn draft() -> TradeDraft {
        TradeDraft {
            asset_pair: "BTC/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(40000),
            exit_price: Some(dec!(41000)),
            quantity: dec!(0.5),
            fees: dec!(2.50),
            exchange: Some("Binance".to_string()),
            strategy_tag: None,
            notes: None,
            status: TradeStatus::Closed,
        }
    }

    #[test]
    fn long_pnl_is_exit_minus_entry_times_quantity_minus_fees() {
        let trade = draft().into_trade(when());
        assert_eq!(trade.pnl, Some(dec!(497.50)));
        assert!(trade.status.is_closed());
    }

    #[test]
    fn short_pnl_swaps_entry_and_exit() {
        let mut d = draft();
        d.trade_type = TradeType::Short;
        let trade = d.into_trade(when());
        assert_eq!(trade.pnl, Some(dec!(-502.50)));
    }

    #[test]
    fn open_draft_has_no_pnl() {
        let mut d = draft();
        d.status = TradeStatus::Open;
        d.exit_price = None;
        let trade = d.into_trade(when());
        assert_eq!(trade.pnl, None);
    }

    #[test]
    fn quick_add_records_the_amount_as_pnl() {
        let win = QuickAdd {
            asset_pair: "SOL/USDT".to_string(),
            outcome: Outcome::Win,
            amount: dec!(75),
            exchange: None,
            strategy_tag: Some("Scalping".to_string()),
        }
        .into_trade(when());
        assert_eq!(win.pnl, Some(dec!(75)));
        assert_eq!(win.exit_price, Some(dec!(175)));

        let loss = QuickAdd {
            asset_pair: "SOL/USDT".to_string(),
            outcome: Outcome::Loss,
            amount: dec!(30),
            exchange: None,
            strategy_tag: None,
        }
        .into_trade(when());
        assert_eq!(loss.pnl, Some(dec!(-30)));
        assert_eq!(loss.exit_price, Some(dec!(70)));
    }

    #[test]
    fn quick_add_loss_beyond_placeholder_clamps_exit_at_zero() {
        let trade = QuickAdd {
            asset_pair: "BTC/USDT".to_string(),
            outcome: Outcome::Loss,
            amount: dec!(150),
            exchange: None,
            strategy_tag: None,
        }
        .into_trade(when());

        // The pnl carries the full loss; only the synthetic exit is clamped.
        assert_eq!(trade.pnl, Some(dec!(-150)));
        assert_eq!(trade.exit_price, Some(dec!(0)));
        assert!(trade.validate().is_ok());

        // The written record must survive a reload.
        let json = serde_json::to_string(&vec![trade]).unwrap();
        let reloaded = crate::journal::parse_journal(&json).unwrap();
        assert_eq!(reloaded[0].pnl, Some(dec!(-150)));
    }
}
