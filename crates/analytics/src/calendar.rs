use crate::error::AnalyticsError;
use chrono::{Datelike, NaiveDate};
use core_types::Trade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated result for one calendar day that saw trading activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayPnl {
    pub date: NaiveDate,
    pub pnl: Decimal,
    pub trade_count: usize,
}

/// Buckets the closed trades of one calendar month by day, for the trading
/// calendar view. Days without trades are omitted; the output is ascending by
/// date.
pub fn daily_pnl(trades: &[Trade], year: i32, month: u32) -> Result<Vec<DayPnl>, AnalyticsError> {
    // Rejects month 0, month 13 and similar before any bucketing happens.
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(AnalyticsError::InvalidMonth { year, month })?;

    let mut days: BTreeMap<NaiveDate, (Decimal, usize)> = BTreeMap::new();

    for trade in trades {
        if !trade.status.is_closed() {
            continue;
        }
        let date = trade.trade_date.date_naive();
        if date.year() != year || date.month() != month {
            continue;
        }
        let slot = days.entry(date).or_insert((Decimal::ZERO, 0));
        slot.0 += trade.realized_pnl();
        slot.1 += 1;
    }

    Ok(days
        .into_iter()
        .map(|(date, (pnl, trade_count))| DayPnl {
            date,
            pnl: pnl.round_dp(2),
            trade_count,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{TradeStatus, TradeType};
    use rust_decimal_macros::dec;

    fn trade(id: &str, pnl: Decimal, date: &str) -> Trade {
        Trade {
            id: id.to_string(),
            asset_pair: "ETH/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(2000),
            exit_price: Some(dec!(2100)),
            quantity: dec!(1),
            fees: dec!(0),
            pnl: Some(pnl),
            strategy_tag: None,
            exchange: None,
            status: TradeStatus::Closed,
            trade_date: date.parse().unwrap(),
            notes: None,
            image_url: None,
        }
    }

    #[test]
    fn buckets_trades_by_day_within_the_month() {
        let trades = vec![
            trade("a", dec!(50), "2025-03-03T09:00:00Z"),
            trade("b", dec!(-20), "2025-03-03T15:00:00Z"),
            trade("c", dec!(10), "2025-03-07T11:00:00Z"),
            trade("d", dec!(99), "2025-04-01T00:00:00Z"),
        ];
        let days = daily_pnl(&trades, 2025, 3).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[0].date, NaiveDate::from_ymd_opt(2025, 3, 3).unwrap());
        assert_eq!(days[0].pnl, dec!(30.00));
        assert_eq!(days[0].trade_count, 2);
        assert_eq!(days[1].pnl, dec!(10.00));
    }

    #[test]
    fn open_trades_do_not_contribute() {
        let mut open = trade("o", dec!(500), "2025-03-03T09:00:00Z");
        open.status = TradeStatus::Open;
        let days = daily_pnl(&[open], 2025, 3).unwrap();
        assert!(days.is_empty());
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert!(matches!(
            daily_pnl(&[], 2025, 13),
            Err(AnalyticsError::InvalidMonth { month: 13, .. })
        ));
    }
}
