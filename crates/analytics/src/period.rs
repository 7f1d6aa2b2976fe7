use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use core_types::Trade;
use serde::{Deserialize, Serialize};

/// The time window applied to the journal before aggregation.
///
/// All variants except `Custom` are anchored to an injected "now" so that the
/// same input always yields the same filtered set. `Custom` carries optional
/// bounds: when either bound is missing the filter yields the empty set, a
/// deliberate "nothing to show yet" state while the user is still picking dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    AllTime,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl Period {
    /// Resolves one of the fixed period names. `Custom` carries dates and is
    /// constructed by the caller, so "custom" is not a recognized name here.
    pub fn from_name(name: &str) -> Option<Period> {
        match name {
            "all-time" | "all" => Some(Period::AllTime),
            "daily" => Some(Period::Daily),
            "weekly" => Some(Period::Weekly),
            "monthly" => Some(Period::Monthly),
            "yearly" => Some(Period::Yearly),
            _ => None,
        }
    }
}

/// Narrows a trade collection to those whose `trade_date` falls inside the
/// period's window, preserving the input order.
///
/// Boundary rules:
/// - `AllTime`: identity.
/// - `Daily`: everything from the start of `now`'s day onward.
/// - `Weekly`: everything from the start of the day seven days before `now`.
/// - `Monthly` / `Yearly`: everything from the first day of `now`'s month / year.
/// - `Custom`: inclusive from `start` 00:00:00.000 through `end` 23:59:59.999;
///   empty when either bound is absent.
pub fn filter_by_period(trades: &[Trade], period: Period, now: DateTime<Utc>) -> Vec<Trade> {
    let floor = match period {
        Period::AllTime => return trades.to_vec(),
        Period::Daily => start_of_day(now.date_naive()),
        Period::Weekly => start_of_day((now - Duration::days(7)).date_naive()),
        Period::Monthly => {
            let first = NaiveDate::from_ymd_opt(now.year(), now.month(), 1).unwrap();
            start_of_day(first)
        }
        Period::Yearly => {
            let first = NaiveDate::from_ymd_opt(now.year(), 1, 1).unwrap();
            start_of_day(first)
        }
        Period::Custom { start, end } => {
            let (Some(start), Some(end)) = (start, end) else {
                return Vec::new();
            };
            let lo = start_of_day(start);
            let hi = end_of_day(end);
            return trades
                .iter()
                .filter(|t| t.trade_date >= lo && t.trade_date <= hi)
                .cloned()
                .collect();
        }
    };

    trades
        .iter()
        .filter(|t| t.trade_date >= floor)
        .cloned()
        .collect()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap().and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::{TradeStatus, TradeType};
    use rust_decimal_macros::dec;

    fn trade_on(id: &str, date: &str) -> Trade {
        Trade {
            id: id.to_string(),
            asset_pair: "BTC/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(100),
            exit_price: Some(dec!(110)),
            quantity: dec!(1),
            fees: dec!(0),
            pnl: Some(dec!(10)),
            strategy_tag: None,
            exchange: None,
            status: TradeStatus::Closed,
            trade_date: date.parse().unwrap(),
            notes: None,
            image_url: None,
        }
    }

    fn now() -> DateTime<Utc> {
        "2025-06-15T12:00:00Z".parse().unwrap()
    }

    #[test]
    fn all_time_is_identity() {
        let trades = vec![
            trade_on("a", "2020-01-01T00:00:00Z"),
            trade_on("b", "2025-06-15T08:00:00Z"),
        ];
        assert_eq!(filter_by_period(&trades, Period::AllTime, now()), trades);
    }

    #[test]
    fn daily_includes_today_excludes_yesterday() {
        let trades = vec![
            trade_on("yesterday", "2025-06-14T23:59:00Z"),
            trade_on("midnight", "2025-06-15T00:00:00Z"),
            trade_on("morning", "2025-06-15T08:30:00Z"),
        ];
        let filtered = filter_by_period(&trades, Period::Daily, now());
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["midnight", "morning"]);
    }

    #[test]
    fn weekly_floor_is_start_of_day_seven_days_back() {
        let trades = vec![
            trade_on("too-old", "2025-06-07T23:59:59Z"),
            trade_on("on-floor", "2025-06-08T00:00:00Z"),
            trade_on("recent", "2025-06-12T10:00:00Z"),
        ];
        let filtered = filter_by_period(&trades, Period::Weekly, now());
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["on-floor", "recent"]);
    }

    #[test]
    fn monthly_and_yearly_floors() {
        let trades = vec![
            trade_on("last-year", "2024-12-31T23:00:00Z"),
            trade_on("january", "2025-01-02T09:00:00Z"),
            trade_on("last-month", "2025-05-31T23:00:00Z"),
            trade_on("this-month", "2025-06-01T00:00:00Z"),
        ];
        let monthly = filter_by_period(&trades, Period::Monthly, now());
        assert_eq!(monthly.len(), 1);
        assert_eq!(monthly[0].id, "this-month");

        let yearly = filter_by_period(&trades, Period::Yearly, now());
        let ids: Vec<&str> = yearly.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["january", "last-month", "this-month"]);
    }

    #[test]
    fn custom_is_inclusive_of_both_end_days() {
        let trades = vec![
            trade_on("before", "2025-02-28T23:59:59Z"),
            trade_on("first", "2025-03-01T00:00:00Z"),
            trade_on("last", "2025-03-10T23:59:59Z"),
            trade_on("after", "2025-03-11T00:00:00Z"),
        ];
        let period = Period::Custom {
            start: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            end: Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()),
        };
        let filtered = filter_by_period(&trades, period, now());
        let ids: Vec<&str> = filtered.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["first", "last"]);
    }

    #[test]
    fn custom_with_missing_bound_is_empty() {
        let trades = vec![trade_on("a", "2025-03-05T12:00:00Z")];
        let missing_end = Period::Custom {
            start: Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()),
            end: None,
        };
        let missing_start = Period::Custom {
            start: None,
            end: Some(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()),
        };
        assert!(filter_by_period(&trades, missing_end, now()).is_empty());
        assert!(filter_by_period(&trades, missing_start, now()).is_empty());
    }

    #[test]
    fn period_names_resolve() {
        assert_eq!(Period::from_name("monthly"), Some(Period::Monthly));
        assert_eq!(Period::from_name("all-time"), Some(Period::AllTime));
        assert_eq!(Period::from_name("custom"), None);
        assert_eq!(Period::from_name("fortnightly"), None);
    }

    #[test]
    fn every_period_is_empty_on_empty_input() {
        let periods = [
            Period::AllTime,
            Period::Daily,
            Period::Weekly,
            Period::Monthly,
            Period::Yearly,
        ];
        for period in periods {
            assert!(filter_by_period(&[], period, now()).is_empty());
        }
    }

    #[test]
    fn all_time_is_superset_of_every_other_period() {
        let trades = vec![
            trade_on("a", "2023-01-01T00:00:00Z"),
            trade_on("b", "2025-06-01T00:00:00Z"),
            trade_on("c", "2025-06-15T09:00:00Z"),
        ];
        let all: Vec<String> = filter_by_period(&trades, Period::AllTime, now())
            .iter()
            .map(|t| t.id.clone())
            .collect();
        let periods = [Period::Daily, Period::Weekly, Period::Monthly, Period::Yearly];
        for period in periods {
            for trade in filter_by_period(&trades, period, now()) {
                assert!(all.contains(&trade.id));
            }
        }
    }
}
