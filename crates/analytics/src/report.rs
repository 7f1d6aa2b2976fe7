use chrono::{DateTime, Utc};
use core_types::Trade;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Scalar metrics reduced from a period-filtered trade collection.
///
/// Monetary fields are rounded to 2 decimal places and `win_rate_pct` to 1,
/// ready for display; accumulation happens at full precision before rounding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_pnl: Decimal,
    pub total_trades: usize,
    /// Count of trades with pnl > 0. Zero or absent pnl counts toward neither
    /// wins nor losses but still contributes to `total_trades`.
    pub wins: usize,
    pub losses: usize,
    /// 100 * wins / (wins + losses); zero when no trade was decided.
    pub win_rate_pct: Decimal,
    pub avg_win: Decimal,
    /// Negative or zero by construction (mean of the losing pnls).
    pub avg_loss: Decimal,
    /// |avg_win / avg_loss|; zero when `avg_loss` is zero. A loss-free streak
    /// therefore reports 0, not infinity.
    pub profit_factor: Decimal,
    /// Largest single pnl, floored at zero: an all-losing set reports 0 rather
    /// than the least-negative loss.
    pub best_trade_pnl: Decimal,
    pub avg_pnl_per_trade: Decimal,
}

impl Summary {
    /// Creates a new, zeroed-out Summary.
    /// This is the result for an empty trade set and the starting point for calculations.
    pub fn new() -> Self {
        Self {
            total_pnl: Decimal::ZERO,
            total_trades: 0,
            wins: 0,
            losses: 0,
            win_rate_pct: Decimal::ZERO,
            avg_win: Decimal::ZERO,
            avg_loss: Decimal::ZERO,
            profit_factor: Decimal::ZERO,
            best_trade_pnl: Decimal::ZERO,
            avg_pnl_per_trade: Decimal::ZERO,
        }
    }
}

impl Default for Summary {
    fn default() -> Self {
        Self::new()
    }
}

/// One point of the cumulative P&L series.
///
/// The raw timestamp is exposed alongside the formatted label so consumers can
/// reformat dates without recomputing the curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub cumulative_pnl: Decimal,
}

/// A plottable win/loss category. Zero-count categories are never emitted, so
/// an all-winning period does not render a zero-sized "Losses" slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionSlice {
    pub label: String,
    pub count: usize,
}

/// Per-group aggregates for one value of a grouping dimension
/// (a strategy tag or an exchange name).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownGroup {
    pub key: String,
    pub total_pnl: Decimal,
    pub win_rate_pct: Decimal,
}

/// The full set of view models derived from one journal snapshot.
///
/// Recomputed fresh on every call; nothing in here is cached or persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// The aggregation basis: closed trades inside the period, ascending by date.
    pub filtered_trades: Vec<Trade>,
    pub summary: Summary,
    pub equity_curve: Vec<EquityPoint>,
    pub win_loss_distribution: Vec<DistributionSlice>,
    /// Groups in insertion order of first occurrence, not sorted.
    pub strategy_breakdown: Vec<BreakdownGroup>,
    pub exchange_breakdown: Vec<BreakdownGroup>,
}
