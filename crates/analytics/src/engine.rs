use crate::period::{Period, filter_by_period};
use crate::report::{AnalyticsReport, BreakdownGroup, DistributionSlice, EquityPoint, Summary};
use chrono::{DateTime, Utc};
use core_types::Trade;
use rust_decimal::Decimal;

/// A stateless calculator for deriving journal metrics from a trade list.
#[derive(Debug, Default)]
pub struct AnalyticsEngine {}

/// The categorical attribute a breakdown groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Strategy,
    Exchange,
}

impl Dimension {
    /// The group key a trade falls into, substituting the sentinel when the
    /// attribute was never filled in. Groups are never dropped for missing data.
    fn key_of(&self, trade: &Trade) -> String {
        match self {
            Dimension::Strategy => trade
                .strategy_tag
                .clone()
                .unwrap_or_else(|| "No Strategy".to_string()),
            Dimension::Exchange => trade
                .exchange
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        }
    }
}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// The main entry point: derives every view model from one journal snapshot.
    ///
    /// # Arguments
    ///
    /// * `trades` - The raw journal, in any order. Open trades are excluded
    ///   from aggregation here, so callers may pass the journal as-is.
    /// * `period` - The time window to aggregate over.
    /// * `now` - The instant period boundaries are anchored to. Injected for
    ///   determinism; this crate never reads the system clock.
    pub fn analyze(&self, trades: &[Trade], period: Period, now: DateTime<Utc>) -> AnalyticsReport {
        // Only closed trades participate in P&L aggregation.
        let closed: Vec<Trade> = trades
            .iter()
            .filter(|t| t.status.is_closed())
            .cloned()
            .collect();

        let mut filtered = filter_by_period(&closed, period, now);
        filtered.sort_by_key(|t| t.trade_date);

        let summary = self.summarize(&filtered);
        let equity_curve = self.equity_curve(&filtered, now);
        let win_loss_distribution = self.win_loss_distribution(&summary);
        let strategy_breakdown = self.breakdown(&filtered, Dimension::Strategy);
        let exchange_breakdown = self.breakdown(&filtered, Dimension::Exchange);

        tracing::debug!(
            trades = filtered.len(),
            total_pnl = %summary.total_pnl,
            "analytics report computed"
        );

        AnalyticsReport {
            filtered_trades: filtered,
            summary,
            equity_curve,
            win_loss_distribution,
            strategy_breakdown,
            exchange_breakdown,
        }
    }

    /// Reduces an already period-filtered trade collection to scalar metrics.
    ///
    /// Accumulation runs at full precision; only the reported values are
    /// rounded (2 decimal places for money, 1 for the win rate).
    pub fn summarize(&self, trades: &[Trade]) -> Summary {
        let mut summary = Summary::new();
        summary.total_trades = trades.len();

        let mut total = Decimal::ZERO;
        let mut gross_wins = Decimal::ZERO;
        let mut gross_losses = Decimal::ZERO;
        let mut best = Decimal::ZERO;

        for trade in trades {
            let pnl = trade.realized_pnl();
            total += pnl;

            if pnl > Decimal::ZERO {
                gross_wins += pnl;
                summary.wins += 1;
            } else if pnl < Decimal::ZERO {
                gross_losses += pnl;
                summary.losses += 1;
            }
            // Floored at zero: an all-losing set reports a best trade of 0.
            if pnl > best {
                best = pnl;
            }
        }

        let decided = summary.wins + summary.losses;
        if decided > 0 {
            summary.win_rate_pct = (Decimal::from(summary.wins) / Decimal::from(decided)
                * Decimal::from(100))
            .round_dp(1);
        }

        let avg_win = if summary.wins > 0 {
            gross_wins / Decimal::from(summary.wins)
        } else {
            Decimal::ZERO
        };
        let avg_loss = if summary.losses > 0 {
            gross_losses / Decimal::from(summary.losses)
        } else {
            Decimal::ZERO
        };

        // Defined as 0 when avg_loss is 0, collapsing the "no losses" case to
        // 0 rather than infinity.
        let profit_factor = if avg_loss == Decimal::ZERO {
            Decimal::ZERO
        } else {
            (avg_win / avg_loss).abs()
        };

        let avg_pnl_per_trade = if summary.total_trades > 0 {
            total / Decimal::from(summary.total_trades)
        } else {
            Decimal::ZERO
        };

        summary.total_pnl = total.round_dp(2);
        summary.avg_win = avg_win.round_dp(2);
        summary.avg_loss = avg_loss.round_dp(2);
        summary.profit_factor = profit_factor.round_dp(2);
        summary.best_trade_pnl = best.round_dp(2);
        summary.avg_pnl_per_trade = avg_pnl_per_trade.round_dp(2);
        summary
    }

    /// Builds the cumulative P&L series for charting.
    ///
    /// Trades are sorted ascending by date internally; callers need not
    /// pre-sort. An empty set yields a single "no data" sentinel point so
    /// chart consumers always have at least one point to render.
    pub fn equity_curve(&self, trades: &[Trade], now: DateTime<Utc>) -> Vec<EquityPoint> {
        if trades.is_empty() {
            return vec![EquityPoint {
                timestamp: now,
                label: "No data".to_string(),
                cumulative_pnl: Decimal::ZERO,
            }];
        }

        let mut ordered: Vec<&Trade> = trades.iter().collect();
        ordered.sort_by_key(|t| t.trade_date);

        let mut running = Decimal::ZERO;
        ordered
            .into_iter()
            .map(|trade| {
                running += trade.realized_pnl();
                EquityPoint {
                    timestamp: trade.trade_date,
                    label: trade.trade_date.format("%Y-%m-%d").to_string(),
                    cumulative_pnl: running.round_dp(2),
                }
            })
            .collect()
    }

    /// Groups trades by the given dimension and computes per-group metrics
    /// with the same formulas as `summarize`, scoped to each group.
    ///
    /// Iteration order is insertion order of first occurrence, which keeps the
    /// output deterministic for a fixed input order without imposing a sort.
    pub fn breakdown(&self, trades: &[Trade], dimension: Dimension) -> Vec<BreakdownGroup> {
        struct Accumulator {
            key: String,
            total: Decimal,
            wins: usize,
            losses: usize,
        }

        let mut groups: Vec<Accumulator> = Vec::new();

        for trade in trades {
            let key = dimension.key_of(trade);
            let idx = match groups.iter().position(|g| g.key == key) {
                Some(existing) => existing,
                None => {
                    groups.push(Accumulator {
                        key,
                        total: Decimal::ZERO,
                        wins: 0,
                        losses: 0,
                    });
                    groups.len() - 1
                }
            };
            let slot = &mut groups[idx];

            let pnl = trade.realized_pnl();
            slot.total += pnl;
            if pnl > Decimal::ZERO {
                slot.wins += 1;
            } else if pnl < Decimal::ZERO {
                slot.losses += 1;
            }
        }

        groups
            .into_iter()
            .map(|g| {
                let decided = g.wins + g.losses;
                let win_rate = if decided > 0 {
                    (Decimal::from(g.wins) / Decimal::from(decided) * Decimal::from(100))
                        .round_dp(1)
                } else {
                    Decimal::ZERO
                };
                BreakdownGroup {
                    key: g.key,
                    total_pnl: g.total.round_dp(2),
                    win_rate_pct: win_rate,
                }
            })
            .collect()
    }

    /// Selects the group with the highest total P&L, sorting a fresh copy so
    /// the insertion order of `groups` is never disturbed.
    pub fn best_group(&self, groups: &[BreakdownGroup]) -> Option<BreakdownGroup> {
        let mut sorted = groups.to_vec();
        sorted.sort_by(|a, b| b.total_pnl.cmp(&a.total_pnl));
        sorted.into_iter().next()
    }

    /// Selects the group with the lowest total P&L from a fresh sorted copy.
    pub fn worst_group(&self, groups: &[BreakdownGroup]) -> Option<BreakdownGroup> {
        let mut sorted = groups.to_vec();
        sorted.sort_by(|a, b| a.total_pnl.cmp(&b.total_pnl));
        sorted.into_iter().next()
    }

    /// Packages the win/loss counts as plottable categories, omitting any
    /// category whose count is zero.
    pub fn win_loss_distribution(&self, summary: &Summary) -> Vec<DistributionSlice> {
        let mut slices = Vec::new();
        if summary.wins > 0 {
            slices.push(DistributionSlice {
                label: "Wins".to_string(),
                count: summary.wins,
            });
        }
        if summary.losses > 0 {
            slices.push(DistributionSlice {
                label: "Losses".to_string(),
                count: summary.losses,
            });
        }
        slices
    }
}
