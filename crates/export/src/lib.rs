//! # Quill Report Export
//!
//! Renders an `AnalyticsReport` into shareable documents: a plain-text report
//! with a per-trade table, and a JSON document for machine consumers. This
//! crate formats; it never computes — every number comes from the engine
//! as-is.

pub mod error;

pub use error::ExportError;

use analytics::AnalyticsReport;
use chrono::NaiveDate;
use comfy_table::Table;
use core_types::Trade;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// The output format of an exported report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Json,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
        }
    }
}

/// The file name a report exported on `date` is saved under,
/// e.g. `trading-report-2025-06-15.txt`.
pub fn report_file_name(date: NaiveDate, format: ExportFormat) -> String {
    format!(
        "trading-report-{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

/// Renders the full text report: title, summary block, per-trade table.
pub fn text_report(report: &AnalyticsReport) -> String {
    let summary = &report.summary;
    let mut out = String::new();

    // Infallible for String targets.
    let _ = writeln!(out, "Trading P&L Report");
    let _ = writeln!(out);
    let _ = writeln!(out, "Total P&L: ${}", summary.total_pnl);
    let _ = writeln!(out, "Total Trades: {}", summary.total_trades);
    let _ = writeln!(out, "Win Rate: {}%", summary.win_rate_pct);
    let _ = writeln!(out, "Wins: {} | Losses: {}", summary.wins, summary.losses);
    let _ = writeln!(out, "Avg Win: ${} | Avg Loss: ${}", summary.avg_win, summary.avg_loss);
    let _ = writeln!(out, "Profit Factor: {}", summary.profit_factor);
    let _ = writeln!(out, "Best Trade: ${}", summary.best_trade_pnl);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", trades_table(&report.filtered_trades));

    out
}

/// Renders the per-trade detail table.
fn trades_table(trades: &[Trade]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "Asset", "Type", "Entry", "Exit", "P&L", "Strategy", "Date",
    ]);

    for trade in trades {
        table.add_row(vec![
            trade.asset_pair.clone(),
            trade.trade_type.to_string(),
            format!("${}", trade.entry_price),
            trade
                .exit_price
                .map(|p| format!("${}", p))
                .unwrap_or_else(|| "-".to_string()),
            trade
                .pnl
                .map(|p| format!("${}", p))
                .unwrap_or_else(|| "-".to_string()),
            trade.strategy_tag.clone().unwrap_or_else(|| "-".to_string()),
            trade.trade_date.format("%Y-%m-%d").to_string(),
        ]);
    }

    table
}

/// Renders a dimensional breakdown as a table, preserving the engine's
/// insertion order.
pub fn breakdown_table(title: &str, groups: &[analytics::BreakdownGroup]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![title, "Total P&L", "Win Rate"]);
    for group in groups {
        table.add_row(vec![
            group.key.clone(),
            format!("${}", group.total_pnl),
            format!("{}%", group.win_rate_pct),
        ]);
    }
    table
}

/// Renders one month of daily P&L buckets as a table.
pub fn calendar_table(days: &[analytics::DayPnl]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Date", "P&L", "Trades"]);
    for day in days {
        table.add_row(vec![
            day.date.format("%Y-%m-%d").to_string(),
            format!("${}", day.pnl),
            day.trade_count.to_string(),
        ]);
    }
    table
}

/// Serializes the report as pretty-printed JSON.
pub fn json_report(report: &AnalyticsReport) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Writes the report into `dir` under the dated file name and returns the
/// path of the written file.
pub fn export_to_file(
    report: &AnalyticsReport,
    format: ExportFormat,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf, ExportError> {
    let body = match format {
        ExportFormat::Text => text_report(report),
        ExportFormat::Json => json_report(report)?,
    };
    let path = dir.join(report_file_name(date, format));
    fs::write(&path, body)?;
    tracing::info!(path = %path.display(), "report exported");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::{AnalyticsEngine, Period};
    use chrono::{DateTime, Utc};
    use core_types::{TradeStatus, TradeType};
    use rust_decimal_macros::dec;

    fn report() -> AnalyticsReport {
        let trades = vec![Trade {
            id: "t1".to_string(),
            asset_pair: "BTC/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(40000),
            exit_price: Some(dec!(41000)),
            quantity: dec!(0.5),
            fees: dec!(0),
            pnl: Some(dec!(500)),
            strategy_tag: Some("Breakout".to_string()),
            exchange: None,
            status: TradeStatus::Closed,
            trade_date: "2025-03-01T12:00:00Z".parse().unwrap(),
            notes: None,
            image_url: None,
        }];
        let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();
        AnalyticsEngine::new().analyze(&trades, Period::AllTime, now)
    }

    #[test]
    fn text_report_contains_summary_and_trade_rows() {
        let text = text_report(&report());
        assert!(text.contains("Trading P&L Report"));
        assert!(text.contains("Total P&L: $500.00"));
        assert!(text.contains("BTC/USDT"));
        assert!(text.contains("Breakout"));
        assert!(text.contains("2025-03-01"));
    }

    #[test]
    fn json_report_round_trips() {
        let json = json_report(&report()).unwrap();
        let parsed: AnalyticsReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, report());
    }

    #[test]
    fn file_name_is_stamped_with_the_export_date() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        assert_eq!(
            report_file_name(date, ExportFormat::Text),
            "trading-report-2025-06-15.txt"
        );
        assert_eq!(
            report_file_name(date, ExportFormat::Json),
            "trading-report-2025-06-15.json"
        );
    }
}
