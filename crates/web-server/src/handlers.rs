use crate::{AppState, error::AppError};
use analytics::{AnalyticsReport, BreakdownGroup, DayPnl, Dimension, Period, daily_pnl};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::{NaiveDate, Utc};
use core_types::Trade;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub period: Option<String>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl ReportQuery {
    /// Maps the query parameters onto a `Period`. `period=custom` picks up the
    /// optional `start`/`end` dates; a missing bound then simply yields the
    /// engine's empty result rather than an error.
    fn resolve(&self, default_period: &str) -> Result<Period, AppError> {
        let name = self.period.as_deref().unwrap_or(default_period);
        if name == "custom" {
            return Ok(Period::Custom {
                start: self.start,
                end: self.end,
            });
        }
        Period::from_name(name)
            .ok_or_else(|| AppError::BadRequest(format!("unknown period '{}'", name)))
    }
}

#[derive(Debug, Deserialize)]
pub struct BreakdownQuery {
    pub dimension: String,
    #[serde(flatten)]
    pub report: ReportQuery,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub year: i32,
    pub month: u32,
}

/// # GET /api/trades
/// The raw journal listing, open trades included.
pub async fn get_trades(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Trade>>, AppError> {
    let trades = state.store.load()?;
    Ok(Json(trades))
}

/// # GET /api/report
/// The full analytics report for the requested period.
pub async fn get_report(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<AnalyticsReport>, AppError> {
    let period = query.resolve(&state.default_period)?;
    let trades = state.store.load()?;
    let report = state.engine.analyze(&trades, period, Utc::now());
    Ok(Json(report))
}

/// # GET /api/breakdown
/// Per-strategy or per-exchange aggregates for the requested period.
pub async fn get_breakdown(
    State(state): State<Arc<AppState>>,
    Query(query): Query<BreakdownQuery>,
) -> Result<Json<Vec<BreakdownGroup>>, AppError> {
    let dimension = match query.dimension.as_str() {
        "strategy" => Dimension::Strategy,
        "exchange" => Dimension::Exchange,
        other => {
            return Err(AppError::BadRequest(format!(
                "unknown dimension '{}'",
                other
            )));
        }
    };

    let period = query.report.resolve(&state.default_period)?;
    let trades = state.store.load()?;
    let report = state.engine.analyze(&trades, period, Utc::now());
    let groups = state.engine.breakdown(&report.filtered_trades, dimension);
    Ok(Json(groups))
}

/// # GET /api/calendar
/// Daily P&L buckets for one month of the trading calendar.
pub async fn get_calendar(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<DayPnl>>, AppError> {
    let trades = state.store.load()?;
    let days = daily_pnl(&trades, query.year, query.month)?;
    Ok(Json(days))
}
