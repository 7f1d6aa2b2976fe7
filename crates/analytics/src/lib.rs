//! # Quill Analytics Engine
//!
//! This crate turns a raw list of journal trades into the derived metrics that
//! every view of the application consumes: summary statistics, the equity
//! curve, per-strategy and per-exchange breakdowns, the win/loss distribution,
//! and daily P&L buckets for the calendar.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of
//!   external systems. It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless
//!   calculator. It takes a trade list as input and produces an
//!   `AnalyticsReport` as output, recomputed fresh on every call.
//! - **Injected Clock:** Period boundaries such as "start of the current
//!   month" are derived from an explicit `now` parameter, never from the
//!   system clock. Identical inputs always produce identical output.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: The main struct that contains the calculation logic.
//! - `AnalyticsReport`: The standardized struct holding all derived view models.
//! - `Period`: The time-window selector applied before aggregation.
//! - `AnalyticsError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod calendar;
pub mod engine;
pub mod error;
pub mod period;
pub mod report;

// Re-export the key components to create a clean, public-facing API.
pub use calendar::{DayPnl, daily_pnl};
pub use engine::{AnalyticsEngine, Dimension};
pub use error::AnalyticsError;
pub use period::{Period, filter_by_period};
pub use report::{AnalyticsReport, BreakdownGroup, DistributionSlice, EquityPoint, Summary};
