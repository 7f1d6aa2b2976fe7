//! # Quill Trade Store
//!
//! The data-access boundary of the journal. This crate owns two concerns:
//!
//! - **The journal file:** a JSON document holding the user's trades.
//!   Records arrive loosely typed (money as string or number, dates as
//!   strings), so everything is coerced and validated here; nothing malformed
//!   ever reaches the analytics engine.
//! - **Trade entry:** turning user-supplied drafts into `Trade` values,
//!   including the one place where `pnl` is derived from prices.

pub mod entry;
pub mod error;
pub mod journal;

pub use entry::{Outcome, QuickAdd, TradeDraft};
pub use error::StoreError;
pub use journal::{TradeStore, parse_journal};
