use analytics::{AnalyticsEngine, Period, daily_pnl};
use anyhow::anyhow;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use configuration::Settings;
use export::ExportFormat;
use rust_decimal::Decimal;
use std::path::PathBuf;
use store::{Outcome, QuickAdd, TradeDraft, TradeStore};
use tracing_subscriber::EnvFilter;

/// The main entry point for the Quill trading journal.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let settings = configuration::load_config()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Report(args) => handle_report(args, &settings),
        Commands::Calendar(args) => handle_calendar(args, &settings),
        Commands::Export(args) => handle_export(args, &settings),
        Commands::Add(args) => handle_add(args, &settings),
        Commands::Quick(args) => handle_quick(args, &settings),
        Commands::Serve => web_server::run_server(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A crypto trading journal: log trades, review performance, export reports.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the performance report for a period.
    Report(PeriodArgs),
    /// Print the daily P&L calendar for one month.
    Calendar(CalendarArgs),
    /// Write the performance report to a file.
    Export(ExportArgs),
    /// Record a fully specified trade.
    Add(AddArgs),
    /// Record just a win or loss amount.
    Quick(QuickArgs),
    /// Serve the read-only journal API.
    Serve,
}

#[derive(Parser)]
struct PeriodArgs {
    /// The period to aggregate over (all-time, daily, weekly, monthly, yearly, custom).
    #[arg(long)]
    period: Option<String>,

    /// Custom period start date (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Custom period end date (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Parser)]
struct CalendarArgs {
    #[arg(long)]
    year: i32,

    #[arg(long)]
    month: u32,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    period: PeriodArgs,

    /// The output format of the report file.
    #[arg(long, value_enum, default_value = "text")]
    format: FormatArg,

    /// The directory the report file is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser)]
struct AddArgs {
    /// The traded market (e.g. "BTC/USDT").
    #[arg(long)]
    asset_pair: String,

    /// The direction of the trade.
    #[arg(long, value_enum, default_value = "long")]
    trade_type: TradeTypeArg,

    #[arg(long)]
    entry_price: Decimal,

    #[arg(long)]
    exit_price: Option<Decimal>,

    #[arg(long)]
    quantity: Decimal,

    #[arg(long, default_value = "0")]
    fees: Decimal,

    #[arg(long)]
    exchange: Option<String>,

    #[arg(long)]
    strategy: Option<String>,

    #[arg(long)]
    notes: Option<String>,

    /// Whether the position is still open.
    #[arg(long)]
    open: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum TradeTypeArg {
    Long,
    Short,
}

#[derive(Parser)]
struct QuickArgs {
    /// The traded market (e.g. "BTC/USDT").
    #[arg(long)]
    asset_pair: String,

    /// Record a win of this amount.
    #[arg(long, conflicts_with = "loss")]
    win: Option<Decimal>,

    /// Record a loss of this amount.
    #[arg(long, conflicts_with = "win")]
    loss: Option<Decimal>,

    #[arg(long)]
    exchange: Option<String>,

    #[arg(long)]
    strategy: Option<String>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

impl PeriodArgs {
    /// Maps the command-line flags onto a `Period`. Supplying `--from`/`--to`
    /// implies a custom period; a custom period missing a bound deliberately
    /// yields an empty report.
    fn resolve(&self, settings: &Settings) -> anyhow::Result<Period> {
        let name = self
            .period
            .as_deref()
            .unwrap_or(&settings.report.default_period);
        if name == "custom" || self.from.is_some() || self.to.is_some() {
            return Ok(Period::Custom {
                start: self.from,
                end: self.to,
            });
        }
        Period::from_name(name).ok_or_else(|| anyhow!("unknown period '{}'", name))
    }
}

fn handle_report(args: PeriodArgs, settings: &Settings) -> anyhow::Result<()> {
    let period = args.resolve(settings)?;
    let trades = TradeStore::new(&settings.journal.path).load()?;
    let report = AnalyticsEngine::new().analyze(&trades, period, Utc::now());

    println!("{}", export::text_report(&report));
    println!(
        "{}",
        export::breakdown_table("Strategy", &report.strategy_breakdown)
    );
    println!();
    println!(
        "{}",
        export::breakdown_table("Exchange", &report.exchange_breakdown)
    );
    Ok(())
}

fn handle_calendar(args: CalendarArgs, settings: &Settings) -> anyhow::Result<()> {
    let trades = TradeStore::new(&settings.journal.path).load()?;
    let days = daily_pnl(&trades, args.year, args.month)?;
    println!("{}", export::calendar_table(&days));
    Ok(())
}

fn handle_export(args: ExportArgs, settings: &Settings) -> anyhow::Result<()> {
    let period = args.period.resolve(settings)?;
    let trades = TradeStore::new(&settings.journal.path).load()?;
    let now = Utc::now();
    let report = AnalyticsEngine::new().analyze(&trades, period, now);

    let format = match args.format {
        FormatArg::Text => ExportFormat::Text,
        FormatArg::Json => ExportFormat::Json,
    };
    let path = export::export_to_file(&report, format, &args.out_dir, now.date_naive())?;
    println!("Report written to {}", path.display());
    Ok(())
}

fn handle_add(args: AddArgs, settings: &Settings) -> anyhow::Result<()> {
    let draft = TradeDraft {
        asset_pair: args.asset_pair,
        trade_type: match args.trade_type {
            TradeTypeArg::Long => core_types::TradeType::Long,
            TradeTypeArg::Short => core_types::TradeType::Short,
        },
        entry_price: args.entry_price,
        exit_price: args.exit_price,
        quantity: args.quantity,
        fees: args.fees,
        exchange: args.exchange,
        strategy_tag: args.strategy,
        notes: args.notes,
        status: if args.open {
            core_types::TradeStatus::Open
        } else {
            core_types::TradeStatus::Closed
        },
    };

    let trade = draft.into_trade(Utc::now());
    let pnl = trade.pnl;
    TradeStore::new(&settings.journal.path).append(trade)?;

    match pnl {
        Some(pnl) => println!("Trade recorded (pnl: ${})", pnl),
        None => println!("Trade recorded (still open)"),
    }
    Ok(())
}

fn handle_quick(args: QuickArgs, settings: &Settings) -> anyhow::Result<()> {
    let (outcome, amount) = match (args.win, args.loss) {
        (Some(amount), None) => (Outcome::Win, amount),
        (None, Some(amount)) => (Outcome::Loss, amount),
        _ => return Err(anyhow!("specify exactly one of --win or --loss")),
    };

    let trade = QuickAdd {
        asset_pair: args.asset_pair,
        outcome,
        amount,
        exchange: args.exchange,
        strategy_tag: args.strategy,
    }
    .into_trade(Utc::now());

    let pnl = trade.realized_pnl();
    TradeStore::new(&settings.journal.path).append(trade)?;
    println!("Trade recorded (pnl: ${})", pnl);
    Ok(())
}
