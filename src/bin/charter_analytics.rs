//! Command-line front end: reads a quote request export and prints the
//! response-time report for an operator or the whole market.

use anyhow::{Context, Result};
use charter_analytics::application::services::ResponseAnalyticsService;
use charter_analytics::domain::value_objects::{OperatorCode, Period, Timestamp};
use charter_analytics::infrastructure::persistence::json_file::JsonFileQuoteRequestSource;
use charter_analytics::infrastructure::telemetry::{LogFormat, init_tracing};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

/// Charter quote response-time analytics.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// JSON export of quote requests.
    #[arg(long, short)]
    input: PathBuf,

    /// Operator user code; omit for a market-only report.
    #[arg(long, short)]
    operator: Option<String>,

    /// Period to compare: all, 12m, 6m or 3m.
    #[arg(long, short, default_value = "all")]
    period: Period,

    /// Evaluate as of this instant (RFC 3339) instead of now.
    #[arg(long)]
    as_of: Option<String>,

    /// Optional TOML or JSON settings file.
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Emit logs as JSON.
    #[arg(long)]
    log_json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("failed to load .env"),
    }

    let args = Args::parse();
    init_tracing(if args.log_json { LogFormat::Json } else { LogFormat::Pretty });

    let as_of = match args.as_of.as_deref() {
        Some(text) => Timestamp::parse(text)
            .with_context(|| format!("invalid --as-of timestamp: {text}"))?,
        None => Timestamp::now(),
    };
    let operator = args.operator.map(OperatorCode::new);

    let source = Arc::new(JsonFileQuoteRequestSource::new(&args.input));
    let service = ResponseAnalyticsService::load(source, args.config.as_deref())
        .context("loading configuration")?;
    let report = service
        .report(operator.as_ref(), args.period, as_of)
        .await
        .with_context(|| format!("analysing {}", args.input.display()))?;

    match args.format {
        OutputFormat::Json => println!("{}", ResponseAnalyticsService::to_json(&report)?),
        OutputFormat::Text => print!("{}", report.render_text()),
    }

    Ok(())
}
