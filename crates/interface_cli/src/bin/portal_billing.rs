//! Billing period operator CLI
//!
//! # Usage
//!
//! ```bash
//! portal-billing current
//! portal-billing period 2026-02-20
//! portal-billing count 2026-01-10 2026-02-20
//! portal-billing resolve 2026-01-16 --json
//! portal-billing retainer --monthly 2400 2026-01-10 2026-02-20
//! ```
//!
//! # Environment Variables
//!
//! * `BILLING_INVOICE_PREFIX` - Invoice number prefix (default: INV)
//! * `BILLING_PAYMENT_TERMS_DAYS` - Days until a sent invoice is due (default: 30)
//! * `BILLING_DEFAULT_HOURLY_RATE` - Labor rate in dollars (default: 95.00)
//! * `BILLING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)

use clap::Parser;
use core_kernel::SystemClock;
use domain_billing::{BillingConfig, BillingPeriodCalculator};
use interface_cli::{run, Command};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Semi-monthly billing period tools
#[derive(Parser)]
#[command(name = "portal-billing")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = BillingConfig::from_env()?;
    init_tracing(&config.log_level);

    let calculator = BillingPeriodCalculator::new();
    tracing::debug!(timezone = calculator.timezone().name(), "Calculator ready");

    let report = run(cli.command, &calculator, &SystemClock)?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// Initializes the tracing subscriber, logging to stderr so stdout stays parseable
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(true))
        .init();
}
