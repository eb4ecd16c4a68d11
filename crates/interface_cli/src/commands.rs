//! Subcommands of `portal-billing`

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::Subcommand;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use core_kernel::{Clock, DateRange, Money, OrganizationId};
use domain_billing::{BillingPeriod, BillingPeriodCalculator, Retainer};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the billing period containing a date (YYYY-MM-DD)
    Period { date: NaiveDate },

    /// Show the current billing period
    Current,

    /// Show the billing period after the current one
    Next,

    /// Count the billing periods a date range overlaps
    Count { start: NaiveDate, end: NaiveDate },

    /// Resolve a stored period key to its bounds
    Resolve { key: String },

    /// Preview the pro-rated retainer line for a date range
    Retainer {
        /// Monthly retainer amount in dollars
        #[arg(short, long)]
        monthly: Decimal,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Result of a command, printable as text or JSON
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Report {
    Period(PeriodView),
    Count {
        start: NaiveDate,
        end: NaiveDate,
        periods: u32,
    },
    Retainer {
        description: String,
        periods: Decimal,
        per_period: Money,
        amount: Money,
    },
}

#[derive(Debug, Serialize)]
pub struct PeriodView {
    pub key: String,
    pub label: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl From<BillingPeriod> for PeriodView {
    fn from(p: BillingPeriod) -> Self {
        Self {
            key: p.key,
            label: p.label,
            start: p.start,
            end: p.end,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Report::Period(p) => write!(f, "{}  {} ({} to {})", p.key, p.label, p.start, p.end),
            Report::Count { start, end, periods } => {
                write!(f, "{} to {} overlaps {} billing period(s)", start, end, periods)
            }
            Report::Retainer { description, periods, per_period, amount } => {
                write!(f, "{}: {} x {} = {}", description, periods, per_period, amount)
            }
        }
    }
}

/// Executes a command against the calculator
pub fn run(command: Command, calculator: &BillingPeriodCalculator, clock: &impl Clock) -> anyhow::Result<Report> {
    debug!(?command, "Running command");
    let report = match command {
        Command::Period { date } => Report::Period(calculator.period_for_date(date).into()),
        Command::Current => Report::Period(calculator.current_period(clock).into()),
        Command::Next => {
            let next = calculator
                .next_period(clock)
                .context("no billing period follows the current one")?;
            Report::Period(next.into())
        }
        Command::Count { start, end } => {
            if end < start {
                bail!("end date {} is before start date {}", end, start);
            }
            Report::Count {
                start,
                end,
                periods: calculator.count_overlapping_periods(start, end),
            }
        }
        Command::Resolve { key } => Report::Period(calculator.resolve_period(&key)?.into()),
        Command::Retainer { monthly, start, end } => {
            let window = DateRange::new(start, end)?;
            let retainer = Retainer::new(OrganizationId::new(), Money::new(monthly))?;
            let line = retainer
                .line_item_for(calculator, window)?
                .context("date range overlaps no billing period")?;
            Report::Retainer {
                amount: line.amount(),
                description: line.description,
                periods: line.quantity,
                per_period: line.unit_price,
            }
        }
    };
    Ok(report)
}
