use chrono::{Local, Months, NaiveDate};
use clap::{Parser, ValueEnum};
use home_finance::config::{defaults, DisplayConfig, ValidationConfig};
use home_finance::loan::{amortization_schedule, calculate_from_inputs, CompleteLoanDetails};
use home_finance::report::{format_amount, render};
use home_finance::validate::{validate_inputs, RawInputs, ValidatedInputs};
use home_finance::{FinanceError, Result};
use log::{error, info};
use simple_logger::SimpleLogger;
use std::process;

/// Mortgage and cash-loan financing for a property purchase
#[derive(Parser, Debug)]
#[command(name = "home-finance", version)]
struct Cli {
    /// Price per square metre
    #[arg(long)]
    price_per_sqm: String,

    /// Total area in square metres
    #[arg(long)]
    total_sqm: String,

    /// Parking space price
    #[arg(long, default_value = "0")]
    parking_price: String,

    /// Own funds available for the down payment
    #[arg(long, default_value = "0")]
    own_funds: String,

    /// Required down payment, percent of the total price (0-100)
    #[arg(long)]
    down_payment_percentage: String,

    /// Mortgage annual interest rate in percent
    #[arg(long, default_value = defaults::MORTGAGE_RATE)]
    mortgage_rate: String,

    /// Mortgage term in years
    #[arg(long, default_value = defaults::MORTGAGE_YEARS)]
    mortgage_years: String,

    /// Cash loan annual interest rate in percent
    #[arg(long, default_value = defaults::CASH_LOAN_RATE)]
    cash_loan_rate: String,

    /// Cash loan term in years
    #[arg(long, default_value = defaults::CASH_LOAN_YEARS)]
    cash_loan_years: String,

    /// Currency suffix for amounts
    #[arg(long, default_value = "EUR")]
    currency: String,

    /// Cash-loan figures at or below this are shown as "not required"
    #[arg(long, default_value_t = 10.)]
    not_required_threshold: f64,

    /// Also print the monthly schedule of one loan
    #[arg(long)]
    schedule: Option<ScheduleFor>,

    /// First payment date (YYYY-MM-DD), defaults to a month from today
    #[arg(long)]
    first_payment: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScheduleFor {
    Mortgage,
    CashLoan,
}

impl Cli {
    fn raw_inputs(&self) -> RawInputs {
        RawInputs {
            price_per_sqm: self.price_per_sqm.clone(),
            total_sqm: self.total_sqm.clone(),
            parking_price: self.parking_price.clone(),
            own_funds: self.own_funds.clone(),
            down_payment_percentage: self.down_payment_percentage.clone(),
            mortgage_rate: self.mortgage_rate.clone(),
            mortgage_years: self.mortgage_years.clone(),
            cash_loan_rate: self.cash_loan_rate.clone(),
            cash_loan_years: self.cash_loan_years.clone(),
        }
    }

    fn display_config(&self) -> DisplayConfig {
        DisplayConfig {
            currency: self.currency.clone(),
            not_required_threshold: self.not_required_threshold,
            ..DisplayConfig::default()
        }
    }

    fn first_payment_date(&self) -> Result<NaiveDate> {
        match &self.first_payment {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|e| FinanceError::InvalidDate(format!("{}: {}", raw, e))),
            None => {
                let today = Local::now().date_naive();
                today.checked_add_months(Months::new(1)).ok_or_else(|| {
                    FinanceError::InvalidDate(format!("no date a month after {}", today))
                })
            }
        }
    }
}

fn show_schedule(
    which: ScheduleFor,
    inputs: &ValidatedInputs,
    details: &CompleteLoanDetails,
    first_pmt_date: NaiveDate,
    cfg: &DisplayConfig,
) -> Result<()> {
    let (principal, rate, years) = match which {
        ScheduleFor::Mortgage => (
            details.mortgage_amount,
            inputs.mortgage_rate,
            inputs.mortgage_years,
        ),
        ScheduleFor::CashLoan => (
            details.cash_loan_amount,
            inputs.cash_loan_rate,
            inputs.cash_loan_years,
        ),
    };

    if principal <= 0. {
        info!("{:?} not required, no schedule to show", which);
        return Ok(());
    }

    info!(
        "{:?} schedule for {} over {} years",
        which,
        format_amount(principal, cfg),
        years
    );
    for pmt in amortization_schedule(principal, rate, years, first_pmt_date)? {
        println!("{}", pmt);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let inputs = validate_inputs(&cli.raw_inputs(), &ValidationConfig::default())?;
    let details = calculate_from_inputs(&inputs)?;
    let cfg = cli.display_config();

    print!("{}", render(&details, &cfg));

    if let Some(which) = cli.schedule {
        show_schedule(which, &inputs, &details, cli.first_payment_date()?, &cfg)?;
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    SimpleLogger::new()
        .with_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init()
        .unwrap();

    if let Err(e) = run(&cli) {
        if e.is_validation() {
            error!("Validation error: {}", e);
        } else {
            error!("An unexpected error occurred: {}", e);
        }
        process::exit(1);
    }
}
