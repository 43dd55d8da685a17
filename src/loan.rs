use crate::error::{FinanceError, Result};
use crate::validate::ValidatedInputs;
use chrono::{Months, NaiveDate};
use log::{debug, trace};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanResult {
    pub monthly_payment: f64,
    pub total_payment: f64,
    pub total_interest: f64,
}

impl LoanResult {
    pub fn new(monthly_payment: f64, total_payment: f64, total_interest: f64) -> Self {
        Self {
            monthly_payment,
            total_payment,
            total_interest,
        }
    }

    /// "No loan needed."
    pub fn zero() -> Self {
        Self::new(0., 0., 0.)
    }
}

impl fmt::Display for LoanResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "monthly {:.4}, total {:.4}, interest {:.4}",
            self.monthly_payment, self.total_payment, self.total_interest
        )
    }
}

#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CompleteLoanDetails {
    pub total_price: f64,
    pub own_money: f64,
    pub required_down_payment: f64,
    pub mortgage_amount: f64,
    pub cash_loan_amount: f64,
    pub mortgage_monthly: f64,
    pub mortgage_total: f64,
    pub mortgage_interest: f64,
    pub cash_loan_monthly: f64,
    pub cash_loan_total: f64,
    pub cash_loan_interest: f64,
    pub total_monthly: f64,
}

impl CompleteLoanDetails {
    pub fn mortgage(&self) -> LoanResult {
        LoanResult::new(
            self.mortgage_monthly,
            self.mortgage_total,
            self.mortgage_interest,
        )
    }

    pub fn cash_loan(&self) -> LoanResult {
        LoanResult::new(
            self.cash_loan_monthly,
            self.cash_loan_total,
            self.cash_loan_interest,
        )
    }
}

impl fmt::Display for CompleteLoanDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "price {:.4}, mortgage {:.4} ({}), cash loan {:.4} ({}), total monthly {:.4}",
            self.total_price,
            self.mortgage_amount,
            self.mortgage(),
            self.cash_loan_amount,
            self.cash_loan(),
            self.total_monthly
        )
    }
}

/// One row of a monthly amortization schedule.
#[derive(PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LoanPayment {
    pub pmt_number: u32,
    pub pmt_date: NaiveDate,
    pub pmt_amount: f64,
    pub pmt_interest_paid: f64,
    pub pmt_end_balance: f64,
}

impl LoanPayment {
    pub fn new(
        pmt_number: u32,
        pmt_date: NaiveDate,
        pmt_amount: f64,
        pmt_interest_paid: f64,
        pmt_end_balance: f64,
    ) -> Self {
        Self {
            pmt_number,
            pmt_date,
            pmt_amount,
            pmt_interest_paid,
            pmt_end_balance,
        }
    }
}

impl fmt::Display for LoanPayment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "pmt number {}, date {}, payment {:.2}, interest paid {:.2}, ending balance {:.2}",
            self.pmt_number,
            self.pmt_date,
            self.pmt_amount,
            self.pmt_interest_paid,
            self.pmt_end_balance
        )
    }
}

pub fn calculate_property_costs(price_per_sqm: f64, total_sqm: f64, parking_price: f64) -> f64 {
    price_per_sqm * total_sqm + parking_price
}

fn required_down_payment(total_price: f64, down_payment_percentage: f64) -> f64 {
    total_price * (down_payment_percentage / 100.)
}

/// Splits the financed amount into `(mortgage_amount, cash_loan_amount)`.
///
/// Own money goes to the down payment first. A shortfall becomes the cash
/// loan; a surplus reduces the mortgage. A negative mortgage (own money above
/// the total price) is returned as is.
pub fn calculate_loan_amounts(
    total_price: f64,
    own_money: f64,
    down_payment_percentage: f64,
) -> (f64, f64) {
    let required = required_down_payment(total_price, down_payment_percentage);
    let cash_loan_needed = required - own_money;
    trace!(
        "required down payment {}, cash loan needed {}",
        required,
        cash_loan_needed
    );

    if cash_loan_needed <= 0. {
        (total_price - own_money, 0.)
    } else {
        (total_price - required, cash_loan_needed)
    }
}

fn monthly_terms(annual_rate: f64, years: u32) -> Result<(f64, u32)> {
    if years == 0 {
        return Err(FinanceError::Domain(
            "loan term must be at least one year".to_string(),
        ));
    }
    let months = years.checked_mul(12).ok_or_else(|| {
        FinanceError::Domain(format!("loan term of {} years is too long", years))
    })?;
    Ok((annual_rate / 12., months))
}

fn monthly_payment(principal: f64, monthly_rate: f64, months: f64) -> f64 {
    if monthly_rate > 0. {
        let factor = (1. + monthly_rate).powf(months);
        principal * (monthly_rate * factor) / (factor - 1.)
    } else {
        principal / months
    }
}

/// Fixed-rate annuity for `principal` at `annual_rate` (a fraction) over
/// `years`. Nothing is rounded here.
pub fn calculate_loan_details(principal: f64, annual_rate: f64, years: u32) -> Result<LoanResult> {
    if principal == 0. {
        return Ok(LoanResult::zero());
    }

    let (monthly_rate, months) = monthly_terms(annual_rate, years)?;
    let months = f64::from(months);
    let monthly_payment = monthly_payment(principal, monthly_rate, months);
    let total_payment = monthly_payment * months;

    Ok(LoanResult::new(
        monthly_payment,
        total_payment,
        total_payment - principal,
    ))
}

#[allow(clippy::too_many_arguments)]
pub fn calculate_complete_loan_details(
    total_price: f64,
    own_money: f64,
    down_payment_percentage: f64,
    mortgage_rate: f64,
    mortgage_years: u32,
    cash_loan_rate: f64,
    cash_loan_years: u32,
) -> Result<CompleteLoanDetails> {
    let (mortgage_amount, cash_loan_amount) =
        calculate_loan_amounts(total_price, own_money, down_payment_percentage);

    let mortgage = calculate_loan_details(mortgage_amount, mortgage_rate, mortgage_years)?;

    let cash_loan = if cash_loan_amount > 0. {
        calculate_loan_details(cash_loan_amount, cash_loan_rate, cash_loan_years)?
    } else {
        LoanResult::zero()
    };

    let details = CompleteLoanDetails {
        total_price,
        own_money,
        required_down_payment: required_down_payment(total_price, down_payment_percentage),
        mortgage_amount,
        cash_loan_amount,
        mortgage_monthly: mortgage.monthly_payment,
        mortgage_total: mortgage.total_payment,
        mortgage_interest: mortgage.total_interest,
        cash_loan_monthly: cash_loan.monthly_payment,
        cash_loan_total: cash_loan.total_payment,
        cash_loan_interest: cash_loan.total_interest,
        total_monthly: mortgage.monthly_payment + cash_loan.monthly_payment,
    };
    debug!("{}", details);
    Ok(details)
}

/// Property cost followed by the complete calculation.
pub fn calculate_from_inputs(inputs: &ValidatedInputs) -> Result<CompleteLoanDetails> {
    let total_price = calculate_property_costs(
        inputs.price_per_sqm,
        inputs.total_sqm,
        inputs.parking_price,
    );
    calculate_complete_loan_details(
        total_price,
        inputs.own_funds,
        inputs.down_payment_percentage,
        inputs.mortgage_rate,
        inputs.mortgage_years,
        inputs.cash_loan_rate,
        inputs.cash_loan_years,
    )
}

/// Month-by-month breakdown of the annuity from `calculate_loan_details`.
/// The last row absorbs floating-point residue so the loan closes at 0.
pub fn amortization_schedule(
    principal: f64,
    annual_rate: f64,
    years: u32,
    first_pmt_date: NaiveDate,
) -> Result<Vec<LoanPayment>> {
    if principal == 0. {
        return Ok(Vec::new());
    }

    let (monthly_rate, pmt_count) = monthly_terms(annual_rate, years)?;
    let pmt_amount = monthly_payment(principal, monthly_rate, f64::from(pmt_count));

    // the last payment date must exist before anything is allocated
    if first_pmt_date
        .checked_add_months(Months::new(pmt_count - 1))
        .is_none()
    {
        return Err(FinanceError::InvalidDate(format!(
            "{} does not return a date for payment {}",
            first_pmt_date, pmt_count
        )));
    }

    let mut sched_pmt: Vec<LoanPayment> = Vec::with_capacity(pmt_count as usize);
    let mut begin_balance = principal;

    for pmt_number in 1..=pmt_count {
        let pmt_date = first_pmt_date
            .checked_add_months(Months::new(pmt_number - 1))
            .ok_or_else(|| {
                FinanceError::InvalidDate(format!(
                    "{} does not return a date for payment {}",
                    first_pmt_date, pmt_number
                ))
            })?;

        let interest = begin_balance * monthly_rate;
        let (pmt_amt, end_balance) = if pmt_number == pmt_count {
            (begin_balance + interest, 0.)
        } else {
            (pmt_amount, begin_balance - (pmt_amount - interest))
        };
        trace!(
            "Pmt # {}, date {}, interest {}, end bal {}",
            pmt_number,
            pmt_date,
            interest,
            end_balance
        );

        sched_pmt.push(LoanPayment::new(
            pmt_number,
            pmt_date,
            pmt_amt,
            interest,
            end_balance,
        ));
        begin_balance = end_balance;
    }
    Ok(sched_pmt)
}
