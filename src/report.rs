use crate::config::DisplayConfig;
use crate::loan::CompleteLoanDetails;

pub const NOT_REQUIRED: &str = "not required";

pub fn round(amt: f64, dec: usize) -> f64 {
    if amt == 0. {
        0.
    } else {
        let scale = 10_f64.powi(dec as i32);
        (amt * scale).round() / scale
    }
}

pub fn format_amount(value: f64, cfg: &DisplayConfig) -> String {
    format!(
        "{:.*} {}",
        cfg.dec_places,
        round(value, cfg.dec_places),
        cfg.currency
    )
}

/// Cash-loan figures at or under the threshold are noise from a down payment
/// that own funds (almost) cover.
pub fn format_cash_loan_amount(value: f64, cfg: &DisplayConfig) -> String {
    if value <= cfg.not_required_threshold {
        NOT_REQUIRED.to_string()
    } else {
        format_amount(value, cfg)
    }
}

pub fn render(details: &CompleteLoanDetails, cfg: &DisplayConfig) -> String {
    let amount = |v| format_amount(v, cfg);
    let cash = |v| format_cash_loan_amount(v, cfg);

    let sections = [
        (
            "Repayment plan",
            [
                ("Total property price", amount(details.total_price)),
                ("Mortgage amount", amount(details.mortgage_amount)),
                ("Cash loan amount", cash(details.cash_loan_amount)),
            ],
        ),
        (
            "Mortgage",
            [
                ("Monthly payment", amount(details.mortgage_monthly)),
                ("Total payment", amount(details.mortgage_total)),
                ("Total interest", amount(details.mortgage_interest)),
            ],
        ),
        (
            "Cash loan",
            [
                ("Monthly payment", cash(details.cash_loan_monthly)),
                ("Total payment", cash(details.cash_loan_total)),
                ("Total interest", cash(details.cash_loan_interest)),
            ],
        ),
    ];

    let mut out = String::new();
    for (title, rows) in &sections {
        out.push_str(&format!("--- {} ---\n", title));
        for (label, value) in rows {
            out.push_str(&format!("{:>22}: {}\n", label, value));
        }
    }
    out.push_str(&format!(
        "{:>22}: {}\n",
        "Total monthly payment",
        amount(details.total_monthly)
    ));
    out
}
