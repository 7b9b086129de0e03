//! Fixed-payment loan arithmetic.
//!
//! Payments follow the standard annuity formula
//! `payment = P * r * (1 + r)^n / ((1 + r)^n - 1)` with `r = annual_rate / 12 / 100`.
//! Monetary outputs are rounded to cents; the final instalment absorbs the rounding so
//! the schedule always closes at a zero balance.

use std::io::Write;

use serde::{Deserialize, Serialize};

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

pub fn floor_cents(value: f64) -> f64 {
    (value * 100.0).floor() / 100.0
}

fn monthly_rate(annual_rate_pct: f64) -> f64 {
    annual_rate_pct / 12.0 / 100.0
}

/// Unrounded level payment for `principal` over `term_months`.
pub fn monthly_payment(principal: f64, annual_rate_pct: f64, term_months: u32) -> f64 {
    if term_months == 0 || principal <= 0.0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_pct);
    let factor = (1.0 + rate).powi(term_months as i32);
    if rate <= 0.0 || factor <= 1.0 {
        return principal / f64::from(term_months);
    }

    principal * rate * factor / (factor - 1.0)
}

/// Largest principal a level `payment` can retire over `term_months`.
pub fn max_principal(payment: f64, annual_rate_pct: f64, term_months: u32) -> f64 {
    if term_months == 0 || payment <= 0.0 {
        return 0.0;
    }

    let rate = monthly_rate(annual_rate_pct);
    let factor = (1.0 + rate).powi(term_months as i32);
    if rate <= 0.0 || factor <= 1.0 {
        return payment * f64::from(term_months);
    }

    payment * (factor - 1.0) / (rate * factor)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub month: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AmortizationSchedule {
    pub principal: f64,
    pub annual_rate: f64,
    pub monthly_payment: f64,
    pub entries: Vec<ScheduleEntry>,
}

impl AmortizationSchedule {
    pub fn build(principal: f64, annual_rate_pct: f64, term_months: u32) -> Self {
        let principal = round_cents(principal.max(0.0));
        let payment = round_cents(monthly_payment(principal, annual_rate_pct, term_months));
        let rate = monthly_rate(annual_rate_pct);

        let mut entries = Vec::with_capacity(term_months as usize);
        let mut balance = principal;

        for month in 1..=term_months {
            let interest = round_cents(balance * rate);
            let mut principal_paid = round_cents(payment - interest);
            if month == term_months || principal_paid > balance {
                principal_paid = balance;
            }

            balance = round_cents(balance - principal_paid);
            entries.push(ScheduleEntry {
                month,
                payment: round_cents(principal_paid + interest),
                principal: principal_paid,
                interest,
                balance,
            });
        }

        Self {
            principal,
            annual_rate: annual_rate_pct,
            monthly_payment: payment,
            entries,
        }
    }

    pub fn term_months(&self) -> u32 {
        self.entries.len() as u32
    }

    /// Contractual repayment: the level payment times the term.
    pub fn total_repayment(&self) -> f64 {
        round_cents(self.monthly_payment * f64::from(self.term_months()))
    }

    pub fn total_interest(&self) -> f64 {
        round_cents(self.total_repayment() - self.principal)
    }

    pub fn principal_paid(&self) -> f64 {
        round_cents(self.entries.iter().map(|entry| entry.principal).sum())
    }

    pub fn closing_balance(&self) -> f64 {
        self.entries.last().map_or(self.principal, |entry| entry.balance)
    }

    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), csv::Error> {
        write_entries_csv(&self.entries, writer)
    }
}

/// Write schedule rows as `month,payment,principal,interest,balance` CSV.
pub fn write_entries_csv<W: Write>(entries: &[ScheduleEntry], writer: W) -> Result<(), csv::Error> {
    let mut csv = csv::Writer::from_writer(writer);
    for entry in entries {
        csv.serialize(entry)?;
    }
    csv.flush()?;
    Ok(())
}
