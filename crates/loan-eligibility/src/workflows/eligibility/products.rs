use serde::{Deserialize, Serialize};

use super::domain::LoanPurpose;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterestRateRange {
    pub min: f64,
    pub max: f64,
}

impl InterestRateRange {
    pub fn spread(&self) -> f64 {
        (self.max - self.min).max(0.0)
    }
}

/// Catalog entry bounding amounts, terms, and pricing for a family of loans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanProduct {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub min_amount: f64,
    pub max_amount: f64,
    pub min_term: u32,
    pub max_term: u32,
    pub interest_rate_range: InterestRateRange,
    pub purposes: Vec<LoanPurpose>,
}

impl LoanProduct {
    pub fn amount_in_range(&self, amount: f64) -> bool {
        amount >= self.min_amount && amount <= self.max_amount
    }

    pub fn term_in_range(&self, months: u32) -> bool {
        months >= self.min_term && months <= self.max_term
    }

    pub fn serves(&self, purpose: LoanPurpose) -> bool {
        self.purposes.contains(&purpose)
    }

    pub fn amount_range_message(&self) -> String {
        format!(
            "Loan amount must be between {} and {}",
            format_rand(self.min_amount),
            format_rand(self.max_amount)
        )
    }

    pub fn term_range_message(&self) -> String {
        format!(
            "Loan term must be between {} and {} months",
            self.min_term, self.max_term
        )
    }
}

/// Ordered product catalog. The first entry is the default when no purpose is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<LoanProduct>,
}

impl ProductCatalog {
    pub fn standard() -> Self {
        Self {
            products: vec![
                LoanProduct {
                    id: "personal_loan".to_string(),
                    name: "Personal Loan".to_string(),
                    description: "Flexible personal financing for various needs".to_string(),
                    min_amount: 5_000.0,
                    max_amount: 300_000.0,
                    min_term: 6,
                    max_term: 60,
                    interest_rate_range: InterestRateRange {
                        min: 10.5,
                        max: 18.5,
                    },
                    purposes: vec![
                        LoanPurpose::DebtConsolidation,
                        LoanPurpose::HomeImprovement,
                        LoanPurpose::Education,
                        LoanPurpose::Medical,
                        LoanPurpose::Other,
                    ],
                },
                LoanProduct {
                    id: "vehicle_loan".to_string(),
                    name: "Vehicle Finance".to_string(),
                    description: "Financing for new and used vehicles".to_string(),
                    min_amount: 50_000.0,
                    max_amount: 1_500_000.0,
                    min_term: 12,
                    max_term: 72,
                    interest_rate_range: InterestRateRange {
                        min: 8.5,
                        max: 15.0,
                    },
                    purposes: vec![LoanPurpose::NewVehicle, LoanPurpose::UsedVehicle],
                },
            ],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&LoanProduct> {
        let needle = id.trim();
        self.products
            .iter()
            .find(|product| product.id.eq_ignore_ascii_case(needle))
    }

    pub fn default_product(&self) -> Option<&LoanProduct> {
        self.products.first()
    }

    /// Product serving `purpose`, or the default product when no purpose was given.
    pub fn product_for_purpose(&self, purpose: Option<LoanPurpose>) -> Option<&LoanProduct> {
        match purpose {
            Some(purpose) => self.products.iter().find(|product| product.serves(purpose)),
            None => self.default_product(),
        }
    }
}

/// Formats a whole-rand amount with thousands separators, e.g. `R300,000`.
pub fn format_rand(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}R{grouped}")
}
