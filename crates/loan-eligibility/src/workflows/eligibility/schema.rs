use serde::{Deserialize, Serialize};

use super::domain::{EmploymentStatus, LoanPurpose};

/// Rule attached to a single form field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationRule {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    pub error_message: String,
}

impl ValidationRule {
    fn range(min: Option<f64>, max: Option<f64>, required: bool, message: &str) -> Self {
        Self {
            min,
            max,
            required,
            options: None,
            error_message: message.to_string(),
        }
    }

    fn choice(options: Vec<String>, required: bool, message: &str) -> Self {
        Self {
            min: None,
            max: None,
            required,
            options: Some(options),
            error_message: message.to_string(),
        }
    }

    pub fn in_range(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }

    pub fn allows(&self, value: &str) -> bool {
        match &self.options {
            Some(options) => options
                .iter()
                .any(|option| option.eq_ignore_ascii_case(value.trim())),
            None => true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfoRules {
    pub age: ValidationRule,
    pub employment_status: ValidationRule,
    pub employment_duration: ValidationRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfoRules {
    pub monthly_income: ValidationRule,
    pub monthly_expenses: ValidationRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_debt: Option<ValidationRule>,
    pub credit_score: ValidationRule,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetailsRules {
    pub requested_amount: ValidationRule,
    pub loan_term: ValidationRule,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_purpose: Option<ValidationRule>,
}

/// Server-supplied form schema. Immutable once loaded for a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSchema {
    pub personal_info: PersonalInfoRules,
    pub financial_info: FinancialInfoRules,
    pub loan_details: LoanDetailsRules,
}

impl ValidationSchema {
    /// Rules served to the loan form by default.
    pub fn standard() -> Self {
        let employment_options = EmploymentStatus::ALL
            .iter()
            .map(|status| status.as_str().to_string())
            .collect();
        let purpose_options = LoanPurpose::ALL
            .iter()
            .map(|purpose| purpose.as_str().to_string())
            .collect();

        Self {
            personal_info: PersonalInfoRules {
                age: ValidationRule::range(
                    Some(18.0),
                    Some(65.0),
                    true,
                    "Age must be between 18 and 65",
                ),
                employment_status: ValidationRule::choice(
                    employment_options,
                    true,
                    "Please select your employment status",
                ),
                employment_duration: ValidationRule::range(
                    Some(3.0),
                    None,
                    true,
                    "Minimum 3 months employment required",
                ),
            },
            financial_info: FinancialInfoRules {
                monthly_income: ValidationRule::range(
                    Some(5_000.0),
                    None,
                    true,
                    "Minimum monthly income of R5,000 required",
                ),
                monthly_expenses: ValidationRule::range(
                    Some(0.0),
                    None,
                    true,
                    "Please enter your monthly expenses",
                ),
                existing_debt: Some(ValidationRule::range(
                    Some(0.0),
                    None,
                    false,
                    "Existing debt cannot be negative",
                )),
                credit_score: ValidationRule::range(
                    Some(300.0),
                    Some(850.0),
                    false,
                    "Credit score must be between 300 and 850",
                ),
            },
            loan_details: LoanDetailsRules {
                requested_amount: ValidationRule::range(
                    Some(5_000.0),
                    Some(300_000.0),
                    true,
                    "Loan amount must be between R5,000 and R300,000",
                ),
                loan_term: ValidationRule::range(
                    Some(6.0),
                    Some(60.0),
                    true,
                    "Loan term must be between 6 and 60 months",
                ),
                loan_purpose: Some(ValidationRule::choice(
                    purpose_options,
                    false,
                    "Please select a valid loan purpose",
                )),
            },
        }
    }
}
