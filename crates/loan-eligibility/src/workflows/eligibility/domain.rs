use serde::{Deserialize, Serialize};

/// Application payload as submitted by the loan form.
///
/// Every field is optional on the wire because the form posts `null` for blank inputs;
/// the validator turns this into an [`ApplicantProfile`] or a list of field errors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    #[serde(default)]
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub financial_info: FinancialInfo,
    #[serde(default)]
    pub loan_details: LoanDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub employment_status: Option<String>,
    /// Months with the current employer.
    #[serde(default)]
    pub employment_duration: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInfo {
    #[serde(default)]
    pub monthly_income: Option<f64>,
    #[serde(default)]
    pub monthly_expenses: Option<f64>,
    #[serde(default)]
    pub existing_debt: Option<f64>,
    #[serde(default)]
    pub credit_score: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanDetails {
    #[serde(default)]
    pub requested_amount: Option<f64>,
    /// Term in months.
    #[serde(default)]
    pub loan_term: Option<i64>,
    #[serde(default)]
    pub loan_purpose: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
}

impl EmploymentStatus {
    pub const ALL: [EmploymentStatus; 4] = [
        EmploymentStatus::Employed,
        EmploymentStatus::SelfEmployed,
        EmploymentStatus::Unemployed,
        EmploymentStatus::Retired,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            EmploymentStatus::Employed => "employed",
            EmploymentStatus::SelfEmployed => "self_employed",
            EmploymentStatus::Unemployed => "unemployed",
            EmploymentStatus::Retired => "retired",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    DebtConsolidation,
    HomeImprovement,
    Education,
    Medical,
    Other,
    NewVehicle,
    UsedVehicle,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 7] = [
        LoanPurpose::DebtConsolidation,
        LoanPurpose::HomeImprovement,
        LoanPurpose::Education,
        LoanPurpose::Medical,
        LoanPurpose::Other,
        LoanPurpose::NewVehicle,
        LoanPurpose::UsedVehicle,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            LoanPurpose::DebtConsolidation => "debt_consolidation",
            LoanPurpose::HomeImprovement => "home_improvement",
            LoanPurpose::Education => "education",
            LoanPurpose::Medical => "medical",
            LoanPurpose::Other => "other",
            LoanPurpose::NewVehicle => "new_vehicle",
            LoanPurpose::UsedVehicle => "used_vehicle",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|purpose| purpose.as_str().eq_ignore_ascii_case(needle))
    }
}

/// The validated, fully-typed application the engine scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub age: u32,
    pub employment_status: EmploymentStatus,
    pub employment_duration_months: u32,
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub existing_debt: f64,
    pub credit_score: Option<u16>,
    pub requested_amount: f64,
    pub loan_term_months: u32,
    pub loan_purpose: Option<LoanPurpose>,
    /// Catalog product the application was matched against.
    pub product_id: String,
}

/// Coarse banding of approval likelihood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

/// Likelihood at or above which an application is low risk.
pub const LOW_RISK_THRESHOLD: u8 = 80;
/// Likelihood at or above which an application is medium risk.
pub const MEDIUM_RISK_THRESHOLD: u8 = 60;

impl RiskCategory {
    pub const fn from_likelihood(likelihood: u8) -> Self {
        if likelihood >= LOW_RISK_THRESHOLD {
            RiskCategory::Low
        } else if likelihood >= MEDIUM_RISK_THRESHOLD {
            RiskCategory::Medium
        } else {
            RiskCategory::High
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

/// Color theme the result card uses for a likelihood. Shares the risk thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultTheme {
    Success,
    Warning,
    Danger,
}

impl ResultTheme {
    pub const fn from_likelihood(likelihood: u8) -> Self {
        match RiskCategory::from_likelihood(likelihood) {
            RiskCategory::Low => ResultTheme::Success,
            RiskCategory::Medium => ResultTheme::Warning,
            RiskCategory::High => ResultTheme::Danger,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ResultTheme::Success => "success",
            ResultTheme::Warning => "warning",
            ResultTheme::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AffordabilityScore {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl AffordabilityScore {
    pub(crate) const fn from_bucket(bucket: u8) -> Self {
        match bucket {
            0 => AffordabilityScore::Poor,
            1 => AffordabilityScore::Fair,
            2 => AffordabilityScore::Good,
            _ => AffordabilityScore::Excellent,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            AffordabilityScore::Poor => "poor",
            AffordabilityScore::Fair => "fair",
            AffordabilityScore::Good => "good",
            AffordabilityScore::Excellent => "excellent",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityResult {
    pub is_eligible: bool,
    pub approval_likelihood: u8,
    pub risk_category: RiskCategory,
    pub decision_reason: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedLoan {
    pub max_amount: f64,
    pub recommended_amount: f64,
    pub interest_rate: f64,
    pub monthly_payment: f64,
    pub total_repayment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffordabilityAnalysis {
    pub disposable_income: f64,
    pub debt_to_income_ratio: f64,
    pub loan_to_income_ratio: f64,
    pub affordability_score: AffordabilityScore,
}

/// Response body for a scored application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityAssessment {
    pub eligibility_result: EligibilityResult,
    pub recommended_loan: RecommendedLoan,
    pub affordability_analysis: AffordabilityAnalysis,
}

/// Interest-rate quote request. `loan_type` is a catalog product id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateCalculationRequest {
    #[serde(default)]
    pub loan_amount: Option<f64>,
    #[serde(default)]
    pub loan_term: Option<i64>,
    #[serde(default)]
    pub credit_score: Option<i64>,
    #[serde(default)]
    pub loan_type: Option<String>,
}

/// Validated quote terms.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteTerms {
    pub product_id: String,
    pub loan_amount: f64,
    pub loan_term_months: u32,
    pub credit_score: Option<u16>,
}
