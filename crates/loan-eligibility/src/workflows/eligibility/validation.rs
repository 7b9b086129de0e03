use super::domain::{
    ApplicantProfile, EmploymentStatus, LoanApplication, LoanPurpose, QuoteTerms,
    RateCalculationRequest,
};
use super::products::ProductCatalog;
use super::schema::{ValidationRule, ValidationSchema};

const CREDIT_SCORE_FLOOR: i64 = 300;
const CREDIT_SCORE_CEILING: i64 = 850;

/// Every field-level problem found in a request, in schema order.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("validation failed: {}", .details.join("; "))]
pub struct ValidationFailure {
    pub details: Vec<String>,
}

impl ValidationFailure {
    pub fn new(details: Vec<String>) -> Self {
        Self { details }
    }
}

/// Checks inbound payloads against the session schema and product catalog.
#[derive(Debug, Clone, Copy)]
pub struct ApplicationValidator<'a> {
    schema: &'a ValidationSchema,
    catalog: &'a ProductCatalog,
}

impl<'a> ApplicationValidator<'a> {
    pub fn new(schema: &'a ValidationSchema, catalog: &'a ProductCatalog) -> Self {
        Self { schema, catalog }
    }

    /// Convert a submitted application into a typed profile, collecting every violation.
    pub fn profile_from_application(
        &self,
        application: LoanApplication,
    ) -> Result<ApplicantProfile, ValidationFailure> {
        let personal_rules = &self.schema.personal_info;
        let financial_rules = &self.schema.financial_info;
        let loan_rules = &self.schema.loan_details;
        let mut fields = FieldChecker::default();

        let personal = application.personal_info;
        let age = fields.whole_number(
            "Age",
            personal.age,
            Some(&personal_rules.age),
            Requirement::Essential,
        );
        let employment_status = fields.employment_status(
            personal.employment_status.as_deref(),
            &personal_rules.employment_status,
        );
        let employment_duration = fields.whole_number(
            "Employment duration",
            personal.employment_duration,
            Some(&personal_rules.employment_duration),
            Requirement::Rule,
        );

        let financial = application.financial_info;
        let monthly_income = fields.positive_amount(
            "Monthly income",
            financial.monthly_income,
            &financial_rules.monthly_income,
        );
        let monthly_expenses = fields.amount(
            "Monthly expenses",
            financial.monthly_expenses,
            Some(&financial_rules.monthly_expenses),
            Requirement::Rule,
        );
        let existing_debt = fields.amount(
            "Existing debt",
            financial.existing_debt,
            financial_rules.existing_debt.as_ref(),
            Requirement::Rule,
        );
        let credit_score = fields.credit_score(financial.credit_score, &financial_rules.credit_score);

        let loan = application.loan_details;
        let requested_amount = fields.amount(
            "Loan amount",
            loan.requested_amount,
            Some(&loan_rules.requested_amount),
            Requirement::Essential,
        );
        let loan_term = fields.positive_term(loan.loan_term, &loan_rules.loan_term);
        let loan_purpose = fields.loan_purpose(loan.loan_purpose.as_deref(), loan_rules.loan_purpose.as_ref());

        let product_id = match loan_purpose {
            Ok(purpose) => match self.catalog.product_for_purpose(purpose) {
                Some(product) => Some(product.id.clone()),
                None => {
                    fields.push("No loan product is available for the selected loan purpose");
                    None
                }
            },
            Err(()) => None,
        };

        let (
            Some(age),
            Some(employment_status),
            Some(employment_duration),
            Some(monthly_income),
            Some(monthly_expenses),
            Some(existing_debt),
            Ok(credit_score),
            Some(requested_amount),
            Some(loan_term_months),
            Ok(loan_purpose),
            Some(product_id),
        ) = (
            age,
            employment_status,
            employment_duration,
            monthly_income,
            monthly_expenses,
            existing_debt,
            credit_score,
            requested_amount,
            loan_term,
            loan_purpose,
            product_id,
        )
        else {
            return Err(fields.into_failure());
        };

        if !fields.details.is_empty() {
            return Err(fields.into_failure());
        }

        Ok(ApplicantProfile {
            age: age.unwrap_or(0),
            employment_status,
            employment_duration_months: employment_duration.unwrap_or(0),
            monthly_income,
            monthly_expenses: monthly_expenses.unwrap_or(0.0),
            existing_debt: existing_debt.unwrap_or(0.0),
            credit_score,
            requested_amount: requested_amount.unwrap_or(0.0),
            loan_term_months,
            loan_purpose,
            product_id,
        })
    }

    /// Validate a rate-calculation request against the requested product's bounds.
    pub fn quote_terms_from_request(
        &self,
        request: RateCalculationRequest,
    ) -> Result<QuoteTerms, ValidationFailure> {
        let mut fields = FieldChecker::default();

        let product = match request.loan_type.as_deref().map(str::trim) {
            None | Some("") => {
                fields.push("Loan type is required");
                None
            }
            Some(loan_type) => match self.catalog.get(loan_type) {
                Some(product) => Some(product),
                None => {
                    fields.push(format!("Unknown loan type '{loan_type}'"));
                    None
                }
            },
        };

        let loan_amount = match request.loan_amount {
            None => {
                fields.push("Loan amount is required");
                None
            }
            Some(amount) => match product {
                Some(product) if amount.is_finite() && product.amount_in_range(amount) => {
                    Some(amount)
                }
                Some(product) => {
                    fields.push(product.amount_range_message());
                    None
                }
                None if amount.is_finite() && amount > 0.0 => Some(amount),
                None => {
                    fields.push("Loan amount must be greater than zero");
                    None
                }
            },
        };

        let loan_term = match request.loan_term {
            None => {
                fields.push("Loan term is required");
                None
            }
            Some(term) => {
                let months = u32::try_from(term).ok().filter(|months| *months > 0);
                match (product, months) {
                    (Some(product), Some(months)) if product.term_in_range(months) => Some(months),
                    (Some(product), _) => {
                        fields.push(product.term_range_message());
                        None
                    }
                    (None, Some(months)) => Some(months),
                    (None, None) => {
                        fields.push("Loan term must be greater than zero");
                        None
                    }
                }
            }
        };

        let credit_score =
            fields.credit_score(request.credit_score, &self.schema.financial_info.credit_score);

        match (product, loan_amount, loan_term, credit_score) {
            (Some(product), Some(loan_amount), Some(loan_term_months), Ok(credit_score))
                if fields.details.is_empty() =>
            {
                Ok(QuoteTerms {
                    product_id: product.id.clone(),
                    loan_amount,
                    loan_term_months,
                    credit_score,
                })
            }
            _ => Err(fields.into_failure()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Requirement {
    /// Required only when the schema says so.
    Rule,
    /// The engine cannot score without it, whatever the schema says.
    Essential,
}

#[derive(Debug, Default)]
struct FieldChecker {
    details: Vec<String>,
}

impl FieldChecker {
    fn push(&mut self, detail: impl Into<String>) {
        self.details.push(detail.into());
    }

    fn into_failure(self) -> ValidationFailure {
        ValidationFailure::new(self.details)
    }

    fn reject(&mut self, rule: Option<&ValidationRule>, fallback: String) {
        match rule {
            Some(rule) => self.push(rule.error_message.clone()),
            None => self.push(fallback),
        }
    }

    /// `Some(None)` means absent but optional; `None` means a violation was recorded.
    fn number(
        &mut self,
        label: &str,
        value: Option<f64>,
        rule: Option<&ValidationRule>,
        requirement: Requirement,
    ) -> Option<Option<f64>> {
        let required =
            requirement == Requirement::Essential || rule.map_or(false, |rule| rule.required);

        let Some(value) = value else {
            if required {
                self.reject(rule, format!("{label} is required"));
                return None;
            }
            return Some(None);
        };

        if !value.is_finite() || value < 0.0 {
            self.reject(rule, format!("{label} must not be negative"));
            return None;
        }

        if let Some(rule) = rule {
            if !rule.in_range(value) {
                self.push(rule.error_message.clone());
                return None;
            }
        }

        Some(Some(value))
    }

    fn amount(
        &mut self,
        label: &str,
        value: Option<f64>,
        rule: Option<&ValidationRule>,
        requirement: Requirement,
    ) -> Option<Option<f64>> {
        self.number(label, value, rule, requirement)
    }

    fn positive_amount(
        &mut self,
        label: &str,
        value: Option<f64>,
        rule: &ValidationRule,
    ) -> Option<f64> {
        match self.number(label, value, Some(rule), Requirement::Essential)? {
            Some(amount) if amount > 0.0 => Some(amount),
            _ => {
                self.push(rule.error_message.clone());
                None
            }
        }
    }

    fn whole_number(
        &mut self,
        label: &str,
        value: Option<i64>,
        rule: Option<&ValidationRule>,
        requirement: Requirement,
    ) -> Option<Option<u32>> {
        let checked = self.number(label, value.map(|raw| raw as f64), rule, requirement)?;
        match (checked, value) {
            (Some(_), Some(raw)) => match u32::try_from(raw) {
                Ok(converted) => Some(Some(converted)),
                Err(_) => {
                    self.reject(rule, format!("{label} is out of range"));
                    None
                }
            },
            _ => Some(None),
        }
    }

    fn positive_term(&mut self, value: Option<i64>, rule: &ValidationRule) -> Option<u32> {
        match self.whole_number("Loan term", value, Some(rule), Requirement::Essential)? {
            Some(months) if months > 0 => Some(months),
            _ => {
                self.push(rule.error_message.clone());
                None
            }
        }
    }

    fn credit_score(
        &mut self,
        value: Option<i64>,
        rule: &ValidationRule,
    ) -> Result<Option<u16>, ()> {
        let checked = self
            .whole_number("Credit score", value, Some(rule), Requirement::Rule)
            .ok_or(())?;
        match checked {
            None => Ok(None),
            Some(score)
                if (CREDIT_SCORE_FLOOR..=CREDIT_SCORE_CEILING).contains(&i64::from(score)) =>
            {
                u16::try_from(score).map(Some).map_err(|_| ())
            }
            Some(_) => {
                self.push(rule.error_message.clone());
                Err(())
            }
        }
    }

    fn employment_status(
        &mut self,
        value: Option<&str>,
        rule: &ValidationRule,
    ) -> Option<EmploymentStatus> {
        match value.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) if rule.allows(raw) => match EmploymentStatus::parse(raw) {
                Some(status) => Some(status),
                None => {
                    self.push(rule.error_message.clone());
                    None
                }
            },
            _ => {
                self.push(rule.error_message.clone());
                None
            }
        }
    }

    fn loan_purpose(
        &mut self,
        value: Option<&str>,
        rule: Option<&ValidationRule>,
    ) -> Result<Option<LoanPurpose>, ()> {
        let raw = match value.map(str::trim).filter(|raw| !raw.is_empty()) {
            Some(raw) => raw,
            None if rule.map_or(false, |rule| rule.required) => {
                self.reject(rule, "Loan purpose is required".to_string());
                return Err(());
            }
            None => return Ok(None),
        };

        let allowed = rule.map_or(true, |rule| rule.allows(raw));
        match LoanPurpose::parse(raw) {
            Some(purpose) if allowed => Ok(Some(purpose)),
            _ => {
                self.reject(rule, format!("Unknown loan purpose '{raw}'"));
                Err(())
            }
        }
    }
}
