//! Loan eligibility decisioning for the online application form.
//!
//! An application is validated against the session's validation schema, scored by the
//! eligibility engine, sized against the selected loan product, and priced. Rate quotes
//! share the same amortization arithmetic as the recommended offer.

pub mod affordability;
pub mod amortization;
pub mod domain;
pub(crate) mod evaluation;
pub mod events;
pub mod pricing;
pub mod products;
pub(crate) mod recommendation;
pub mod reference;
pub mod router;
pub mod schema;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use amortization::{AmortizationSchedule, ScheduleEntry};
pub use domain::{
    AffordabilityAnalysis, AffordabilityScore, ApplicantProfile, EligibilityAssessment,
    EligibilityResult, EmploymentStatus, FinancialInfo, LoanApplication, LoanDetails,
    LoanPurpose, PersonalInfo, QuoteTerms, RateCalculationRequest, RecommendedLoan, ResultTheme,
    RiskCategory,
};
pub use evaluation::{
    ComputationError, EligibilityEngine, EligibilityOutcome, ScoreComponent, ScoreFactor,
    ScoringConfig,
};
pub use events::{DecisionEvent, DecisionEventPublisher, NoopPublisher, PublishError};
pub use pricing::RateQuote;
pub use products::{InterestRateRange, LoanProduct, ProductCatalog};
pub use reference::{ReferenceDataError, ReferenceDataSource, StaticReferenceData};
pub use router::eligibility_router;
pub use schema::{ValidationRule, ValidationSchema};
pub use service::{EligibilityServiceError, LoanEligibilityService};
pub use validation::{ApplicationValidator, ValidationFailure};
