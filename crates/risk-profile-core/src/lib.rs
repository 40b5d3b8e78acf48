//! Investor risk profile scoring.
//!
//! A short questionnaire yields a time-horizon score and a risk-tolerance
//! score. The pair is looked up in a risk profile matrix to name a portfolio
//! type, whose description, return figures and asset-class weights come from
//! a portfolio catalog.

pub mod assessment;
pub mod audit;
pub mod composition;
pub mod error;
pub mod questionnaire;
pub mod reference;
pub mod resolver;
pub mod types;

pub use assessment::{assess, Assessment, AssessmentOutcome};
pub use error::{RiskProfileError, TableIssue};
pub use types::*;

/// Standard result type for all risk-profile operations
pub type RiskProfileResult<T> = Result<T, RiskProfileError>;
