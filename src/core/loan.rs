use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Months per year; the engine amortizes monthly.
pub const PERIODS_PER_YEAR: u32 = 12;

/// Longest accepted term. Keeps the period count far inside `i32`.
pub const MAX_TERM_YEARS: u32 = 1_000;

/// Rejections raised when constructing [`LoanTerms`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LoanTermsError {
    #[error("principal must not be negative, got {0}")]
    NegativePrincipal(f64),
    #[error("annual interest rate must not be negative, got {0}%")]
    NegativeRate(f64),
    #[error("loan term must be at least 1 year, got {0}")]
    TermTooShort(u32),
    #[error("loan term must be at most {MAX_TERM_YEARS} years, got {0}")]
    TermTooLong(u32),
    #[error("{field} must be a finite number")]
    NonFinite { field: &'static str },
}

/// The parameters of a fixed-rate loan.
///
/// Terms are validated once at construction and immutable afterwards, so
/// the payment calculator and schedule generator never see a negative
/// principal, a negative rate, or a term outside `1..=MAX_TERM_YEARS`.
///
/// # Examples
///
/// ```
/// use loan_engine::core::loan::LoanTerms;
///
/// let terms = LoanTerms::new(250_000.0, 5.0, 30).unwrap();
/// assert_eq!(terms.period_count(), 360);
///
/// assert!(LoanTerms::new(250_000.0, 5.0, 0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawLoanTerms")]
pub struct LoanTerms {
    /// Amount borrowed, in the loan's currency.
    principal: f64,
    /// Nominal annual rate in percent (5.0 means 5%).
    annual_rate_percent: f64,
    term_years: u32,
}

/// Unvalidated wire form of [`LoanTerms`].
#[derive(Deserialize)]
struct RawLoanTerms {
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
}

impl TryFrom<RawLoanTerms> for LoanTerms {
    type Error = LoanTermsError;

    fn try_from(raw: RawLoanTerms) -> Result<Self, Self::Error> {
        LoanTerms::new(raw.principal, raw.annual_rate_percent, raw.term_years)
    }
}

impl LoanTerms {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        term_years: u32,
    ) -> Result<Self, LoanTermsError> {
        if !principal.is_finite() {
            return Err(LoanTermsError::NonFinite { field: "principal" });
        }
        if !annual_rate_percent.is_finite() {
            return Err(LoanTermsError::NonFinite {
                field: "annual interest rate",
            });
        }
        if principal < 0.0 {
            return Err(LoanTermsError::NegativePrincipal(principal));
        }
        if annual_rate_percent < 0.0 {
            return Err(LoanTermsError::NegativeRate(annual_rate_percent));
        }
        if term_years < 1 {
            return Err(LoanTermsError::TermTooShort(term_years));
        }
        if term_years > MAX_TERM_YEARS {
            return Err(LoanTermsError::TermTooLong(term_years));
        }
        Ok(Self {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    /// Monthly rate as a fraction: `annual_rate_percent / 100 / 12`.
    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / PERIODS_PER_YEAR as f64
    }

    /// Number of scheduled monthly payments.
    pub fn period_count(&self) -> u32 {
        self.term_years * PERIODS_PER_YEAR
    }
}

impl fmt::Display for LoanTerms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at {}% over {} years",
            self.principal, self.annual_rate_percent, self.term_years
        )
    }
}
