//! Stress testing utilities for the amortization engine.
//!
//! Generates random books of loans to exercise payment calculation and
//! schedule generation across a wide range of terms.

use crate::core::loan::{LoanTerms, LoanTermsError};
use rand::Rng;

/// Configuration for generating a random loan book.
#[derive(Debug, Clone)]
pub struct LoanBookConfig {
    /// Number of loans in the book.
    pub loan_count: usize,
    /// Minimum principal.
    pub min_principal: f64,
    /// Maximum principal.
    pub max_principal: f64,
    /// Highest annual rate in percent. Rates are drawn from `[0, max)`.
    pub max_rate_percent: f64,
    /// Longest term in years. Terms are drawn from `1..=max`.
    pub max_term_years: u32,
    /// Share of loans generated with a zero interest rate.
    pub zero_rate_share: f64,
}

impl Default for LoanBookConfig {
    fn default() -> Self {
        Self {
            loan_count: 100,
            min_principal: 1_000.0,
            max_principal: 2_000_000.0,
            max_rate_percent: 15.0,
            max_term_years: 40,
            zero_rate_share: 0.05,
        }
    }
}

/// Generate a random loan book.
pub fn generate_random_loan_book(
    config: &LoanBookConfig,
) -> Result<Vec<LoanTerms>, LoanTermsError> {
    let mut rng = rand::thread_rng();
    let max_term = config.max_term_years.max(1);

    (0..config.loan_count)
        .map(|_| {
            let principal = if config.max_principal > config.min_principal {
                rng.gen_range(config.min_principal..config.max_principal)
            } else {
                config.min_principal
            };
            let zero_rate = rng.gen_bool(config.zero_rate_share.clamp(0.0, 1.0));
            let rate = if config.max_rate_percent <= 0.0 || zero_rate {
                0.0
            } else {
                // Quote to two decimals, like a lender's rate sheet.
                (rng.gen_range(0.0..config.max_rate_percent) * 100.0).round() / 100.0
            };
            let years = rng.gen_range(1..=max_term);
            LoanTerms::new(principal, rate, years)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::generator::amortize;

    #[test]
    fn test_random_book_generation() {
        let config = LoanBookConfig {
            loan_count: 25,
            max_term_years: 10,
            ..Default::default()
        };

        let book = generate_random_loan_book(&config).unwrap();
        assert_eq!(book.len(), 25);
        for terms in &book {
            assert!(terms.principal() >= config.min_principal);
            assert!(terms.principal() < config.max_principal);
            assert!(terms.annual_rate_percent() <= config.max_rate_percent);
            assert!((1..=10).contains(&terms.term_years()));
        }
    }

    #[test]
    fn test_random_book_amortizes() {
        let book = generate_random_loan_book(&LoanBookConfig::default()).unwrap();
        for terms in &book {
            let loan = amortize(terms);
            assert_eq!(loan.schedule().len() as u32, terms.period_count());
            assert!(loan.schedule().final_balance() <= terms.principal() * 1e-6);
        }
    }

    #[test]
    fn test_negative_principal_bound_is_rejected() {
        let config = LoanBookConfig {
            loan_count: 3,
            min_principal: -10.0,
            max_principal: -1.0,
            ..Default::default()
        };
        assert!(generate_random_loan_book(&config).is_err());
    }
}
