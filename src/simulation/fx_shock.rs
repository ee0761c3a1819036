//! FX shock scenarios.
//!
//! Shows how a loan's payment and total cost, re-expressed in a target
//! currency, move when the target rate is shocked away from its spot quote.

use crate::amortization::generator::AmortizedLoan;
use crate::core::currency::{ExchangeRate, FxError, RateRatio};
use serde::{Deserialize, Serialize};

/// Result of one FX shock scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FxShockResult {
    /// Description of the shock applied.
    pub scenario: String,
    /// Relative change applied to the target rate (0.10 = +10%).
    pub shock: f64,
    /// Monthly payment in the target currency at the spot rate.
    pub baseline_payment: f64,
    /// Monthly payment in the target currency at the shocked rate.
    pub shocked_payment: f64,
    /// Total paid over the schedule at the spot rate.
    pub baseline_total_paid: f64,
    /// Total paid over the schedule at the shocked rate.
    pub shocked_total_paid: f64,
}

impl FxShockResult {
    /// Change in total paid caused by the shock.
    pub fn impact(&self) -> f64 {
        self.shocked_total_paid - self.baseline_total_paid
    }
}

/// Configuration for FX shock scenarios.
#[derive(Debug, Clone)]
pub struct FxShockConfig {
    /// Relative moves of the target rate, e.g. `-0.10` for a 10% drop.
    pub shocks: Vec<f64>,
}

impl Default for FxShockConfig {
    fn default() -> Self {
        Self {
            shocks: vec![-0.20, -0.10, -0.05, 0.05, 0.10, 0.20],
        }
    }
}

/// Run every configured shock against `loan`, originally priced at `origin`
/// and converted at `target`.
///
/// A shock that would drive the target rate to zero or below is rejected
/// with [`FxError::InvalidRate`].
pub fn run_fx_shocks(
    loan: &AmortizedLoan,
    origin: &ExchangeRate,
    target: &ExchangeRate,
    config: &FxShockConfig,
) -> Result<Vec<FxShockResult>, FxError> {
    let baseline = loan.convert(&RateRatio::between(origin, target));

    config
        .shocks
        .iter()
        .map(|&shock| -> Result<FxShockResult, FxError> {
            let shocked_rate = ExchangeRate::at(
                target.currency().clone(),
                target.rate() * (1.0 + shock),
                target.fetched_at(),
            )?;
            let shocked = loan.convert(&RateRatio::between(origin, &shocked_rate));

            Ok(FxShockResult {
                scenario: format!("{} {:+.1}%", target.currency(), shock * 100.0),
                shock,
                baseline_payment: baseline.payment(),
                shocked_payment: shocked.payment(),
                baseline_total_paid: baseline.schedule().total_paid(),
                shocked_total_paid: shocked.schedule().total_paid(),
            })
        })
        .collect()
}

impl std::fmt::Display for FxShockResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:<14} payment {:>14.2} -> {:>14.2}   total {:>16.2} ({:+.2})",
            self.scenario,
            self.baseline_payment,
            self.shocked_payment,
            self.shocked_total_paid,
            self.impact()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amortization::generator::amortize;
    use crate::core::currency::CurrencyCode;
    use crate::core::loan::LoanTerms;
    use approx::assert_relative_eq;

    fn setup() -> (AmortizedLoan, ExchangeRate, ExchangeRate) {
        let loan = amortize(&LoanTerms::new(100_000.0, 4.0, 10).unwrap());
        let usd = ExchangeRate::new(CurrencyCode::new("USD"), 1.0).unwrap();
        let eur = ExchangeRate::new(CurrencyCode::new("EUR"), 0.9).unwrap();
        (loan, usd, eur)
    }

    #[test]
    fn test_shock_scales_payment() {
        let (loan, usd, eur) = setup();
        let config = FxShockConfig { shocks: vec![0.10] };
        let results = run_fx_shocks(&loan, &usd, &eur, &config).unwrap();

        assert_eq!(results.len(), 1);
        let r = &results[0];
        assert_relative_eq!(
            r.shocked_payment,
            r.baseline_payment * 1.10,
            max_relative = 1e-12
        );
        assert!(r.impact() > 0.0);
        assert_eq!(r.scenario, "EUR +10.0%");
    }

    #[test]
    fn test_negative_shock_reduces_total() {
        let (loan, usd, eur) = setup();
        let config = FxShockConfig { shocks: vec![-0.05] };
        let results = run_fx_shocks(&loan, &usd, &eur, &config).unwrap();
        assert!(results[0].impact() < 0.0);
    }

    #[test]
    fn test_default_config_runs_all_shocks() {
        let (loan, usd, eur) = setup();
        let results = run_fx_shocks(&loan, &usd, &eur, &FxShockConfig::default()).unwrap();
        assert_eq!(results.len(), 6);
    }

    #[test]
    fn test_total_collapse_rejected() {
        let (loan, usd, eur) = setup();
        let config = FxShockConfig { shocks: vec![-1.0] };
        let result = run_fx_shocks(&loan, &usd, &eur, &config);
        assert!(matches!(result, Err(FxError::InvalidRate { .. })));
    }
}
