use crate::amortization::generator::AmortizedLoan;
use crate::core::currency::{CurrencyCode, RateRatio};
use crate::core::schedule::{PaymentRecord, Schedule};
use serde::{Deserialize, Serialize};

/// Re-express a single amount through `ratio`.
pub fn rescale_amount(value: f64, ratio: &RateRatio) -> f64 {
    value * ratio.value()
}

/// Re-express every monetary field of `schedule` through `ratio`.
///
/// Periods are kept; the input schedule is left untouched. The rescaling is
/// purely linear, with no time-value adjustment.
///
/// # Examples
///
/// ```
/// use loan_engine::amortization::generator::amortize;
/// use loan_engine::conversion::rescale::rescale_schedule;
/// use loan_engine::core::currency::{CurrencyCode, ExchangeRate, RateRatio};
/// use loan_engine::core::loan::LoanTerms;
///
/// let loan = amortize(&LoanTerms::new(1_000.0, 0.0, 1).unwrap());
/// let usd = ExchangeRate::new(CurrencyCode::new("USD"), 1.0).unwrap();
/// let eur = ExchangeRate::new(CurrencyCode::new("EUR"), 0.5).unwrap();
///
/// let converted = rescale_schedule(loan.schedule(), &RateRatio::between(&usd, &eur));
/// assert_eq!(converted.len(), loan.schedule().len());
/// assert_eq!(converted.total_principal(), loan.schedule().total_principal() * 0.5);
/// ```
pub fn rescale_schedule(schedule: &Schedule, ratio: &RateRatio) -> Schedule {
    schedule
        .iter()
        .map(|r| PaymentRecord {
            period: r.period,
            principal: rescale_amount(r.principal, ratio),
            interest: rescale_amount(r.interest, ratio),
            remaining_balance: rescale_amount(r.remaining_balance, ratio),
        })
        .collect()
}

/// A computed loan re-expressed in another currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedLoan {
    ratio: RateRatio,
    principal: f64,
    payment: f64,
    schedule: Schedule,
}

impl ConvertedLoan {
    pub fn from_loan(loan: &AmortizedLoan, ratio: &RateRatio) -> Self {
        Self {
            ratio: ratio.clone(),
            principal: rescale_amount(loan.terms().principal(), ratio),
            payment: rescale_amount(loan.payment(), ratio),
            schedule: rescale_schedule(loan.schedule(), ratio),
        }
    }

    /// Currency the loan is now expressed in.
    pub fn currency(&self) -> &CurrencyCode {
        self.ratio.target()
    }

    pub fn ratio(&self) -> &RateRatio {
        &self.ratio
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}

impl std::fmt::Display for ConvertedLoan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Converted to {} ===", self.currency())?;
        writeln!(f, "Rate Ratio:      {}", self.ratio)?;
        writeln!(f, "Principal:       {:.2}", self.principal)?;
        writeln!(f, "Monthly Payment: {:.2}", self.payment)?;
        writeln!(f, "Total Interest:  {:.2}", self.schedule.total_interest())?;
        writeln!(f, "Total Paid:      {:.2}", self.schedule.total_paid())?;
        Ok(())
    }
}
