use crate::amortization::payment::compute_monthly_payment;
use crate::conversion::rescale::ConvertedLoan;
use crate::core::currency::RateRatio;
use crate::core::loan::LoanTerms;
use crate::core::schedule::{PaymentRecord, Schedule};
use log::debug;
use serde::{Deserialize, Serialize};

/// Build the amortization schedule for `terms` paid down by a fixed `payment`.
///
/// # Algorithm
///
/// 1. Start with the balance equal to the principal.
/// 2. For each month: interest = balance × monthly rate; the rest of the
///    payment reduces the balance.
/// 3. Record the balance after payment, clamped at zero. A NaN balance is
///    recorded as NaN, never as a paid-off zero.
/// 4. Stop after the record whose balance reached zero or below, or after
///    the last scheduled month.
///
/// Step 4 ends the schedule early when `payment` overpays the loan, and
/// absorbs floating-point drift on the final month.
pub fn generate_schedule(terms: &LoanTerms, payment: f64) -> Schedule {
    let r = terms.periodic_rate();
    let mut balance = terms.principal();
    let mut schedule = Schedule::new();

    for period in 1..=terms.period_count() {
        let interest = balance * r;
        let principal = payment - interest;
        balance -= principal;

        schedule.push(PaymentRecord {
            period,
            principal,
            interest,
            remaining_balance: if balance <= 0.0 { 0.0 } else { balance },
        });

        if balance <= 0.0 {
            break;
        }
    }

    schedule
}

/// A loan with its fixed payment and full schedule, in the loan's own currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizedLoan {
    terms: LoanTerms,
    payment: f64,
    schedule: Schedule,
}

impl AmortizedLoan {
    pub fn terms(&self) -> &LoanTerms {
        &self.terms
    }

    pub fn payment(&self) -> f64 {
        self.payment
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Re-express principal, payment and schedule through `ratio`.
    pub fn convert(&self, ratio: &RateRatio) -> ConvertedLoan {
        ConvertedLoan::from_loan(self, ratio)
    }
}

/// Compute the payment for `terms` and amortize the loan with it.
pub fn amortize(terms: &LoanTerms) -> AmortizedLoan {
    let payment = compute_monthly_payment(terms);
    let schedule = generate_schedule(terms, payment);

    debug!(
        "amortized {}: payment {:.6}, {} periods",
        terms,
        payment,
        schedule.len()
    );
    if (schedule.len() as u32) < terms.period_count() {
        debug!(
            "schedule ended at period {} of {}",
            schedule.len(),
            terms.period_count()
        );
    }

    AmortizedLoan {
        terms: *terms,
        payment,
        schedule,
    }
}

impl std::fmt::Display for AmortizedLoan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Loan Summary ===")?;
        writeln!(f, "Principal:       {:.2}", self.terms.principal())?;
        writeln!(f, "Annual Rate:     {}%", self.terms.annual_rate_percent())?;
        writeln!(f, "Term:            {} years", self.terms.term_years())?;
        writeln!(f, "Monthly Payment: {:.2}", self.payment)?;
        writeln!(f, "Payments:        {}", self.schedule.len())?;
        writeln!(f, "Total Interest:  {:.2}", self.schedule.total_interest())?;
        writeln!(f, "Total Paid:      {:.2}", self.schedule.total_paid())?;
        Ok(())
    }
}
