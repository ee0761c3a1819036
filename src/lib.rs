//! # loan-engine
//!
//! Fixed-rate loan amortization with exchange-rate rescaling.
//!
//! Given a principal, an annual rate and a term, this engine computes the
//! fixed monthly payment and the full amortization schedule, then
//! re-expresses the loan in any other currency from two spot rates.
//!
//! ## Architecture
//!
//! - **core** — Foundational types: currencies and rates, loan terms, schedules
//! - **amortization** — Payment calculation and schedule generation
//! - **conversion** — Rate providers, rescaling, and per-caller sessions
//! - **simulation** — Random loan books and FX shock scenarios

pub mod amortization;
pub mod conversion;
pub mod core;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::amortization::generator::{amortize, generate_schedule, AmortizedLoan};
    pub use crate::amortization::payment::compute_monthly_payment;
    pub use crate::conversion::provider::{RateProvider, StaticRateTable};
    pub use crate::conversion::rescale::{rescale_amount, rescale_schedule, ConvertedLoan};
    pub use crate::conversion::session::{LoanSession, SessionError, SessionState};
    pub use crate::core::currency::{CurrencyCode, ExchangeRate, FxError, RateRatio};
    pub use crate::core::loan::{LoanTerms, LoanTermsError};
    pub use crate::core::schedule::{PaymentRecord, Schedule};
}
