//! Caller-owned conversion session.
//!
//! A session remembers the last loan computed in an origin currency together
//! with the origin rate used, so the loan can be re-expressed in any number
//! of target currencies without recomputing the schedule.
//!
//! ```text
//! Idle -> AwaitingInitialRates -> Computed -> Converted
//!                                    ^            |
//!                                    +-- convert -+ (any number of times)
//! ```

use crate::amortization::generator::{amortize, AmortizedLoan};
use crate::conversion::provider::RateProvider;
use crate::conversion::rescale::ConvertedLoan;
use crate::core::currency::{CurrencyCode, ExchangeRate, FxError, RateRatio};
use crate::core::loan::{LoanTerms, LoanTermsError};
use log::{info, warn};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    #[error(transparent)]
    Fx(#[from] FxError),
    #[error("invalid loan terms: {0}")]
    InvalidLoanTerms(#[from] LoanTermsError),
}

/// A loan computed in its origin currency, plus the origin rate.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedLoan {
    pub currency: CurrencyCode,
    pub origin_rate: ExchangeRate,
    pub loan: AmortizedLoan,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    /// The origin rate is being fetched.
    AwaitingInitialRates,
    Computed(ComputedLoan),
    Converted {
        computed: ComputedLoan,
        target_rate: ExchangeRate,
        converted: ConvertedLoan,
    },
}

impl SessionState {
    /// The unconverted loan, once one exists.
    pub fn computed(&self) -> Option<&ComputedLoan> {
        match self {
            SessionState::Computed(computed) | SessionState::Converted { computed, .. } => {
                Some(computed)
            }
            SessionState::Idle | SessionState::AwaitingInitialRates => None,
        }
    }

    /// Rate of the currency the loan was last converted to.
    pub fn target_rate(&self) -> Option<&ExchangeRate> {
        match self {
            SessionState::Converted { target_rate, .. } => Some(target_rate),
            _ => None,
        }
    }

    pub fn converted(&self) -> Option<&ConvertedLoan> {
        match self {
            SessionState::Converted { converted, .. } => Some(converted),
            _ => None,
        }
    }
}

/// Conversion state owned by one caller.
///
/// Sessions share nothing; concurrent callers each hold their own.
#[derive(Debug, Clone)]
pub struct LoanSession {
    id: Uuid,
    state: SessionState,
}

impl Default for LoanSession {
    fn default() -> Self {
        Self::new()
    }
}

impl LoanSession {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: SessionState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Fetch the origin rate for `currency` and amortize `terms`.
    ///
    /// Returns a copy of the loan now held by the session. On a failed
    /// fetch the previous state is kept, so an earlier loan stays available
    /// for conversion.
    pub fn calculate<P: RateProvider>(
        &mut self,
        terms: LoanTerms,
        currency: CurrencyCode,
        provider: &P,
    ) -> Result<ComputedLoan, SessionError> {
        let previous = std::mem::replace(&mut self.state, SessionState::AwaitingInitialRates);

        let origin_rate = match provider.fetch_rate(&currency) {
            Ok(rate) => rate,
            Err(e) => {
                warn!("session {}: origin rate for {} unavailable", self.id, currency);
                self.state = previous;
                return Err(e.into());
            }
        };

        let loan = amortize(&terms);
        info!(
            "session {}: computed {} in {}, payment {:.2}",
            self.id,
            terms,
            currency,
            loan.payment()
        );

        let computed = ComputedLoan {
            currency,
            origin_rate,
            loan,
        };
        self.state = SessionState::Computed(computed.clone());
        Ok(computed)
    }

    /// Re-express the computed loan in `target`.
    ///
    /// Fails with [`FxError::MissingOriginRate`] before any rate is fetched
    /// if no loan has been computed. Always rescales the unconverted loan,
    /// never a previous conversion.
    pub fn convert<P: RateProvider>(
        &mut self,
        target: &CurrencyCode,
        provider: &P,
    ) -> Result<ConvertedLoan, SessionError> {
        let computed = self
            .state
            .computed()
            .ok_or(FxError::MissingOriginRate)?
            .clone();

        let target_rate = provider.fetch_rate(target).map_err(|e| {
            warn!("session {}: target rate for {} unavailable", self.id, target);
            e
        })?;

        let ratio = RateRatio::between(&computed.origin_rate, &target_rate);
        let converted = computed.loan.convert(&ratio);
        info!(
            "session {}: converted {} -> {} at {}",
            self.id,
            computed.currency,
            target,
            ratio.value()
        );

        self.state = SessionState::Converted {
            computed,
            target_rate,
            converted: converted.clone(),
        };
        Ok(converted)
    }

    /// Forget any computed loan.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}
