use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// ISO 4217-style currency code.
///
/// Codes are normalized to trimmed upper case, so `" eur"` and `"EUR"`
/// name the same currency.
///
/// # Examples
///
/// ```
/// use loan_engine::core::currency::CurrencyCode;
///
/// let eur = CurrencyCode::new(" eur");
/// assert_eq!(eur.as_str(), "EUR");
/// assert_ne!(eur, CurrencyCode::new("USD"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Errors arising from exchange-rate lookups and conversions.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FxError {
    /// The rate provider had no usable quote for this currency.
    #[error("no exchange rate available for {currency}")]
    RateUnavailable { currency: CurrencyCode },
    /// A conversion was requested before any loan was computed in an origin currency.
    #[error("no origin exchange rate: calculate the loan before converting it")]
    MissingOriginRate,
    #[error("exchange rate must be positive and finite, got {rate} for {currency}")]
    InvalidRate { currency: CurrencyCode, rate: f64 },
    #[error("malformed exchange-rate payload: {0}")]
    MalformedRates(String),
}

/// A spot exchange rate: units of `currency` per one unit of the
/// reference currency, sampled at `fetched_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRate {
    currency: CurrencyCode,
    rate: f64,
    fetched_at: DateTime<Utc>,
}

impl ExchangeRate {
    /// Create a rate stamped with the current time.
    ///
    /// Rejects zero, negative and non-finite quotes.
    pub fn new(currency: CurrencyCode, rate: f64) -> Result<Self, FxError> {
        Self::at(currency, rate, Utc::now())
    }

    /// Create a rate with an explicit fetch timestamp.
    pub fn at(
        currency: CurrencyCode,
        rate: f64,
        fetched_at: DateTime<Utc>,
    ) -> Result<Self, FxError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxError::InvalidRate { currency, rate });
        }
        Ok(Self {
            currency,
            rate,
            fetched_at,
        })
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} per reference unit", self.rate, self.currency)
    }
}

/// Ratio of two exchange rates quoted against the same reference currency.
///
/// Multiplying an amount denominated in `origin` by the ratio re-expresses
/// it in `target`.
///
/// # Examples
///
/// ```
/// use loan_engine::core::currency::{CurrencyCode, ExchangeRate, RateRatio};
///
/// let usd = ExchangeRate::new(CurrencyCode::new("USD"), 1.0).unwrap();
/// let eur = ExchangeRate::new(CurrencyCode::new("EUR"), 0.92).unwrap();
///
/// let ratio = RateRatio::between(&usd, &eur);
/// assert_eq!(ratio.value(), 0.92);
/// assert_eq!(ratio.target().as_str(), "EUR");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRatio {
    origin: CurrencyCode,
    target: CurrencyCode,
    value: f64,
}

impl RateRatio {
    /// `target.rate / origin.rate`.
    pub fn between(origin: &ExchangeRate, target: &ExchangeRate) -> Self {
        Self {
            origin: origin.currency.clone(),
            target: target.currency.clone(),
            value: target.rate / origin.rate,
        }
    }

    pub fn origin(&self) -> &CurrencyCode {
        &self.origin
    }

    pub fn target(&self) -> &CurrencyCode {
        &self.target
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl fmt::Display for RateRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} = {}", self.target, self.origin, self.value)
    }
}
