use crate::core::currency::{CurrencyCode, ExchangeRate, FxError};
use chrono::{DateTime, Utc};
use log::warn;
use serde::Deserialize;
use std::collections::HashMap;

/// Source of spot exchange rates quoted against a common reference currency.
///
/// Implementations report every failure (unknown code, transport error,
/// malformed response) as [`FxError::RateUnavailable`]; callers never branch
/// on the cause.
pub trait RateProvider {
    fn fetch_rate(&self, currency: &CurrencyCode) -> Result<ExchangeRate, FxError>;
}

impl<P: RateProvider + ?Sized> RateProvider for &P {
    fn fetch_rate(&self, currency: &CurrencyCode) -> Result<ExchangeRate, FxError> {
        (**self).fetch_rate(currency)
    }
}

/// Wire shape of a "latest rates" response: quotes per one unit of `base_code`.
#[derive(Deserialize)]
struct LatestRatesPayload {
    #[serde(default)]
    base_code: Option<String>,
    conversion_rates: Option<HashMap<String, f64>>,
}

/// In-memory rate table, all quotes against one base currency.
///
/// The base currency always quotes 1.0. Tables can be filled by hand or
/// loaded from a saved "latest rates" JSON response.
///
/// # Examples
///
/// ```
/// use loan_engine::conversion::provider::{RateProvider, StaticRateTable};
/// use loan_engine::core::currency::CurrencyCode;
///
/// let table = StaticRateTable::from_json_str(
///     r#"{"base_code": "USD", "conversion_rates": {"USD": 1, "EUR": 0.92}}"#,
/// ).unwrap();
///
/// let eur = table.fetch_rate(&CurrencyCode::new("eur")).unwrap();
/// assert_eq!(eur.rate(), 0.92);
/// assert!(table.fetch_rate(&CurrencyCode::new("XYZ")).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct StaticRateTable {
    /// The reference currency all quotes are expressed against.
    pub base_currency: CurrencyCode,
    rates: HashMap<CurrencyCode, f64>,
    /// Timestamp stamped onto every rate this table hands out.
    as_of: DateTime<Utc>,
}

impl StaticRateTable {
    pub fn new(base_currency: CurrencyCode) -> Self {
        Self {
            base_currency,
            rates: HashMap::new(),
            as_of: Utc::now(),
        }
    }

    /// Set the quote for `currency`: 1 unit of the base buys `rate` units.
    pub fn set_rate(&mut self, currency: CurrencyCode, rate: f64) -> Result<(), FxError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(FxError::InvalidRate { currency, rate });
        }
        self.rates.insert(currency, rate);
        Ok(())
    }

    /// Load a table from a "latest rates" payload.
    ///
    /// `base_code` defaults to USD when absent. A payload without
    /// `conversion_rates` is rejected.
    pub fn from_json_str(json: &str) -> Result<Self, FxError> {
        let payload: LatestRatesPayload =
            serde_json::from_str(json).map_err(|e| FxError::MalformedRates(e.to_string()))?;
        let rates = payload
            .conversion_rates
            .ok_or_else(|| FxError::MalformedRates("conversion rates not found".to_string()))?;

        let base = CurrencyCode::new(payload.base_code.as_deref().unwrap_or("USD"));
        let mut table = Self::new(base);
        for (code, rate) in rates {
            table.set_rate(CurrencyCode::new(code), rate)?;
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateProvider for StaticRateTable {
    fn fetch_rate(&self, currency: &CurrencyCode) -> Result<ExchangeRate, FxError> {
        let rate = match self.rates.get(currency) {
            Some(rate) => *rate,
            None if *currency == self.base_currency => 1.0,
            None => {
                warn!("no rate for {} against {}", currency, self.base_currency);
                return Err(FxError::RateUnavailable {
                    currency: currency.clone(),
                });
            }
        };
        ExchangeRate::at(currency.clone(), rate, self.as_of).map_err(|_| {
            FxError::RateUnavailable {
                currency: currency.clone(),
            }
        })
    }
}
