//! Converts monetary amounts between currencies using a static rate table.
//!
//! Rates are held in memory and seeded with a fixed default table; there is
//! no live rate fetching. Conversion never fails: when no rate is known for a
//! currency pair the amount is passed through unchanged with a rate of 1.0,
//! so a missing rate shows up in the data rather than aborting a request.

use std::collections::HashMap;

use serde::Serialize;

/// A currency known to the application.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Currency {
    /// The ISO 4217 currency code, e.g. "USD".
    pub code: String,
    /// The human readable name of the currency.
    pub name: String,
    /// The symbol used when displaying amounts.
    pub symbol: String,
    /// Whether amounts default to this currency when none is specified.
    pub is_default: bool,
}

/// The built-in currency catalogue.
pub fn default_currencies() -> Vec<Currency> {
    vec![
        Currency {
            code: "USD".to_owned(),
            name: "US Dollar".to_owned(),
            symbol: "$".to_owned(),
            is_default: true,
        },
        Currency {
            code: "EUR".to_owned(),
            name: "Euro".to_owned(),
            symbol: "€".to_owned(),
            is_default: false,
        },
        Currency {
            code: "MKD".to_owned(),
            name: "Macedonian Denar".to_owned(),
            symbol: "ден".to_owned(),
            is_default: false,
        },
    ]
}

/// The result of converting an amount between two currencies.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Conversion {
    /// The amount before conversion.
    pub original_amount: f64,
    /// The currency code of the original amount.
    pub original_currency: String,
    /// The amount after conversion.
    pub converted_amount: f64,
    /// The currency code of the converted amount.
    pub converted_currency: String,
    /// The exchange rate the conversion used.
    pub rate: f64,
}

/// Converts amounts between currencies.
///
/// [CurrencyConverter::default] seeds the converter with approximate rates
/// between USD, EUR and MKD. Use [CurrencyConverter::set_rate] to override a
/// rate or add a new currency pair.
#[derive(Clone, Debug)]
pub struct CurrencyConverter {
    rates: HashMap<String, HashMap<String, f64>>,
}

impl Default for CurrencyConverter {
    fn default() -> Self {
        let mut converter = Self {
            rates: HashMap::new(),
        };

        converter.set_rate("USD", "EUR", 0.92);
        converter.set_rate("USD", "MKD", 56.80);
        converter.set_rate("EUR", "USD", 1.09);
        converter.set_rate("EUR", "MKD", 61.50);
        converter.set_rate("MKD", "USD", 0.0176);
        converter.set_rate("MKD", "EUR", 0.0163);

        converter
    }
}

impl CurrencyConverter {
    /// Create a converter with no rates.
    ///
    /// Every conversion through an empty converter passes the amount through
    /// unchanged. Most callers want [CurrencyConverter::default] instead.
    pub fn new() -> Self {
        Self {
            rates: HashMap::new(),
        }
    }

    /// Set the exchange rate from one currency to another.
    ///
    /// The reverse rate is not inferred; set it separately if needed.
    pub fn set_rate(&mut self, from_currency: &str, to_currency: &str, rate: f64) {
        self.rates
            .entry(from_currency.to_owned())
            .or_default()
            .insert(to_currency.to_owned(), rate);
    }

    /// The exchange rate directly stored for a currency pair, if any.
    pub fn rate(&self, from_currency: &str, to_currency: &str) -> Option<f64> {
        self.rates
            .get(from_currency)
            .and_then(|rates| rates.get(to_currency))
            .copied()
    }

    /// Convert `amount` from one currency to another.
    ///
    /// The rate is resolved in order of preference:
    /// 1. a rate of 1.0 when both currencies are the same,
    /// 2. the directly stored rate for the pair,
    /// 3. a rate composed by pivoting through USD, where either leg without a
    ///    stored rate contributes 1.0.
    ///
    /// With no stored rate on either leg the amount passes through unchanged.
    pub fn convert(&self, amount: f64, from_currency: &str, to_currency: &str) -> Conversion {
        let rate = if from_currency == to_currency {
            1.0
        } else if let Some(rate) = self.rate(from_currency, to_currency) {
            rate
        } else {
            let to_usd = if from_currency == "USD" {
                1.0
            } else {
                self.rate(from_currency, "USD").unwrap_or(1.0)
            };
            let from_usd = if to_currency == "USD" {
                1.0
            } else {
                self.rate("USD", to_currency).unwrap_or(1.0)
            };

            to_usd * from_usd
        };

        Conversion {
            original_amount: amount,
            original_currency: from_currency.to_owned(),
            converted_amount: amount * rate,
            converted_currency: to_currency.to_owned(),
            rate,
        }
    }
}
