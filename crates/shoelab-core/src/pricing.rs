//! # Pricing Module
//!
//! Computes a shoe's price and renders it for display.
//!
//! ## How a Price Is Built
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  BASE_PRICE                                          60                 │
//! │  + size          (9  → +5)                            5                 │
//! │  + brand         (1  SoleTech → +40)                 40                 │
//! │  + type          (10 Runner → +25)                   25                 │
//! │  + color         (20 Black → +0)                      0                 │
//! │  + cushion       (32 Air Pocket → +20)               20                 │
//! │  + cushionColor  (41 Neon Yellow → +8)                8                 │
//! │  + laceColor     (51 Black Contrast → +0)             0                 │
//! │  ─────────────────────────────────────────────────────────              │
//! │  total                                              158                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Amounts are whole currency units held in `i64`. There is no division
//! anywhere in the calculation, so there is nothing to round.
//!
//! ## Usage
//! ```rust
//! use shoelab_core::pricing::{compute_total, format_price, BASE_PRICE};
//! use shoelab_core::ShoeConfig;
//!
//! assert_eq!(compute_total(None), BASE_PRICE);
//!
//! let config = ShoeConfig {
//!     brand_id: Some(2),
//!     type_id: Some(12),
//!     ..ShoeConfig::default()
//! };
//! assert_eq!(compute_total(Some(&config)), 60 + 30 + 15);
//! assert_eq!(format_price(105, "USD", "en-US"), "$105.00");
//! ```

use crate::catalog::OptionFamily;
use crate::error::FormatError;
use crate::types::ShoeConfig;

/// Starting price of every shoe before option deltas.
pub const BASE_PRICE: i64 = 60;

/// Default display currency.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Default display locale.
pub const DEFAULT_LOCALE: &str = "en-US";

// =============================================================================
// Total
// =============================================================================

/// Computes the total price of a configuration.
///
/// - `None` prices as the base price alone.
/// - Missing or unknown ids add nothing.
pub fn compute_total(config: Option<&ShoeConfig>) -> i64 {
    let Some(config) = config else {
        return BASE_PRICE;
    };

    BASE_PRICE
        + OptionFamily::ALL
            .into_iter()
            .map(|family| {
                config
                    .selected(family)
                    .map_or(0, |id| family.price_of(id))
            })
            .sum::<i64>()
}

// =============================================================================
// Formatting
// =============================================================================

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SymbolPosition {
    /// `$1,234.00`
    Prefix,
    /// `1.234,00 €` (separated by a no-break space)
    Suffix,
}

/// Number conventions of a supported locale.
#[derive(Debug, Clone, Copy)]
struct LocaleRules {
    tag: &'static str,
    group: &'static str,
    decimal: &'static str,
    position: SymbolPosition,
}

/// Symbol and minor-unit digits of a supported currency.
#[derive(Debug, Clone, Copy)]
struct CurrencyRules {
    code: &'static str,
    symbol: &'static str,
    minor_digits: usize,
}

const NBSP: &str = "\u{a0}";
const NARROW_NBSP: &str = "\u{202f}";

const LOCALES: &[LocaleRules] = &[
    LocaleRules { tag: "en-US", group: ",", decimal: ".", position: SymbolPosition::Prefix },
    LocaleRules { tag: "en-GB", group: ",", decimal: ".", position: SymbolPosition::Prefix },
    LocaleRules { tag: "en-CA", group: ",", decimal: ".", position: SymbolPosition::Prefix },
    LocaleRules { tag: "de-DE", group: ".", decimal: ",", position: SymbolPosition::Suffix },
    LocaleRules { tag: "fr-FR", group: NARROW_NBSP, decimal: ",", position: SymbolPosition::Suffix },
    LocaleRules { tag: "es-ES", group: ".", decimal: ",", position: SymbolPosition::Suffix },
    LocaleRules { tag: "ja-JP", group: ",", decimal: ".", position: SymbolPosition::Prefix },
];

const CURRENCIES: &[CurrencyRules] = &[
    CurrencyRules { code: "USD", symbol: "$", minor_digits: 2 },
    CurrencyRules { code: "EUR", symbol: "€", minor_digits: 2 },
    CurrencyRules { code: "GBP", symbol: "£", minor_digits: 2 },
    CurrencyRules { code: "CAD", symbol: "CA$", minor_digits: 2 },
    CurrencyRules { code: "JPY", symbol: "¥", minor_digits: 0 },
];

/// Symbols that differ from [`CURRENCIES`] in a given locale, as CLDR has
/// them. This covers only the supported locales and currencies, not the
/// whole of CLDR. Any pair not listed uses the currency's default symbol.
const LOCAL_SYMBOLS: &[(&str, &str, &str)] = &[
    ("en-GB", "USD", "US$"),
    ("en-GB", "JPY", "JP¥"),
    ("en-CA", "USD", "US$"),
    ("en-CA", "CAD", "$"),
    ("en-CA", "JPY", "JP¥"),
    ("fr-FR", "USD", "$US"),
    ("fr-FR", "CAD", "$CA"),
    ("fr-FR", "GBP", "£GB"),
    ("es-ES", "USD", "US$"),
    ("ja-JP", "JPY", "￥"),
];

fn symbol_for(locale: &LocaleRules, currency: &CurrencyRules) -> &'static str {
    LOCAL_SYMBOLS
        .iter()
        .find(|(tag, code, _)| *tag == locale.tag && *code == currency.code)
        .map_or(currency.symbol, |(_, _, symbol)| *symbol)
}

fn locale_rules(locale: &str) -> Option<&'static LocaleRules> {
    let normalized = locale.trim().replace('_', "-");
    LOCALES
        .iter()
        .find(|rules| rules.tag.eq_ignore_ascii_case(&normalized))
}

fn currency_rules(currency: &str) -> Option<&'static CurrencyRules> {
    let currency = currency.trim();
    CURRENCIES
        .iter()
        .find(|rules| rules.code.eq_ignore_ascii_case(currency))
}

/// Inserts the locale's group separator every three digits.
fn group_digits(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats an amount as a localized currency string.
///
/// ## Errors
/// - [`FormatError::UnsupportedLocale`] if the locale has no rules here
/// - [`FormatError::UnsupportedCurrency`] if the currency has no rules here
///
/// ## Example
/// ```rust
/// use shoelab_core::pricing::try_format_price;
///
/// assert_eq!(try_format_price(1234, "USD", "en-US").unwrap(), "$1,234.00");
/// assert_eq!(try_format_price(158, "EUR", "de-DE").unwrap(), "158,00\u{a0}€");
/// assert!(try_format_price(158, "USD", "xx-XX").is_err());
/// ```
pub fn try_format_price(amount: i64, currency: &str, locale: &str) -> Result<String, FormatError> {
    let locale_rules =
        locale_rules(locale).ok_or_else(|| FormatError::UnsupportedLocale(locale.to_string()))?;
    let currency_rules = currency_rules(currency)
        .ok_or_else(|| FormatError::UnsupportedCurrency(currency.to_string()))?;

    let sign = if amount < 0 { "-" } else { "" };
    let mut number = group_digits(&amount.unsigned_abs().to_string(), locale_rules.group);
    if currency_rules.minor_digits > 0 {
        number.push_str(locale_rules.decimal);
        number.push_str(&"0".repeat(currency_rules.minor_digits));
    }

    let symbol = symbol_for(locale_rules, currency_rules);
    let formatted = match locale_rules.position {
        SymbolPosition::Prefix => format!("{}{}{}", sign, symbol, number),
        SymbolPosition::Suffix => format!("{}{}{}{}", sign, number, NBSP, symbol),
    };

    Ok(formatted)
}

/// Formats an amount for display, never failing.
///
/// Falls back to a fixed `$<amount>.00` rendering when the currency/locale
/// combination is not supported.
///
/// ## Example
/// ```rust
/// use shoelab_core::pricing::format_price;
///
/// assert_eq!(format_price(158, "USD", "en-US"), "$158.00");
/// assert_eq!(format_price(158, "XYZ", "en-US"), "$158.00");
/// ```
pub fn format_price(amount: i64, currency: &str, locale: &str) -> String {
    try_format_price(amount, currency, locale).unwrap_or_else(|_| fallback_format(amount))
}

/// Formats with the default currency and locale (USD, en-US).
pub fn format_default(amount: i64) -> String {
    format_price(amount, DEFAULT_CURRENCY, DEFAULT_LOCALE)
}

fn fallback_format(amount: i64) -> String {
    format!("${}.00", amount)
}

// =============================================================================
// Unit Tests
// =============================================================================
