// Currency conversion from the base currency and locale specific rendering.
//
// Locale profiles
// - PL: "1 234,56 zł"  (space grouping, comma decimal, suffix)
// - UA: "1 234,56 ₴"   (space grouping, comma decimal, suffix)
// - EN: "$1,234.56"    (comma grouping, dot decimal, prefix)
//
// Rounding
// - Converted amounts are rounded to 2 decimals half up.
// - Rendering always shows exactly 2 fractional digits.

use crate::core::cost::calculator::CostError;
use crate::core::cost::rate_config::{RateConfig, usd_placeholder_divisor};
use crate::core::user::Language;
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Currency {
    /// Base currency, costs are computed in it.
    #[default]
    Pln,
    Uah,
    Usd,
}
crate::string_enum!(Currency, "currency", { Pln => "PLN", Uah => "UAH", Usd => "USD" });

impl Currency {
    /// Locale used to render amounts in this currency.
    pub fn language(&self) -> Language {
        match self {
            Currency::Uah => Language::Ua,
            Currency::Usd => Language::En,
            Currency::Pln => Language::Pl,
        }
    }
}

struct LocaleProfile {
    grouping: char,
    decimal: char,
    symbol: &'static str,
    symbol_first: bool,
}

impl LocaleProfile {
    fn for_language(language: Language) -> Self {
        match language {
            Language::Pl => Self {
                grouping: ' ',
                decimal: ',',
                symbol: " zł",
                symbol_first: false,
            },
            Language::Ua => Self {
                grouping: ' ',
                decimal: ',',
                symbol: " ₴",
                symbol_first: false,
            },
            Language::En => Self {
                grouping: ',',
                decimal: '.',
                symbol: "$",
                symbol_first: true,
            },
        }
    }
}

pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[derive(Debug, Clone)]
pub struct CurrencyFormatter {
    rates: Arc<RateConfig>,
}

impl CurrencyFormatter {
    pub fn new(rates: Arc<RateConfig>) -> Self {
        Self { rates }
    }

    pub fn convert(&self, amount: Decimal, target: Currency) -> Result<Decimal, CostError> {
        let converted = match target {
            Currency::Pln => Some(amount),
            Currency::Uah => amount.checked_mul(self.rates.pln_to_uah()).map(round_money),
            Currency::Usd => amount.checked_div(usd_placeholder_divisor()).map(round_money),
        };
        converted.ok_or(CostError::Overflow("converted amount"))
    }

    pub fn format(&self, amount: Decimal, language: Language) -> String {
        format_amount(amount, language)
    }

    pub fn format_in(&self, amount: Decimal, currency: Currency) -> String {
        format_amount(amount, currency.language())
    }
}

pub fn format_amount(amount: Decimal, language: Language) -> String {
    let profile = LocaleProfile::for_language(language);
    let rounded = round_money(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let mut magnitude = rounded.abs();
    magnitude.rescale(2);
    let digits = magnitude.to_string();
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let number = format!(
        "{}{}{}",
        group_thousands(whole, profile.grouping),
        profile.decimal,
        fraction
    );
    if profile.symbol_first {
        format!("{sign}{}{number}", profile.symbol)
    } else {
        format!("{sign}{number}{}", profile.symbol)
    }
}

fn group_thousands(whole: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }
    grouped
}
