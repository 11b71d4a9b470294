// Configured rates, fixed at process start and shared read-only across requests.

use crate::core::cost::currency::Currency;
use crate::core::user::Language;
use rust_decimal::Decimal;
use thiserror::Error;

pub const DEFAULT_MONTHLY_HOURS: u32 = 160;

/// PLN per USD. A placeholder, not a live quote.
pub fn usd_placeholder_divisor() -> Decimal {
    Decimal::new(40, 1)
}

pub fn default_pln_to_uah() -> Decimal {
    Decimal::new(105, 1)
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RateConfigError {
    #[error("PLN to UAH rate must be positive, got {0}")]
    NonPositiveUahRate(Decimal),

    #[error("monthly hours must be positive")]
    ZeroMonthlyHours,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateConfig {
    pln_to_uah: Decimal,
    monthly_hours: u32,
    default_currency: Currency,
}

impl RateConfig {
    pub fn new(
        pln_to_uah: Decimal,
        monthly_hours: u32,
        default_currency: Currency,
    ) -> Result<Self, RateConfigError> {
        if pln_to_uah <= Decimal::ZERO {
            return Err(RateConfigError::NonPositiveUahRate(pln_to_uah));
        }
        if monthly_hours == 0 {
            return Err(RateConfigError::ZeroMonthlyHours);
        }
        Ok(Self {
            pln_to_uah,
            monthly_hours,
            default_currency,
        })
    }

    pub fn pln_to_uah(&self) -> Decimal {
        self.pln_to_uah
    }

    pub fn monthly_hours(&self) -> u32 {
        self.monthly_hours
    }

    pub fn default_currency(&self) -> Currency {
        self.default_currency
    }

    /// Report currency for a user who asked for none. PL falls back to the configured default.
    pub fn currency_for(&self, language: Language) -> Currency {
        match language {
            Language::Ua => Currency::Uah,
            Language::En => Currency::Usd,
            Language::Pl => self.default_currency,
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            pln_to_uah: default_pln_to_uah(),
            monthly_hours: DEFAULT_MONTHLY_HOURS,
            default_currency: Currency::Pln,
        }
    }
}
