// Projects and tasks as seen by time entry validation and the task catalog.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    /// Full project number, for example "20031-00".
    pub number: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BillingMode {
    #[default]
    Hourly,
    Unit,
}
crate::string_enum!(BillingMode, "billing mode", { Hourly => "HOURLY", Unit => "UNIT" });

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub number: String,
    #[serde(default)]
    pub billing_mode: BillingMode,
    #[serde(default)]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub unit_name: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum BillingError {
    #[error("unit price is required for unit billed tasks")]
    MissingUnitPrice,

    #[error("unit price must be positive")]
    NonPositiveUnitPrice,

    #[error("unit name is required for unit billed tasks")]
    MissingUnitName,
}

impl Task {
    /// Unit tasks must be fully priced; hourly tasks carry no unit pricing at all.
    pub fn normalize_billing(mut self) -> Result<Self, BillingError> {
        match self.billing_mode {
            BillingMode::Hourly => {
                self.unit_price = None;
                self.unit_name = None;
            }
            BillingMode::Unit => {
                let price = self.unit_price.ok_or(BillingError::MissingUnitPrice)?;
                if price <= Decimal::ZERO {
                    return Err(BillingError::NonPositiveUnitPrice);
                }
                let name = self
                    .unit_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .ok_or(BillingError::MissingUnitName)?;
                self.unit_name = Some(name.to_string());
            }
        }
        Ok(self)
    }
}
