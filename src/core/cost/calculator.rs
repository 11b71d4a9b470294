// Contract specific labour cost in the base currency.
//
// Formula
// - UOP: hourly rate = gross monthly rate / monthly hours, rounded to 2 decimals half up FIRST,
//   then total cost = total hours * hourly rate.
// - B2B: total cost = total hours * hourly net rate.
// - Missing rate for the contract type: zero.
//
// Unit billed entries add no hours. Their cost goes through QuantityPricing, which
// contributes nothing by default.
//
// Every sum and product is checked. Amounts beyond the decimal range surface as CostError.

use crate::core::cost::currency::round_money;
use crate::core::cost::rate_config::RateConfig;
use crate::core::project::Task;
use crate::core::time_entry::model::TimeEntry;
use crate::core::user::{ContractType, User};
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum CostError {
    #[error("{0} is too large to compute")]
    Overflow(&'static str),
}

/// Prices entries that report a quantity instead of hours.
///
/// `task` is the entry's task when it names one that still exists.
pub trait QuantityPricing: Send + Sync {
    fn cost_of(&self, entry: &TimeEntry, task: Option<&Task>) -> Result<Decimal, CostError>;
}

/// Leaves unit billed entries out of the total.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcludeUnitEntries;

impl QuantityPricing for ExcludeUnitEntries {
    fn cost_of(&self, _entry: &TimeEntry, _task: Option<&Task>) -> Result<Decimal, CostError> {
        Ok(Decimal::ZERO)
    }
}

/// quantity * task unit price. Entries without a priced task cost nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskUnitPrice;

impl QuantityPricing for TaskUnitPrice {
    fn cost_of(&self, entry: &TimeEntry, task: Option<&Task>) -> Result<Decimal, CostError> {
        match (entry.quantity, task.and_then(|t| t.unit_price)) {
            (Some(quantity), Some(price)) => quantity
                .checked_mul(price)
                .ok_or(CostError::Overflow("unit cost")),
            _ => Ok(Decimal::ZERO),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostBreakdown {
    pub total_hours: Decimal,
    pub total_cost: Decimal,
}

pub fn sum_hours(entries: &[TimeEntry]) -> Result<Decimal, CostError> {
    entries
        .iter()
        .map(TimeEntry::billable_hours)
        .try_fold(Decimal::ZERO, |sum, hours| {
            sum.checked_add(hours).ok_or(CostError::Overflow("total hours"))
        })
}

#[derive(Clone)]
pub struct CostCalculator {
    monthly_hours: Decimal,
    quantity_pricing: Arc<dyn QuantityPricing>,
}

impl CostCalculator {
    pub fn new(rates: &RateConfig) -> Self {
        Self::with_quantity_pricing(rates, Arc::new(ExcludeUnitEntries))
    }

    pub fn with_quantity_pricing(rates: &RateConfig, quantity_pricing: Arc<dyn QuantityPricing>) -> Self {
        Self {
            monthly_hours: Decimal::from(rates.monthly_hours()),
            quantity_pricing,
        }
    }

    pub fn hourly_rate(&self, user: &User) -> Option<Decimal> {
        match user.contract_type {
            ContractType::Uop => user
                .uop_gross_rate
                .and_then(|gross| gross.checked_div(self.monthly_hours))
                .map(round_money),
            ContractType::B2b => user.b2b_hourly_net_rate,
        }
    }

    pub fn compute_cost(&self, user: &User, entries: &[TimeEntry]) -> Result<CostBreakdown, CostError> {
        self.compute_cost_with_tasks(user, entries, &[])
    }

    /// Like `compute_cost`, handing each unit entry its task from `tasks` for pricing.
    pub fn compute_cost_with_tasks(
        &self,
        user: &User,
        entries: &[TimeEntry],
        tasks: &[Task],
    ) -> Result<CostBreakdown, CostError> {
        let total_hours = sum_hours(entries)?;
        let labour = match self.hourly_rate(user) {
            Some(rate) => total_hours
                .checked_mul(rate)
                .ok_or(CostError::Overflow("labour cost"))?,
            None => Decimal::ZERO,
        };
        let units = entries
            .iter()
            .filter(|entry| entry.quantity.is_some())
            .try_fold(Decimal::ZERO, |sum, entry| {
                let task = entry
                    .task_id
                    .as_deref()
                    .and_then(|id| tasks.iter().find(|task| task.id == id));
                let cost = self.quantity_pricing.cost_of(entry, task)?;
                sum.checked_add(cost).ok_or(CostError::Overflow("unit cost"))
            })?;
        let total_cost = labour
            .checked_add(units)
            .ok_or(CostError::Overflow("total cost"))?;
        Ok(CostBreakdown {
            total_hours,
            total_cost,
        })
    }
}
