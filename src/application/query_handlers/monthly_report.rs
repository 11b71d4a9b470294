// Monthly cost report query handler.
//
// Purpose
// - Combine a user's entries for one calendar month with the cost formula and currency rendering.
//
// Responsibilities
// - Resolve the user (NotFound otherwise) and fetch the period's entries in store order.
// - Pick the report currency: the requested one, else the one tied to the user's language.
// - Compute cost in the base currency, convert it, then format it with the currency's locale.
// - Never write. Each call builds a fresh report.

use crate::application::command_handlers::time_entry_lifecycle::validate_month;
use crate::application::errors::ApplicationError;
use crate::core::cost::calculator::{CostCalculator, CostError, QuantityPricing, sum_hours};
use crate::core::cost::currency::{Currency, CurrencyFormatter};
use crate::core::cost::rate_config::RateConfig;
use crate::core::ports::{EntryStore, TaskDirectory, UserDirectory};
use crate::core::project::Task;
use crate::core::time_entry::model::TimeEntry;
use crate::core::user::User;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::sync::Arc;

pub const RATE_SOURCE: &str = "config";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotals {
    pub total_hours: Decimal,
    /// In the report currency.
    pub total_cost: Decimal,
    pub formatted_cost: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateInfo {
    pub pln_to_uah_rate: Decimal,
    pub source: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub user_id: String,
    pub year: i32,
    pub month: u32,
    pub entries: Vec<TimeEntry>,
    pub totals: ReportTotals,
    pub currency: Currency,
    pub rate_info: RateInfo,
}

pub struct ReportEngine<TEntryStore, TUsers, TTasks>
where
    TEntryStore: EntryStore + 'static,
    TUsers: UserDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    entries: Arc<TEntryStore>,
    users: Arc<TUsers>,
    tasks: Arc<TTasks>,
    rates: Arc<RateConfig>,
    calculator: CostCalculator,
    formatter: CurrencyFormatter,
}

impl<TEntryStore, TUsers, TTasks> ReportEngine<TEntryStore, TUsers, TTasks>
where
    TEntryStore: EntryStore + 'static,
    TUsers: UserDirectory + 'static,
    TTasks: TaskDirectory + 'static,
{
    pub fn new(entries: Arc<TEntryStore>, users: Arc<TUsers>, tasks: Arc<TTasks>, rates: Arc<RateConfig>) -> Self {
        Self {
            entries,
            users,
            tasks,
            calculator: CostCalculator::new(&rates),
            formatter: CurrencyFormatter::new(rates.clone()),
            rates,
        }
    }

    pub fn with_quantity_pricing(mut self, quantity_pricing: Arc<dyn QuantityPricing>) -> Self {
        self.calculator = CostCalculator::with_quantity_pricing(&self.rates, quantity_pricing);
        self
    }

    /// Without a requested currency the report follows the user's language.
    pub async fn generate_monthly_report(
        &self,
        user_id: &str,
        year: i32,
        month: u32,
        currency: Option<Currency>,
    ) -> Result<MonthlyReport, ApplicationError> {
        validate_month(month)?;
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApplicationError::NotFound(format!("user {user_id}")))?;
        let currency = currency.unwrap_or_else(|| self.rates.currency_for(user.language));
        let entries = self
            .entries
            .find_by_user_and_period(user_id, year, month)
            .await
            .inspect_err(|error| tracing::error!(%error, user_id, "failed to load report entries"))?;
        let tasks = self.unit_tasks(&entries).await?;

        let (total_hours, total_cost) = self
            .cost_in(&user, &entries, &tasks, currency)
            .inspect_err(|reason| tracing::warn!(%reason, user_id, year, month, "monthly report not computable"))?;
        let formatted_cost = self.formatter.format_in(total_cost, currency);

        tracing::debug!(
            user_id,
            year,
            month,
            %currency,
            entries = entries.len(),
            %total_hours,
            "monthly report generated"
        );

        Ok(MonthlyReport {
            user_id: user.id,
            year,
            month,
            entries,
            totals: ReportTotals {
                total_hours,
                total_cost,
                formatted_cost,
            },
            currency,
            rate_info: RateInfo {
                pln_to_uah_rate: self.rates.pln_to_uah(),
                source: RATE_SOURCE.to_string(),
                updated_at: Utc::now(),
            },
        })
    }

    fn cost_in(
        &self,
        user: &User,
        entries: &[TimeEntry],
        tasks: &[Task],
        currency: Currency,
    ) -> Result<(Decimal, Decimal), CostError> {
        let total_hours = sum_hours(entries)?;
        let cost = self.calculator.compute_cost_with_tasks(user, entries, tasks)?;
        Ok((total_hours, self.formatter.convert(cost.total_cost, currency)?))
    }

    /// Tasks named by unit billed entries. Deleted tasks are skipped.
    async fn unit_tasks(&self, entries: &[TimeEntry]) -> Result<Vec<Task>, ApplicationError> {
        let mut tasks: Vec<Task> = Vec::new();
        let task_ids = entries
            .iter()
            .filter(|entry| entry.quantity.is_some())
            .filter_map(|entry| entry.task_id.as_deref());
        for task_id in task_ids {
            if tasks.iter().any(|task| task.id == task_id) {
                continue;
            }
            if let Some(task) = self.tasks.find_by_id(task_id).await? {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }
}
