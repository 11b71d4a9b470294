// Shared test fixtures and builders.
// Compiled only for tests via `src/lib.rs`, exposed as `crate::test_support::fixtures`.

use crate::application::identity::Identity;
use crate::core::project::{BillingMode, Project, Task};
use crate::core::time_entry::decider::create::command::CreateTimeEntry;
use crate::core::time_entry::model::{EntryStatus, TimeEntry};
use crate::core::user::{ContractType, Language, Role, User};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 31, 17, 0, 0).unwrap()
}

pub fn on(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn manager() -> Identity {
    Identity::new("marek", Role::Manager)
}

pub struct CreateTimeEntryBuilder {
    inner: CreateTimeEntry,
}

impl Default for CreateTimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl CreateTimeEntryBuilder {
    pub fn new() -> Self {
        let inner: CreateTimeEntry =
            serde_json::from_str(include_str!("json/create_time_entry.json")).unwrap();
        Self { inner }
    }

    pub fn user_id(mut self, v: Option<&str>) -> Self {
        self.inner.user_id = v.map(str::to_string);
        self
    }

    pub fn project_id(mut self, v: Option<&str>) -> Self {
        self.inner.project_id = v.map(str::to_string);
        self
    }

    pub fn task_id(mut self, v: Option<&str>) -> Self {
        self.inner.task_id = v.map(str::to_string);
        self
    }

    pub fn date(mut self, v: Option<NaiveDate>) -> Self {
        self.inner.date = v;
        self
    }

    pub fn total_hours(mut self, v: Option<Decimal>) -> Self {
        self.inner.total_hours = v;
        self
    }

    pub fn quantity(mut self, v: Option<Decimal>) -> Self {
        self.inner.quantity = v;
        self
    }

    pub fn hours_range(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.inner.hours_from = Some(from);
        self.inner.hours_to = Some(to);
        self
    }

    pub fn description(mut self, v: impl Into<String>) -> Self {
        self.inner.description = Some(v.into());
        self
    }

    pub fn build(self) -> CreateTimeEntry {
        self.inner
    }
}

pub struct TimeEntryBuilder {
    inner: TimeEntry,
}

impl Default for TimeEntryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TimeEntryBuilder {
    pub fn new() -> Self {
        Self {
            inner: TimeEntry {
                id: "te-fixed-0001".to_string(),
                user_id: "user-fixed-0001".to_string(),
                project_id: Some("project-fixed-0001".to_string()),
                subproject_id: None,
                task_id: None,
                date: on(2025, 3, 14),
                total_hours: Some(dec!(7.5)),
                quantity: None,
                description: Some("Site survey".to_string()),
                status: EntryStatus::Submitted,
                approved_by: None,
                approved_at: None,
                created_at: fixed_now(),
                updated_at: fixed_now(),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn user_id(mut self, v: impl Into<String>) -> Self {
        self.inner.user_id = v.into();
        self
    }

    pub fn task_id(mut self, v: Option<&str>) -> Self {
        self.inner.task_id = v.map(str::to_string);
        self
    }

    pub fn date(mut self, v: NaiveDate) -> Self {
        self.inner.date = v;
        self
    }

    pub fn total_hours(mut self, v: Option<Decimal>) -> Self {
        self.inner.total_hours = v;
        self
    }

    pub fn quantity(mut self, v: Option<Decimal>) -> Self {
        self.inner.quantity = v;
        self
    }

    pub fn status(mut self, v: EntryStatus) -> Self {
        self.inner.status = v;
        self
    }

    pub fn build(self) -> TimeEntry {
        self.inner
    }
}

pub struct ProjectBuilder {
    inner: Project,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            inner: Project {
                id: "project-fixed-0001".to_string(),
                name: "Bridge inspection".to_string(),
                number: "20031-00".to_string(),
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn number(mut self, v: impl Into<String>) -> Self {
        self.inner.number = v.into();
        self
    }

    pub fn build(self) -> Project {
        self.inner
    }
}

pub struct TaskBuilder {
    inner: Task,
}

impl Default for TaskBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TaskBuilder {
    pub fn new() -> Self {
        Self {
            inner: Task {
                id: "task-fixed-0001".to_string(),
                project_id: "project-fixed-0001".to_string(),
                title: "Field measurements".to_string(),
                description: None,
                number: "20031-A1".to_string(),
                billing_mode: BillingMode::Hourly,
                unit_price: None,
                unit_name: None,
                active: true,
            },
        }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn project_id(mut self, v: impl Into<String>) -> Self {
        self.inner.project_id = v.into();
        self
    }

    pub fn number(mut self, v: impl Into<String>) -> Self {
        self.inner.number = v.into();
        self
    }

    pub fn billing_mode(mut self, v: BillingMode) -> Self {
        if v == BillingMode::Unit {
            self.inner.unit_price = Some(dec!(25));
            self.inner.unit_name = Some("drawing".to_string());
        }
        self.inner.billing_mode = v;
        self
    }

    pub fn build(self) -> Task {
        self.inner
    }
}

pub struct UserBuilder {
    inner: User,
}

#[allow(dead_code)]
impl UserBuilder {
    fn base(contract_type: ContractType) -> User {
        User {
            id: "user-fixed-0001".to_string(),
            username: "anna".to_string(),
            role: Role::Employee,
            contract_type,
            uop_gross_rate: None,
            b2b_hourly_net_rate: None,
            language: Language::Pl,
        }
    }

    pub fn uop(gross_monthly: Decimal) -> Self {
        let mut inner = Self::base(ContractType::Uop);
        inner.uop_gross_rate = Some(gross_monthly);
        Self { inner }
    }

    pub fn b2b(hourly_net: Decimal) -> Self {
        let mut inner = Self::base(ContractType::B2b);
        inner.b2b_hourly_net_rate = Some(hourly_net);
        Self { inner }
    }

    pub fn id(mut self, v: impl Into<String>) -> Self {
        self.inner.id = v.into();
        self
    }

    pub fn username(mut self, v: impl Into<String>) -> Self {
        self.inner.username = v.into();
        self
    }

    pub fn role(mut self, v: Role) -> Self {
        self.inner.role = v;
        self
    }

    pub fn language(mut self, v: Language) -> Self {
        self.inner.language = v;
        self
    }

    pub fn uop_gross_rate(mut self, v: Option<Decimal>) -> Self {
        self.inner.uop_gross_rate = v;
        self
    }

    pub fn b2b_hourly_net_rate(mut self, v: Option<Decimal>) -> Self {
        self.inner.b2b_hourly_net_rate = v;
        self
    }

    pub fn build(self) -> User {
        self.inner
    }
}
