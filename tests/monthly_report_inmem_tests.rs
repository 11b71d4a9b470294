// End to end in memory test for the monthly cost report.
//
// Responsibilities when you add code
// - Create entries through the lifecycle, then read them back through the report engine.
// - Assert totals, conversion and rendering together, as a client would see them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use time_costing::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use time_costing::adapters::in_memory::in_memory_entry_store::InMemoryEntryStore;
use time_costing::application::command_handlers::time_entry_lifecycle::TimeEntryLifecycle;
use time_costing::application::query_handlers::monthly_report::ReportEngine;
use time_costing::core::cost::currency::Currency;
use time_costing::core::cost::rate_config::RateConfig;
use time_costing::core::project::Project;
use time_costing::core::time_entry::decider::create::command::CreateTimeEntry;
use time_costing::core::user::{ContractType, Language, Role, User};

struct World {
    lifecycle: TimeEntryLifecycle<InMemoryEntryStore, InMemoryDirectory, InMemoryDirectory, InMemoryDirectory>,
    reports: ReportEngine<InMemoryEntryStore, InMemoryDirectory, InMemoryDirectory>,
}

fn user(id: &str, contract_type: ContractType, rate: Decimal) -> User {
    User {
        id: id.into(),
        username: id.into(),
        role: Role::Employee,
        contract_type,
        uop_gross_rate: (contract_type == ContractType::Uop).then_some(rate),
        b2b_hourly_net_rate: (contract_type == ContractType::B2b).then_some(rate),
        language: Language::Pl,
    }
}

fn world() -> World {
    let store = Arc::new(InMemoryEntryStore::new());
    let directory = Arc::new(
        InMemoryDirectory::new()
            .with_user(user("u-uop", ContractType::Uop, dec!(6000)))
            .with_user(user("u-b2b", ContractType::B2b, dec!(120)))
            .with_project(Project {
                id: "p-1".into(),
                name: "Bridge inspection".into(),
                number: "20031-00".into(),
            }),
    );
    World {
        lifecycle: TimeEntryLifecycle::new(store.clone(), directory.clone(), directory.clone(), directory.clone()),
        reports: ReportEngine::new(store, directory.clone(), directory, Arc::new(RateConfig::default())),
    }
}

async fn report_hours(world: &World, user_id: &str, hours: &[Decimal]) {
    for (index, total_hours) in hours.iter().enumerate() {
        let command = CreateTimeEntry {
            user_id: Some(user_id.into()),
            project_id: Some("p-1".into()),
            date: NaiveDate::from_ymd_opt(2025, 3, index as u32 + 1),
            total_hours: Some(*total_hours),
            ..Default::default()
        };
        world.lifecycle.create(command).await.unwrap();
    }
}

#[tokio::test]
async fn reports_a_uop_month_in_hryvnia() {
    let world = world();
    report_hours(&world, "u-uop", &[dec!(8), dec!(7.5), dec!(8), dec!(11.5)]).await;

    let report = world
        .reports
        .generate_monthly_report("u-uop", 2025, 3, Some(Currency::Uah))
        .await
        .unwrap();

    assert_eq!(report.entries.len(), 4);
    assert_eq!(report.totals.total_hours, dec!(35));
    assert_eq!(report.totals.total_cost, dec!(13781.25));
    assert_eq!(report.totals.formatted_cost, "13 781,25 ₴");
    assert_eq!(report.rate_info.pln_to_uah_rate, dec!(10.5));
}

#[tokio::test]
async fn reports_a_b2b_month_in_dollars_and_zloty() {
    let world = world();
    report_hours(&world, "u-b2b", &[dec!(20), dec!(15)]).await;

    let pln = world
        .reports
        .generate_monthly_report("u-b2b", 2025, 3, Some(Currency::Pln))
        .await
        .unwrap();
    assert_eq!(pln.totals.total_cost, dec!(4200.00));
    assert_eq!(pln.totals.formatted_cost, "4 200,00 zł");

    let usd = world
        .reports
        .generate_monthly_report("u-b2b", 2025, 3, Some(Currency::Usd))
        .await
        .unwrap();
    assert_eq!(usd.totals.total_cost, dec!(1050.00));
    assert_eq!(usd.totals.formatted_cost, "$1,050.00");
}

#[tokio::test]
async fn serializes_the_report_with_camel_case_fields() {
    let world = world();
    report_hours(&world, "u-uop", &[dec!(8)]).await;
    let report = world
        .reports
        .generate_monthly_report("u-uop", 2025, 3, Some(Currency::Usd))
        .await
        .unwrap();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["totals"]["formattedCost"], "$75.00");
    assert_eq!(json["rateInfo"]["source"], "config");
    assert!(json["rateInfo"]["updatedAt"].is_string());
}

#[tokio::test]
async fn refuses_a_report_whose_cost_does_not_fit_a_decimal() {
    let world = world();
    report_hours(&world, "u-uop", &[Decimal::MAX]).await;

    let error = world
        .reports
        .generate_monthly_report("u-uop", 2025, 3, Some(Currency::Pln))
        .await
        .unwrap_err();
    assert_eq!(error.kind(), "validation_error");
    assert!(error.to_string().contains("too large to compute"));
}
