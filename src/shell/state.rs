// Shared state handed to every HTTP handler.
//
// Responsibilities
// - Wire the in memory adapters into the command and query handlers once, at start.
// - Hand out cheap clones; everything inside is behind Arc.

use crate::adapters::in_memory::in_memory_directory::InMemoryDirectory;
use crate::adapters::in_memory::in_memory_entry_store::InMemoryEntryStore;
use crate::application::command_handlers::task_catalog::TaskCatalog;
use crate::application::command_handlers::time_entry_lifecycle::TimeEntryLifecycle;
use crate::application::query_handlers::monthly_report::ReportEngine;
use crate::core::cost::rate_config::RateConfig;
use std::sync::Arc;

pub type Lifecycle =
    TimeEntryLifecycle<InMemoryEntryStore, InMemoryDirectory, InMemoryDirectory, InMemoryDirectory>;
pub type Catalog = TaskCatalog<InMemoryDirectory, InMemoryDirectory>;
pub type Reports = ReportEngine<InMemoryEntryStore, InMemoryDirectory, InMemoryDirectory>;

#[derive(Clone)]
pub struct AppState {
    pub lifecycle: Arc<Lifecycle>,
    pub catalog: Arc<Catalog>,
    pub reports: Arc<Reports>,
    pub rates: Arc<RateConfig>,
}

impl AppState {
    pub fn new(store: InMemoryEntryStore, directory: InMemoryDirectory, rates: RateConfig) -> Self {
        let store = Arc::new(store);
        let directory = Arc::new(directory);
        let rates = Arc::new(rates);
        Self {
            lifecycle: Arc::new(TimeEntryLifecycle::new(
                store.clone(),
                directory.clone(),
                directory.clone(),
                directory.clone(),
            )),
            catalog: Arc::new(TaskCatalog::new(directory.clone(), directory.clone())),
            reports: Arc::new(ReportEngine::new(store, directory.clone(), directory, rates.clone())),
            rates,
        }
    }
}
