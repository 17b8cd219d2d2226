use std::sync::Arc;

use enrollment::{analyze, DatasetStore, DatasetSummary, DepartmentCatalog};

use crate::config::AppConfig;

pub type SharedState = Arc<AppState>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DatasetStore>,
    pub catalog: Arc<DepartmentCatalog>,
    pub cfg: AppConfig,
}

impl AppState {
    pub fn new(store: Arc<DatasetStore>, catalog: DepartmentCatalog, cfg: AppConfig) -> Self {
        Self {
            store,
            catalog: Arc::new(catalog),
            cfg,
        }
    }

    /// Summary of the active dataset, recomputed on every call.
    pub fn dataset_info(&self) -> Option<DatasetSummary> {
        self.store
            .current()
            .map(|ds| analyze(&ds, &self.catalog))
    }
}
