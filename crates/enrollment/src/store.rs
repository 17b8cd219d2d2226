//! Single active dataset, mirrored to one CSV file on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use crate::lookup::{self, TrendWindow};
use crate::{validate, Dataset, DatasetError, HistoricalEnrollment, RawTable, Result};

pub const DATASET_FILE_NAME: &str = "current_dataset.csv";

pub struct DatasetStore {
    path: PathBuf,
    active: RwLock<Option<Arc<Dataset>>>,
    // Serializes validate -> persist -> swap.
    writer: Mutex<()>,
}

impl DatasetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            active: RwLock::new(None),
            writer: Mutex::new(()),
        }
    }

    /// Store backed by `<dir>/current_dataset.csv`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(DATASET_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshot of the active dataset. Stays valid across later replacements.
    pub fn current(&self) -> Option<Arc<Dataset>> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Like `current`, for callers that treat an empty store as an error.
    pub fn snapshot(&self) -> Result<Arc<Dataset>> {
        self.current().ok_or(DatasetError::NoDatasetLoaded)
    }

    pub fn is_loaded(&self) -> bool {
        self.current().is_some()
    }

    /// Validate `table`, persist it over the backing file and make it active.
    /// On error nothing changes, neither in memory nor on disk.
    pub fn replace(&self, table: RawTable) -> Result<Arc<Dataset>> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let validated = validate(table)?;
        let records = validated.records()?;
        self.persist(&validated.table)?;
        let size_bytes = fs::metadata(&self.path)?.len();

        let dataset = Arc::new(Dataset {
            records,
            path: self.path.clone(),
            size_bytes,
            filename: self.file_name(),
            loaded_at: Local::now(),
        });
        self.set_active(Some(dataset.clone()));

        info!(
            path = %self.path.display(),
            records = dataset.len(),
            size_bytes,
            "dataset replaced"
        );
        Ok(dataset)
    }

    /// Load the backing file into memory. Absent or unreadable files clear
    /// the active dataset.
    pub fn load(&self) -> Option<Arc<Dataset>> {
        let _guard = self.writer.lock().unwrap_or_else(PoisonError::into_inner);

        let loaded = match self.read_backing_file() {
            Ok(Some(ds)) => {
                info!(path = %self.path.display(), records = ds.len(), "current dataset loaded");
                Some(Arc::new(ds))
            }
            Ok(None) => None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "error loading current dataset");
                None
            }
        };
        self.set_active(loaded.clone());
        loaded
    }

    /// Record lookup against the current snapshot; `None` when nothing is
    /// loaded. Callers that need several reads from one snapshot should take
    /// `current()` and use [`lookup::get_record`] directly.
    pub fn get_record(
        &self,
        course: &str,
        school_year: &str,
        semester: &str,
    ) -> Option<HistoricalEnrollment> {
        let ds = self.current()?;
        lookup::get_record(&ds, course, school_year, semester)
    }

    /// Trend window over the current snapshot; empty when nothing is loaded.
    pub fn get_trend(&self, course: &str, max_records: usize) -> TrendWindow {
        match self.current() {
            Some(ds) => lookup::get_trend(&ds, course, max_records),
            None => TrendWindow::default(),
        }
    }

    fn set_active(&self, ds: Option<Arc<Dataset>>) {
        *self.active.write().unwrap_or_else(PoisonError::into_inner) = ds;
    }

    fn read_backing_file(&self) -> Result<Option<Dataset>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let table = RawTable::from_path(&self.path)?;
        let records = validate(table)?.records()?;
        let size_bytes = fs::metadata(&self.path)?.len();

        Ok(Some(Dataset {
            records,
            path: self.path.clone(),
            size_bytes,
            filename: self.file_name(),
            loaded_at: Local::now(),
        }))
    }

    fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DATASET_FILE_NAME.to_string())
    }

    // Write a sibling temp file then rename it over the backing path.
    fn persist(&self, table: &RawTable) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let tmp = self.path.with_file_name(format!(".{DATASET_FILE_NAME}.tmp_{}", Uuid::new_v4()));

        if let Err(e) = table.write_csv(&tmp) {
            let _ = fs::remove_file(&tmp);
            return Err(e);
        }
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }
}
