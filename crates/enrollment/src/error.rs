use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    #[error("Missing required columns: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("No matching record")]
    NoMatch,

    #[error("No dataset loaded")]
    NoDatasetLoaded,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Count overflow: {0}")]
    Overflow(String),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
