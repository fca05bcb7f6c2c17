use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading reference data.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("duplicate item '{item}' in category '{category}'")]
    DuplicateItem { category: String, item: String },

    #[error("duplicate id {0}")]
    DuplicateId(i64),

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for LoaderError {
    fn from(err: csv::Error) -> Self {
        LoaderError::CsvParse(err.to_string())
    }
}

impl LoaderError {
    pub(crate) fn invalid_row(
        row: usize,
        message: impl Into<String>,
    ) -> Self {
        LoaderError::InvalidRow {
            row,
            message: message.into(),
        }
    }
}

/// Opens `path` for one of the loaders.
pub(crate) fn open(path: &std::path::Path) -> Result<std::fs::File, LoaderError> {
    std::fs::File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })
}
