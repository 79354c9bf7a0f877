use std::path::PathBuf;
use thiserror::Error;

/// Fatal problems while reading the survey file. Any of these aborts startup.
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("'{path}' has no header line")]
    EmptyHeader { path: PathBuf },

    #[error("missing expected column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
}

/// A row-level problem that did not stop the load.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadWarning {
    /// The collection date did not match `DD/MM/YYYY`; the row was kept.
    DateParse { line: u64, value: String },
    /// The sale price was blank, unreadable or negative; the row was skipped.
    InvalidPrice { line: u64, value: String },
    /// The row itself could not be decoded; it was skipped.
    Malformed { line: u64, message: String },
}

impl std::fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadWarning::DateParse { line, value } => {
                write!(f, "line {line}: unparseable collection date '{value}'")
            }
            LoadWarning::InvalidPrice { line, value } => {
                write!(f, "line {line}: invalid sale price '{value}'")
            }
            LoadWarning::Malformed { line, message } => write!(f, "line {line}: {message}"),
        }
    }
}
