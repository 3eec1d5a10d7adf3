use thiserror::Error;

/// Failures of the data table.
///
/// Config errors are logged and the offending entry skipped; render errors
/// replace the table body with an error panel; export errors surface as a
/// notice.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TableError {
    #[error("invalid column definition: {0}")]
    InvalidColumn(String),

    #[error("invalid filter definition: {0}")]
    InvalidFilter(String),

    #[error("failed to render table: {message}")]
    Render { message: String, detail: String },

    #[error("no data to export")]
    NoData,

    #[error("failed to write CSV: {0}")]
    Csv(String),

    #[error("download failed: {0}")]
    Download(String),
}

impl TableError {
    pub fn render(message: impl Into<String>, detail: impl Into<String>) -> Self {
        TableError::Render {
            message: message.into(),
            detail: detail.into(),
        }
    }

    /// Technical detail shown under the message in the error panel
    pub fn detail(&self) -> Option<&str> {
        match self {
            TableError::Render { detail, .. } => Some(detail),
            _ => None,
        }
    }
}

impl From<csv::Error> for TableError {
    fn from(e: csv::Error) -> Self {
        TableError::Csv(e.to_string())
    }
}
