use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The single message shown to the user when an export does not complete.
pub const EXPORT_FAILED_MESSAGE: &str = "Ekspor gagal. Silakan coba lagi.";

/// Errors raised by the export engine.
///
/// Missing imagery is deliberately absent from this enum: a failed region
/// capture or photo fetch is recovered inside the renderer and never reaches
/// the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("Unsupported report type: {0}")]
    UnsupportedReportType(String),

    #[error("Invalid report data: {0}")]
    InvalidReport(String),

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Table generation error: {0}")]
    Table(String),

    #[error("Packaging error: {0}")]
    Package(String),

    #[error("Delivery error: {0}")]
    Delivery(String),
}

/// Broad classification used when logging export failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCategory {
    /// The report handed to the engine could not be interpreted.
    Input,
    /// A renderer or format library failed.
    Render,
    /// The finished file could not be handed over.
    Delivery,
}

impl ExportError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedReportType(_) | Self::InvalidReport(_) => ErrorCategory::Input,
            Self::Layout(_) | Self::Table(_) | Self::Package(_) => ErrorCategory::Render,
            Self::Delivery(_) => ErrorCategory::Delivery,
        }
    }

    /// User-facing text. Every variant collapses to the same generic message;
    /// details only go to the log.
    pub fn user_message(&self) -> String {
        EXPORT_FAILED_MESSAGE.into()
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Delivery(err.to_string())
    }
}
