pub mod config;
pub mod error;
pub mod logging;

pub use config::{ExportConfig, SlideStyle};
pub use error::{ErrorCategory, ExportError};
