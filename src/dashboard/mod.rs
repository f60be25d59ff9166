//! Dashboard pages: their data, their mutations and the values derived from them.
//!
//! Nothing here draws. The terminal UI and the headless commands read page state and call the
//! page methods; pages own every request they start.

pub mod channel;
pub mod loader;
pub mod page;
pub mod retailer;
pub mod supplier;
pub mod view;

pub use loader::{LoadOutcome, Loader};
pub use page::{MutationKind, PageCore};
pub use retailer::RetailerPage;
pub use supplier::{SupplierPage, SupplierTab};

use crate::api::error::ApiError;
use crate::error_classifier::ErrorClassifier;
use crate::logging::LogLevel;

/// Logs a failed request at the severity the classifier assigns, and returns that severity.
pub(crate) fn log_api_error(classifier: &ErrorClassifier, context: &str, error: &ApiError) -> LogLevel {
    let level = classifier.classify_api_error(error);
    match level {
        LogLevel::Error => log::error!("{}: {}", context, error),
        LogLevel::Warn => log::warn!("{}: {}", context, error),
        LogLevel::Info => log::info!("{}: {}", context, error),
        LogLevel::Debug | LogLevel::Trace => log::debug!("{}: {}", context, error),
    }
    level
}
