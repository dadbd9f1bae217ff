//! Infrastructure layer for external integrations
//!
//! Production implementations of the domain's trait seams plus config and
//! logging setup.

pub mod config;
pub mod http_validator;
pub mod logging;
pub mod slot_generator;
pub mod static_catalog;

// Re-export commonly used items
pub use config::{ConfigManager, DEFAULT_PLACEHOLDER_URL, ImageServiceConfig};
pub use http_validator::HttpUrlValidator;
pub use logging::{init_logging, init_logging_with_level};
pub use slot_generator::DeterministicSlotGenerator;
pub use static_catalog::StaticCatalog;
