//! Cable Catalog Images - deterministic product image-set resolution
//!
//! In-process library that resolves a 5-slot image set per catalog product,
//! caching trusted results and degrading to a fixed placeholder whenever a
//! candidate cannot be validated.

// Module declarations
pub mod application;
pub mod domain;
pub mod infrastructure;

// Re-export the primary surface
pub use application::ImageResolutionService;
pub use domain::{
    ImageSet, Product, ResolutionState, SLOT_COUNT, SlotIntent, SlotStatus, derive_prompt, slot_seed,
};
pub use infrastructure::{
    ConfigManager, DeterministicSlotGenerator, HttpUrlValidator, ImageServiceConfig, StaticCatalog,
    init_logging,
};
