//! Domain module - Core business logic and entities
//!
//! Contains the product entity, the image-set artifact with its slot
//! semantics, the pure prompt/seed derivation, and the trait seams the
//! application layer depends on.

pub mod error;
pub mod image_set;
pub mod product;
pub mod prompt;
pub mod services;

// Re-export commonly used items
pub use error::ImageServiceError;
pub use image_set::{
    FALLBACK_VERSION, IMAGE_SET_VERSION, ImageSet, ResolutionState, SLOT_COUNT, SlotIntent, SlotStatus,
};
pub use product::Product;
pub use prompt::{PromptFacets, derive_prompt, slot_seed};
pub use services::{ProductCatalog, SlotImageGenerator, UrlValidator};
