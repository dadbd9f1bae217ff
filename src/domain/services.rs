//! Service layer trait seams
//!
//! Interfaces for the collaborators the image resolution service consumes:
//! the catalog data provider, the URL validator and the per-slot image
//! generator. Infrastructure supplies the production implementations; tests
//! substitute mocks.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::product::Product;

/// Catalog data provider. Read-only; the image service never mutates
/// product records.
pub trait ProductCatalog: Send + Sync {
    /// Look up one immutable product record by its stable identifier.
    fn get_product(&self, id: &str) -> Option<Product>;

    /// Snapshot of every product in the catalog.
    fn all_products(&self) -> Vec<Product>;
}

/// Lightweight URL existence checker.
///
/// Implementations reject any non-`https://` scheme outright and treat
/// every network failure or non-success response as invalid. A single
/// bounded probe per call, no retries.
#[async_trait]
pub trait UrlValidator: Send + Sync {
    async fn validate(&self, url: &str) -> bool;
}

/// Produces one candidate image URL for one slot of a product's image set.
///
/// Expected to be deterministic for the same inputs; the service recovers
/// from an error by substituting the placeholder for that slot.
#[async_trait]
pub trait SlotImageGenerator: Send + Sync {
    async fn generate_slot_image(&self, prompt_text: &str, product_name: &str, slot: usize) -> Result<String>;
}
