//! Product entity and catalog metadata
//!
//! Contains the immutable product record served by the catalog data store.
//! Products never change for the lifetime of a browsing session; the image
//! service only reads them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Immutable product record from the catalog data store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier, non-empty for well-formed records
    pub id: String,
    pub name: String,
    pub category: String,
    /// Canonical product image URL, when the catalog carries one
    pub image: Option<String>,
    pub price: Option<f64>,
    pub currency: String,
    pub description: Option<String>,
    pub in_stock: bool,
    /// Free-form spec sheet rows (conductor, jacket, length, ...)
    pub specifications: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a minimal catalog record with the fields the image pipeline reads.
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            image: None,
            price: None,
            currency: "INR".to_string(),
            description: None,
            in_stock: true,
            specifications: HashMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Attach the canonical image URL (chaining constructor helper).
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    /// Whether the record satisfies the service's input constraint.
    pub fn has_valid_id(&self) -> bool {
        !self.id.trim().is_empty()
    }
}
