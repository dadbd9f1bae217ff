//! In-memory catalog data provider
//!
//! The catalog is a static product list fixed at startup; records are
//! immutable for the lifetime of a browsing session. This mirrors the
//! shape of the manufacturer's published cable lines.

use std::collections::HashMap;

use crate::domain::product::Product;
use crate::domain::services::ProductCatalog;

/// Immutable in-memory `ProductCatalog`.
pub struct StaticCatalog {
    products: HashMap<String, Product>,
}

impl StaticCatalog {
    /// Build a catalog from an explicit product list. Later duplicates of
    /// the same id replace earlier ones.
    pub fn new(products: Vec<Product>) -> Self {
        let products = products.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { products }
    }

    /// Default cable catalog used by the site: networking lines plus the
    /// CCTV, telephone, speaker, lift and power cord families.
    pub fn with_default_products() -> Self {
        let products = vec![
            Product::new("lan-c6-utp", "Cat 6 UTP Cable", "LAN Cables")
                .with_image("https://cdn.cablecatalog.example/products/cat6-utp.jpg"),
            Product::new("lan-c6-stp", "Cat 6 STP Cable", "LAN Cables")
                .with_image("https://cdn.cablecatalog.example/products/cat6-stp.jpg"),
            Product::new("lan-c6-out", "Cat 6 Outdoor Cable", "LAN Cables")
                .with_image("https://cdn.cablecatalog.example/products/cat6-outdoor.jpg"),
            Product::new("lan-c5e-utp", "Cat 5e UTP Cable", "LAN Cables")
                .with_image("https://cdn.cablecatalog.example/products/cat5e-utp.jpg"),
            Product::new("pc-c6-stp", "Cat 6 STP Patchcord", "Patchcords")
                .with_image("https://cdn.cablecatalog.example/products/cat6-stp-patchcord.jpg"),
            Product::new("pc-c6-flat", "Cat 6 Flat Patchcord", "Patchcords")
                .with_image("https://cdn.cablecatalog.example/products/cat6-flat-patchcord.jpg"),
            Product::new("cctv-31", "CCTV 3+1 Coaxial Cable", "CCTV Cables")
                .with_image("https://cdn.cablecatalog.example/products/cctv-3plus1.jpg"),
            Product::new("tel-2p", "Telephone 2 Pair Cable", "Telephone Cables")
                .with_image("https://cdn.cablecatalog.example/products/telephone-2pair.jpg"),
            Product::new("spk-2c", "Speaker 2 Core Cable", "Speaker Cables")
                .with_image("https://cdn.cablecatalog.example/products/speaker-2core.jpg"),
            Product::new("lift-24c", "Lift Cable 24 Core", "Lift Cables")
                .with_image("https://cdn.cablecatalog.example/products/lift-24core.jpg"),
            Product::new("pwr-3pin", "Power Cord 3 Pin", "Power Cords")
                .with_image("https://cdn.cablecatalog.example/products/power-cord-3pin.jpg"),
        ];
        Self::new(products)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl ProductCatalog for StaticCatalog {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.products.get(id).cloned()
    }

    fn all_products(&self) -> Vec<Product> {
        let mut all: Vec<Product> = self.products.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }
}
