//! Deterministic slot image generator
//!
//! Stand-in for a remote image-generation capability. Output is fully
//! deterministic: recognized cable families draw from fixed stand-in image
//! lists keyed by the slot seed; everything else gets the generic
//! placeholder distinguished by a seed-derived query parameter. Identical
//! inputs always produce identical URLs, across runs.

use anyhow::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use tracing::debug;

use crate::domain::image_set::SlotIntent;
use crate::domain::prompt::slot_seed;
use crate::domain::services::SlotImageGenerator;
use crate::infrastructure::config::DEFAULT_PLACEHOLDER_URL;

/// Stand-in image pools for recognized product families. Order matters:
/// the first family whose keyword appears in the product name wins.
static FAMILY_POOLS: Lazy<Vec<(&'static str, Vec<&'static str>)>> = Lazy::new(|| {
    vec![
        (
            "cat 6",
            vec![
                "https://cdn.cablecatalog.example/standins/cat6/blue-coil.jpg",
                "https://cdn.cablecatalog.example/standins/cat6/grey-macro.jpg",
                "https://cdn.cablecatalog.example/standins/cat6/patch-panel.jpg",
                "https://cdn.cablecatalog.example/standins/cat6/boxed.jpg",
            ],
        ),
        (
            "cat 5",
            vec![
                "https://cdn.cablecatalog.example/standins/cat5e/grey-coil.jpg",
                "https://cdn.cablecatalog.example/standins/cat5e/jack-closeup.jpg",
                "https://cdn.cablecatalog.example/standins/cat5e/boxed.jpg",
            ],
        ),
        (
            "cctv",
            vec![
                "https://cdn.cablecatalog.example/standins/cctv/coax-coil.jpg",
                "https://cdn.cablecatalog.example/standins/cctv/camera-run.jpg",
                "https://cdn.cablecatalog.example/standins/cctv/bnc-ends.jpg",
            ],
        ),
        (
            "telephone",
            vec![
                "https://cdn.cablecatalog.example/standins/telephone/drop-wire.jpg",
                "https://cdn.cablecatalog.example/standins/telephone/rj11.jpg",
            ],
        ),
        (
            "speaker",
            vec![
                "https://cdn.cablecatalog.example/standins/speaker/clear-pair.jpg",
                "https://cdn.cablecatalog.example/standins/speaker/terminals.jpg",
            ],
        ),
    ]
});

/// Deterministic, offline implementation of `SlotImageGenerator`.
#[derive(Debug, Clone)]
pub struct DeterministicSlotGenerator {
    placeholder_url: String,
}

impl Default for DeterministicSlotGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DeterministicSlotGenerator {
    pub fn new() -> Self {
        Self {
            placeholder_url: DEFAULT_PLACEHOLDER_URL.to_string(),
        }
    }

    pub fn with_placeholder(placeholder_url: impl Into<String>) -> Self {
        Self {
            placeholder_url: placeholder_url.into(),
        }
    }

    fn pick(&self, product_name: &str, slot: usize) -> String {
        let seed = slot_seed(product_name, slot);
        let name_lc = product_name.to_lowercase();

        for (keyword, pool) in FAMILY_POOLS.iter() {
            if name_lc.contains(keyword) {
                let index = seed.unsigned_abs() as usize % pool.len();
                return pool[index].to_string();
            }
        }

        // Unrecognized family: generic placeholder, distinguished per slot so
        // the gallery does not show five byte-identical tiles.
        format!("{}?variant={}", self.placeholder_url, seed.unsigned_abs())
    }
}

#[async_trait]
impl SlotImageGenerator for DeterministicSlotGenerator {
    async fn generate_slot_image(&self, _prompt_text: &str, product_name: &str, slot: usize) -> Result<String> {
        let url = self.pick(product_name, slot);
        debug!(
            "Generated {:?} candidate (slot {}) for '{}': {}",
            SlotIntent::for_slot(slot),
            slot,
            product_name,
            url
        );
        Ok(url)
    }
}
