//! Image set artifact and slot semantics
//!
//! An `ImageSet` is the cached, derived artifact the resolution service
//! produces for one product: exactly five image URLs with per-slot validity
//! flags. The five positions carry fixed photographic intent, so the set is
//! modeled as fixed-size arrays rather than vectors; `images.len() == 5` is
//! a type-level guarantee.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of slots in every resolved image set.
pub const SLOT_COUNT: usize = 5;

/// Version tag written on normally regenerated sets. Bumping this
/// invalidates every cached entry from an older slot-semantics generation.
pub const IMAGE_SET_VERSION: &str = "v2";

/// Version tag written on the degraded all-placeholder fallback set.
pub const FALLBACK_VERSION: &str = "v2-fallback";

/// Photographic intent of each fixed slot position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotIntent {
    /// Slot 0: hero shot on clean background
    Hero,
    /// Slot 1: macro/detail of conductors and jacket
    Macro,
    /// Slot 2: alternate angle / coil view
    AlternateAngle,
    /// Slot 3: in-use installation context
    InUse,
    /// Slot 4: retail packaging view
    Packaging,
}

impl SlotIntent {
    /// Intent for a slot index in `0..SLOT_COUNT`.
    pub fn for_slot(slot: usize) -> Self {
        match slot {
            0 => Self::Hero,
            1 => Self::Macro,
            2 => Self::AlternateAngle,
            3 => Self::InUse,
            _ => Self::Packaging,
        }
    }
}

/// Per-slot validity flag.
///
/// `Generating` and `Error` are transient values used while a rebuild is in
/// flight; a set returned to callers only ever carries `Valid` or
/// `Placeholder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Valid,
    Placeholder,
    Generating,
    Error,
}

impl SlotStatus {
    /// Collapse transient values to their resolved form.
    pub fn resolved(self) -> Self {
        match self {
            Self::Valid => Self::Valid,
            _ => Self::Placeholder,
        }
    }
}

/// Summary of how a resolved set ended up, derived from the status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionState {
    AllValid,
    PartiallyPlaceholder,
    AllPlaceholder,
}

/// Cached 5-slot image artifact for one product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSet {
    /// Ordered image URLs; position is significant (see `SlotIntent`)
    pub images: [String; SLOT_COUNT],
    /// Parallel per-slot validity flags
    pub status: [SlotStatus; SLOT_COUNT],
    /// Generation instruction derived from product metadata (descriptive only)
    pub prompt_text: String,
    /// Cache-generation tag (`IMAGE_SET_VERSION` or `FALLBACK_VERSION`)
    pub version: String,
    pub generated_at: DateTime<Utc>,
}

impl ImageSet {
    /// Assemble a freshly regenerated set under the current version tag.
    pub fn resolved(images: [String; SLOT_COUNT], status: [SlotStatus; SLOT_COUNT], prompt_text: String) -> Self {
        let status = status.map(SlotStatus::resolved);
        Self {
            images,
            status,
            prompt_text,
            version: IMAGE_SET_VERSION.to_string(),
            generated_at: Utc::now(),
        }
    }

    /// Degraded set used when regeneration fails outright: every slot is the
    /// fixed placeholder and the version carries the fallback marker.
    pub fn fallback(placeholder_url: &str, prompt_text: String) -> Self {
        Self {
            images: std::array::from_fn(|_| placeholder_url.to_string()),
            status: [SlotStatus::Placeholder; SLOT_COUNT],
            prompt_text,
            version: FALLBACK_VERSION.to_string(),
            generated_at: Utc::now(),
        }
    }

    pub fn state(&self) -> ResolutionState {
        let valid = self.status.iter().filter(|s| **s == SlotStatus::Valid).count();
        match valid {
            0 => ResolutionState::AllPlaceholder,
            SLOT_COUNT => ResolutionState::AllValid,
            _ => ResolutionState::PartiallyPlaceholder,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.version == FALLBACK_VERSION
    }
}
