//! Image resolution service
//!
//! Produces the 5-slot image set for a product: cached sets are served only
//! after every stored URL re-validates; anything less triggers a full
//! rebuild, never a partial patch. The cache map is owned exclusively by
//! the service and entries are replaced atomically, so callers never see a
//! half-updated set. `resolve_image_set` is total: every error path folds
//! into placeholder substitution and the call always returns a well-formed
//! 5-slot result.

use anyhow::{Result, anyhow};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::domain::error::ImageServiceError;
use crate::domain::image_set::{ImageSet, SLOT_COUNT, SlotStatus};
use crate::domain::product::Product;
use crate::domain::prompt::derive_prompt;
use crate::domain::services::{SlotImageGenerator, UrlValidator};
use crate::infrastructure::config::ImageServiceConfig;

/// Candidate URL for one slot before validation.
enum SlotCandidate {
    /// A real URL that still has to pass validation
    Url(String),
    /// Known-absent source; goes straight to the placeholder
    Placeholder,
}

/// Deterministic product-image-set resolution and caching service.
pub struct ImageResolutionService {
    validator: Arc<dyn UrlValidator>,
    generator: Arc<dyn SlotImageGenerator>,
    config: ImageServiceConfig,
    cache: RwLock<HashMap<String, ImageSet>>,
}

impl ImageResolutionService {
    pub fn new(validator: Arc<dyn UrlValidator>, generator: Arc<dyn SlotImageGenerator>) -> Self {
        Self::with_config(ImageServiceConfig::default(), validator, generator)
    }

    pub fn with_config(
        config: ImageServiceConfig,
        validator: Arc<dyn UrlValidator>,
        generator: Arc<dyn SlotImageGenerator>,
    ) -> Self {
        Self {
            validator,
            generator,
            config,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Resolve the 5-slot image set for a product.
    ///
    /// Total operation: never errors, never returns fewer than five slots.
    /// A trusted cached set is returned unchanged; otherwise the whole set
    /// is regenerated and the cache entry replaced in one write.
    pub async fn resolve_image_set(&self, product: &Product) -> ImageSet {
        let prompt_text = derive_prompt(&product.name, &product.category);

        if !product.has_valid_id() {
            warn!("Product with empty id ('{}'), serving fallback set uncached", product.name);
            return ImageSet::fallback(&self.config.placeholder_url, prompt_text);
        }

        if let Some(cached) = self.cached_set(&product.id).await {
            if self.revalidate(&cached).await {
                debug!("Cache hit for product {}", product.id);
                return cached;
            }
            info!("Cached set for {} failed re-validation, discarding", product.id);
            self.invalidate(&product.id).await;
        }

        match self.rebuild(product, &prompt_text).await {
            Ok(set) => {
                let mut cache = self.cache.write().await;
                cache.insert(product.id.clone(), set.clone());
                set
            }
            Err(e) => {
                error!(
                    "{}",
                    ImageServiceError::RegenerationFailed(format!("product {}: {e}", product.id))
                );
                ImageSet::fallback(&self.config.placeholder_url, prompt_text)
            }
        }
    }

    /// Just the five URLs, for callers that do not care about status flags.
    pub async fn get_images(&self, product: &Product) -> [String; SLOT_COUNT] {
        self.resolve_image_set(product).await.images
    }

    /// Full set including per-slot status.
    pub async fn get_image_set(&self, product: &Product) -> ImageSet {
        self.resolve_image_set(product).await
    }

    /// Drop the cached set for one product, forcing a rebuild on next use.
    pub async fn invalidate(&self, product_id: &str) {
        let mut cache = self.cache.write().await;
        if cache.remove(product_id).is_some() {
            debug!("Invalidated cached image set for {}", product_id);
        }
    }

    /// Drop every cached set (e.g. after a catalog update).
    pub async fn invalidate_all(&self) {
        let mut cache = self.cache.write().await;
        let dropped = cache.len();
        cache.clear();
        info!("Invalidated all {} cached image sets", dropped);
    }

    /// Number of products currently cached (diagnostics).
    pub async fn cached_len(&self) -> usize {
        self.cache.read().await.len()
    }

    async fn cached_set(&self, product_id: &str) -> Option<ImageSet> {
        self.cache.read().await.get(product_id).cloned()
    }

    /// Re-validate the cached URLs concurrently; the set is trusted only
    /// when every check passes. Placeholder slots are trusted without a
    /// probe, otherwise an unreachable placeholder CDN would churn a
    /// degraded set through rebuilds that regenerate the same placeholders.
    async fn revalidate(&self, set: &ImageSet) -> bool {
        let checks = join_all(
            set.images
                .iter()
                .zip(set.status.iter())
                .filter(|(_, status)| **status != SlotStatus::Placeholder)
                .map(|(url, _)| self.validator.validate(url)),
        )
        .await;
        checks.into_iter().all(|ok| ok)
    }

    /// Full regeneration: slot 0 from the canonical product image, slots
    /// 1..4 from the generator, all candidates validated independently.
    async fn rebuild(&self, product: &Product, prompt_text: &str) -> Result<ImageSet> {
        let hero = match product.image.as_deref() {
            Some(url) if !url.trim().is_empty() => SlotCandidate::Url(url.to_string()),
            _ => SlotCandidate::Placeholder,
        };

        // Slot generation fan-out: computations are independent, join on all.
        let generated = join_all((1..SLOT_COUNT).map(|slot| {
            let prompt_text = prompt_text.to_string();
            async move {
                match self
                    .generator
                    .generate_slot_image(&prompt_text, &product.name, slot)
                    .await
                {
                    Ok(url) => SlotCandidate::Url(url),
                    Err(e) => {
                        warn!("{}", ImageServiceError::GenerationFailed { slot, reason: e.to_string() });
                        SlotCandidate::Placeholder
                    }
                }
            }
        }))
        .await;

        let candidates: Vec<SlotCandidate> = std::iter::once(hero).chain(generated).collect();

        // Validation fan-out over all five candidates.
        let resolved = join_all(
            candidates
                .into_iter()
                .map(|candidate| self.resolve_candidate(candidate)),
        )
        .await;

        let (images, status): (Vec<String>, Vec<SlotStatus>) = resolved.into_iter().unzip();
        let images: [String; SLOT_COUNT] = images
            .try_into()
            .map_err(|v: Vec<String>| anyhow!("expected {} slots, built {}", SLOT_COUNT, v.len()))?;
        let status: [SlotStatus; SLOT_COUNT] = status
            .try_into()
            .map_err(|v: Vec<SlotStatus>| anyhow!("expected {} statuses, built {}", SLOT_COUNT, v.len()))?;

        Ok(ImageSet::resolved(images, status, prompt_text.to_string()))
    }

    async fn resolve_candidate(&self, candidate: SlotCandidate) -> (String, SlotStatus) {
        match candidate {
            SlotCandidate::Placeholder => (self.config.placeholder_url.clone(), SlotStatus::Placeholder),
            SlotCandidate::Url(url) => {
                if self.validator.validate(&url).await {
                    (url, SlotStatus::Valid)
                } else {
                    debug!("{}", ImageServiceError::ValidationFailed { url });
                    (self.config.placeholder_url.clone(), SlotStatus::Placeholder)
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::image_set::{FALLBACK_VERSION, IMAGE_SET_VERSION, ResolutionState};
    use crate::domain::prompt::slot_seed;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Validator that accepts everything except an explicit deny-list.
    #[derive(Default)]
    struct ScriptedValidator {
        denied: Mutex<HashSet<String>>,
        calls: AtomicUsize,
    }

    impl ScriptedValidator {
        fn deny(&self, url: &str) {
            self.denied.lock().unwrap().insert(url.to_string());
        }
    }

    #[async_trait]
    impl UrlValidator for ScriptedValidator {
        async fn validate(&self, url: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            !self.denied.lock().unwrap().contains(url)
        }
    }

    /// Generator returning `https://gen/{seed}`, optionally failing.
    #[derive(Default)]
    struct ScriptedGenerator {
        fail: bool,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SlotImageGenerator for ScriptedGenerator {
        async fn generate_slot_image(&self, _prompt: &str, name: &str, slot: usize) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("generation backend unavailable");
            }
            Ok(format!("https://gen/{}", slot_seed(name, slot)))
        }
    }

    fn service_with(
        validator: Arc<ScriptedValidator>,
        generator: Arc<ScriptedGenerator>,
    ) -> ImageResolutionService {
        ImageResolutionService::new(validator, generator)
    }

    fn patchcord() -> Product {
        Product::new("pc1", "Cat 6 STP", "Patchcords").with_image("https://good/img.png")
    }

    #[tokio::test]
    async fn spec_scenario_all_valid() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let set = service.resolve_image_set(&patchcord()).await;

        assert_eq!(set.images.len(), SLOT_COUNT);
        assert_eq!(set.status.len(), SLOT_COUNT);
        assert_eq!(set.images[0], "https://good/img.png");
        assert_eq!(set.status[0], SlotStatus::Valid);
        for slot in 1..SLOT_COUNT {
            assert_eq!(set.images[slot], format!("https://gen/{}", slot_seed("Cat 6 STP", slot)));
            assert_eq!(set.status[slot], SlotStatus::Valid);
        }
        assert_eq!(set.version, IMAGE_SET_VERSION);
        assert_eq!(set.state(), ResolutionState::AllValid);
    }

    #[tokio::test]
    async fn second_call_is_a_cache_hit() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator.clone(), generator.clone());

        let first = service.resolve_image_set(&patchcord()).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), SLOT_COUNT - 1);

        let second = service.resolve_image_set(&patchcord()).await;
        assert_eq!(first.images, second.images);
        assert_eq!(first.status, second.status);
        // No regeneration happened on the hit.
        assert_eq!(generator.calls.load(Ordering::SeqCst), SLOT_COUNT - 1);
        assert_eq!(service.cached_len().await, 1);
    }

    #[tokio::test]
    async fn cached_url_going_bad_forces_full_rebuild() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator.clone(), generator.clone());

        let first = service.resolve_image_set(&patchcord()).await;
        let stale_url = first.images[2].clone();
        validator.deny(&stale_url);

        let second = service.resolve_image_set(&patchcord()).await;

        // Full rebuild, not a patch of the one bad slot.
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2 * (SLOT_COUNT - 1));
        // The regenerated candidate is the same deterministic URL and still
        // fails validation, so that slot degrades to the placeholder.
        assert_eq!(second.status[2], SlotStatus::Placeholder);
        assert_ne!(second.images[2], stale_url);
        assert_eq!(second.status[0], SlotStatus::Valid);
        assert_eq!(second.version, IMAGE_SET_VERSION);
        assert_eq!(second.state(), ResolutionState::PartiallyPlaceholder);
    }

    #[tokio::test]
    async fn missing_hero_image_gets_placeholder_slot_one() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let product = Product::new("pc2", "Cat 6 UTP", "Patchcords");
        let set = service.resolve_image_set(&product).await;

        assert_eq!(set.images[0], ImageServiceConfig::default().placeholder_url);
        assert_eq!(set.status[0], SlotStatus::Placeholder);
        assert_eq!(set.state(), ResolutionState::PartiallyPlaceholder);
    }

    #[tokio::test]
    async fn failing_hero_validation_gets_placeholder_slot_one() {
        let validator = Arc::new(ScriptedValidator::default());
        validator.deny("https://good/img.png");
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let set = service.resolve_image_set(&patchcord()).await;
        assert_eq!(set.status[0], SlotStatus::Placeholder);
        assert_eq!(set.images[0], ImageServiceConfig::default().placeholder_url);
    }

    #[tokio::test]
    async fn generator_failure_degrades_slots_locally() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator { fail: true, calls: AtomicUsize::new(0) });
        let service = service_with(validator, generator);

        let set = service.resolve_image_set(&patchcord()).await;

        assert_eq!(set.status[0], SlotStatus::Valid);
        for slot in 1..SLOT_COUNT {
            assert_eq!(set.status[slot], SlotStatus::Placeholder);
        }
        // Slot-level failure is recovered locally; this is not the
        // total-failure fallback path.
        assert_eq!(set.version, IMAGE_SET_VERSION);
        assert_eq!(set.state(), ResolutionState::PartiallyPlaceholder);
    }

    #[tokio::test]
    async fn always_five_slots_even_when_everything_fails() {
        let validator = Arc::new(ScriptedValidator::default());
        validator.deny("https://good/img.png");
        for slot in 1..SLOT_COUNT {
            validator.deny(&format!("https://gen/{}", slot_seed("Cat 6 STP", slot)));
        }
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let set = service.resolve_image_set(&patchcord()).await;
        assert_eq!(set.images.len(), SLOT_COUNT);
        assert_eq!(set.status.len(), SLOT_COUNT);
        assert_eq!(set.state(), ResolutionState::AllPlaceholder);
        assert!(set.images.iter().all(|u| *u == ImageServiceConfig::default().placeholder_url));
    }

    #[tokio::test]
    async fn cached_placeholder_slots_are_trusted_without_a_probe() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator.clone(), generator.clone());

        // No canonical image, so the cached set carries a placeholder hero.
        let product = Product::new("pc3", "Cat 6 UTP", "Patchcords");
        let first = service.resolve_image_set(&product).await;
        assert_eq!(first.status[0], SlotStatus::Placeholder);

        // Even with the placeholder CDN unreachable, the cached set must
        // stay a hit; only the valid slots are re-probed.
        validator.deny(&ImageServiceConfig::default().placeholder_url);

        let second = service.resolve_image_set(&product).await;
        assert_eq!(first.images, second.images);
        assert_eq!(first.status, second.status);
        assert_eq!(generator.calls.load(Ordering::SeqCst), SLOT_COUNT - 1);
    }

    #[tokio::test]
    async fn empty_product_id_serves_uncached_fallback() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator.clone());

        let product = Product::new("", "Cat 6 STP", "Patchcords");
        let set = service.resolve_image_set(&product).await;

        assert_eq!(set.version, FALLBACK_VERSION);
        assert_eq!(set.state(), ResolutionState::AllPlaceholder);
        assert_eq!(service.cached_len().await, 0);
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn explicit_invalidation_forces_rebuild() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator.clone());

        service.resolve_image_set(&patchcord()).await;
        service.invalidate("pc1").await;
        assert_eq!(service.cached_len().await, 0);

        service.resolve_image_set(&patchcord()).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2 * (SLOT_COUNT - 1));
    }

    #[tokio::test]
    async fn invalidate_all_clears_every_entry() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        service.resolve_image_set(&patchcord()).await;
        service
            .resolve_image_set(&Product::new("pc2", "Cat 6 UTP", "Patchcords"))
            .await;
        assert_eq!(service.cached_len().await, 2);

        service.invalidate_all().await;
        assert_eq!(service.cached_len().await, 0);
    }

    #[tokio::test]
    async fn get_images_matches_resolved_set() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let product = patchcord();
        let images = service.get_images(&product).await;
        let set = service.get_image_set(&product).await;
        assert_eq!(images, set.images);
    }

    #[tokio::test]
    async fn prompt_text_is_deterministic_and_descriptive() {
        let validator = Arc::new(ScriptedValidator::default());
        let generator = Arc::new(ScriptedGenerator::default());
        let service = service_with(validator, generator);

        let a = service.resolve_image_set(&patchcord()).await;
        service.invalidate("pc1").await;
        let b = service.resolve_image_set(&patchcord()).await;

        assert_eq!(a.prompt_text, b.prompt_text);
        assert!(a.prompt_text.contains("shielded with braided shield"));
    }
}
