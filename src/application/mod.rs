//! Application layer - use case orchestration
//!
//! Hosts the image resolution service that ties the domain's trait seams
//! together with the owned cache.

pub mod image_service;

pub use image_service::ImageResolutionService;
