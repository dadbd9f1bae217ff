//! HTTP URL validator
//!
//! Confirms an image URL is HTTPS and currently reachable with a single
//! HEAD probe. Any scheme other than `https`, any network failure and any
//! non-success status all count as invalid; there is no retry loop, callers
//! layer their own timeout policy if they need one beyond the probe timeout.

use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, redirect};
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::domain::services::UrlValidator;
use crate::infrastructure::config::ImageServiceConfig;

/// HEAD-probe based validator backed by a shared reqwest client.
#[derive(Clone)]
pub struct HttpUrlValidator {
    client: Client,
}

impl HttpUrlValidator {
    pub fn new() -> anyhow::Result<Self> {
        Self::with_config(&ImageServiceConfig::default())
    }

    pub fn with_config(config: &ImageServiceConfig) -> anyhow::Result<Self> {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.probe_timeout_seconds))
            .user_agent(&config.user_agent)
            .redirect(if config.follow_redirects {
                redirect::Policy::limited(10)
            } else {
                redirect::Policy::none()
            })
            .build()?;
        Ok(Self { client })
    }

    fn is_https(url: &str) -> bool {
        matches!(Url::parse(url), Ok(parsed) if parsed.scheme() == "https")
    }
}

#[async_trait]
impl UrlValidator for HttpUrlValidator {
    async fn validate(&self, url: &str) -> bool {
        if !Self::is_https(url) {
            debug!("Rejecting non-https url: {}", url);
            return false;
        }

        match self.client.head(url).send().await {
            Ok(response) => {
                let ok = response.status().is_success();
                if !ok {
                    debug!("Probe returned {} for {}", response.status(), url);
                }
                ok
            }
            Err(e) => {
                warn!("Probe failed for {}: {}", url, e);
                false
            }
        }
    }
}
