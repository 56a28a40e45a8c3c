use std::sync::Arc;

use anyhow::{Result, bail};
use axum::{Router, routing::get};

use crate::routes;

/// Manifest hosted by the Farcaster client for this mini-app.
pub const HOSTED_MANIFEST_URL: &str =
    "https://api.farcaster.xyz/miniapps/hosted-manifest/01982bca-3c94-fb3e-3a5c-b325f6fa1961";

/// Static site metadata shared by all handlers.
#[derive(Debug)]
pub struct SiteConfig {
    pub base_url: String,
    pub manifest_url: String,
}

impl SiteConfig {
    pub fn new(base_url: &str, manifest_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/');
        for (name, value) in [("base url", base_url), ("manifest url", manifest_url)] {
            if !(value.starts_with("https://") || value.starts_with("http://")) {
                bail!("{name} must be an http(s) URL, got {value:?}");
            }
        }
        Ok(Self {
            base_url: base_url.to_string(),
            manifest_url: manifest_url.to_string(),
        })
    }

    pub fn banner_url(&self) -> String {
        format!("{}/banner.png", self.base_url)
    }

    pub fn frame_post_url(&self) -> String {
        format!("{}/api/frame", self.base_url)
    }
}

#[derive(Clone)]
pub struct AppState {
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(site: SiteConfig) -> Self {
        Self {
            site: Arc::new(site),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(routes::health))
        .route("/.well-known/farcaster.json", get(routes::manifest))
        .route("/api/frame", get(routes::frame_get).post(routes::frame_post))
        .with_state(state)
}
