use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Redirect},
};
use serde::Serialize;
use tracing::debug;

use crate::app::{AppState, SiteConfig};

#[derive(Serialize)]
pub(crate) struct HealthResponse {
    status: String,
    version: String,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `/.well-known/farcaster.json`: temporary redirect to the hosted manifest.
pub async fn manifest(State(state): State<AppState>) -> Redirect {
    debug!("redirecting manifest request" = %state.site.manifest_url);
    Redirect::temporary(&state.site.manifest_url)
}

pub async fn frame_get(State(state): State<AppState>) -> impl IntoResponse {
    html_response(frame_html(&state.site, FrameStage::SignIn))
}

pub async fn frame_post(State(state): State<AppState>) -> impl IntoResponse {
    html_response(frame_html(&state.site, FrameStage::SignedIn))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FrameStage {
    SignIn,
    SignedIn,
}

fn html_response(body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/html"),
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body,
    )
}

fn frame_html(site: &SiteConfig, stage: FrameStage) -> String {
    let mut meta: Vec<(&str, String)> = Vec::new();
    match stage {
        FrameStage::SignIn => {
            meta.push(("og:title", "Sign in with Farcaster".to_string()));
            meta.push(("og:image", site.banner_url()));
            meta.push((
                "og:description",
                "Sign in to 2048 with your Farcaster account!".to_string(),
            ));
            meta.push(("fc:frame", "vNext".to_string()));
            meta.push(("fc:frame:button:1", "Sign in".to_string()));
            meta.push(("fc:frame:post_url", site.frame_post_url()));
        }
        FrameStage::SignedIn => {
            meta.push(("og:title", "Signed in with Farcaster!".to_string()));
            meta.push(("og:image", site.banner_url()));
            meta.push((
                "og:description",
                "You are now signed in to 2048 with Farcaster.".to_string(),
            ));
            meta.push(("fc:frame", "vNext".to_string()));
        }
    }
    let mut head = String::new();
    for (property, content) in meta {
        head.push_str(&format!(
            "    <meta property=\"{}\" content=\"{}\" />\n",
            property,
            escape_attr(&content)
        ));
    }
    format!("<html>\n  <head>\n{head}  </head>\n  <body></body>\n</html>\n")
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
