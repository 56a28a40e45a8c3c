//! Share links: a compose URL pre-filled with a fixed message.

use anyhow::{Context, Result};
use url::Url;

/// Compose endpoint of the Farcaster client.
pub const DEFAULT_COMPOSE_URL: &str = "https://warpcast.com/~/compose";

/// Public address of the mini-app, embedded in shared casts.
pub const APP_URL: &str = "https://fa-2048.vercel.app";

/// Pre-filled share message; the wording is fixed, only the score varies.
pub fn share_message(score: u64) -> String {
    format!("I scored {score} in 2048 on Farcaster! Can you beat it?")
}

/// Build `base?text=...&embeds[]=APP_URL`. The caller opens it; nothing is
/// awaited.
pub fn compose_url(base: &str, text: &str) -> Result<Url> {
    let mut url = Url::parse(base).with_context(|| format!("invalid compose url {base}"))?;
    url.query_pairs_mut()
        .append_pair("text", text)
        .append_pair("embeds[]", APP_URL);
    Ok(url)
}
