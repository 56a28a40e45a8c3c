//! Identity capability: who is signed in, for display only.
//!
//! Nothing in the game rules depends on identity; the game is fully playable
//! while signed out.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Display identity of a signed-in Farcaster user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayIdentity {
    pub username: String,
    pub fid: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

pub trait IdentityProvider {
    fn is_ready(&self) -> bool;
    fn is_authenticated(&self) -> bool;
    /// Present only while authenticated.
    fn identity(&self) -> Option<DisplayIdentity>;
    /// Start the provider's sign-in flow.
    fn login(&mut self);
}

/// Which of the three authentication states to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthView {
    Loading,
    SignedOut,
    SignedIn(DisplayIdentity),
}

impl AuthView {
    pub fn from_provider<P: IdentityProvider + ?Sized>(provider: &P) -> Self {
        if !provider.is_ready() {
            return AuthView::Loading;
        }
        match (provider.is_authenticated(), provider.identity()) {
            (true, Some(identity)) => AuthView::SignedIn(identity),
            _ => AuthView::SignedOut,
        }
    }
}

impl fmt::Display for AuthView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthView::Loading => f.write_str("Loading authentication..."),
            AuthView::SignedOut => f.write_str("Sign in with Farcaster"),
            AuthView::SignedIn(id) => write!(f, "Signed in as {} (FID: {})", id.username, id.fid),
        }
    }
}

/// Provider that is always ready and never signs anyone in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl IdentityProvider for Anonymous {
    fn is_ready(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        false
    }

    fn identity(&self) -> Option<DisplayIdentity> {
        None
    }

    fn login(&mut self) {}
}

/// Provider backed by a locally configured identity. `login` succeeds
/// immediately when an identity is configured.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredIdentity {
    configured: Option<DisplayIdentity>,
    signed_in: bool,
}

impl ConfiguredIdentity {
    pub fn new(configured: Option<DisplayIdentity>) -> Self {
        Self {
            configured,
            signed_in: false,
        }
    }
}

impl IdentityProvider for ConfiguredIdentity {
    fn is_ready(&self) -> bool {
        true
    }

    fn is_authenticated(&self) -> bool {
        self.signed_in
    }

    fn identity(&self) -> Option<DisplayIdentity> {
        if self.signed_in {
            self.configured.clone()
        } else {
            None
        }
    }

    fn login(&mut self) {
        if self.configured.is_some() {
            self.signed_in = true;
        } else {
            log::warn!("login requested but no identity is configured");
        }
    }
}
