use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use twenty48_utils::identity::DisplayIdentity;

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Config {
    /// SQLite file holding the persisted high score.
    #[serde(default = "defaults::db_path")]
    pub db_path: PathBuf,

    /// Scope for keys in the store, so several profiles can share one file.
    #[serde(default = "defaults::namespace")]
    pub namespace: String,

    /// Fixed RNG seed for reproducible games. Entropy-seeded when omitted.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Identity offered by `login`. Without it the player stays signed out.
    #[serde(default)]
    pub identity: Option<DisplayIdentity>,

    #[serde(default)]
    pub share: Share,
}

#[derive(Clone, Debug, PartialEq, serde::Deserialize)]
pub struct Share {
    #[serde(default = "defaults::compose_url")]
    pub compose_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: defaults::db_path(),
            namespace: defaults::namespace(),
            seed: None,
            identity: None,
            share: Share::default(),
        }
    }
}

impl Default for Share {
    fn default() -> Self {
        Self {
            compose_url: defaults::compose_url(),
        }
    }
}

impl Config {
    pub fn from_toml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Self = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        Ok(cfg)
    }
}

mod defaults {
    use std::path::PathBuf;

    pub fn db_path() -> PathBuf { PathBuf::from("fa2048.db") }
    pub fn namespace() -> String { "default".to_string() }
    pub fn compose_url() -> String { twenty48_utils::share::DEFAULT_COMPOSE_URL.to_string() }
}
