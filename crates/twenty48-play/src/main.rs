mod config;
mod play;
mod store;

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use twenty48_utils::identity::ConfiguredIdentity;
use twenty48_utils::session::GameSession;

use config::Config;
use store::SqliteStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Play 2048 in the terminal")]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "FILE", value_parser = clap::value_parser!(PathBuf))]
    config: Option<PathBuf>,

    /// SQLite file for the high score (overrides config)
    #[arg(long, value_name = "FILE")]
    db: Option<PathBuf>,

    /// RNG seed for a reproducible game (overrides config)
    #[arg(long, value_name = "N")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let mut cfg = match &args.config {
        Some(path) => {
            info!("Using configuration file: {}", path.display());
            Config::from_toml(path)?
        }
        None => Config::default(),
    };
    if let Some(db) = args.db {
        cfg.db_path = db;
    }
    if let Some(seed) = args.seed {
        cfg.seed = Some(seed);
    }

    let store = SqliteStore::open(&cfg.db_path, cfg.namespace.clone())?;
    let db_display = store.path().display().to_string();
    let rng = match cfg.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let identity = ConfiguredIdentity::new(cfg.identity.clone());
    let mut session = GameSession::new(store, Box::new(identity), rng);
    info!(
        "loaded high score {} from {} [{}]",
        session.high_score(),
        db_display,
        cfg.namespace
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    play::run(&mut session, stdin.lock(), &mut stdout, &cfg.share.compose_url)
}
