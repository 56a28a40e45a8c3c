use clap::Parser;

#[derive(Parser, Debug)]
#[command(author, version, about = "Serve the fa-2048 mini-app manifest and frame")]
pub struct Args {
    /// Public base URL of the deployed app, used in frame meta tags.
    #[arg(long, default_value = twenty48_utils::share::APP_URL)]
    pub base_url: String,
    /// Hosted manifest that `/.well-known/farcaster.json` redirects to.
    #[arg(long, default_value = crate::app::HOSTED_MANIFEST_URL)]
    pub manifest_url: String,
    /// Host interface to bind (default 0.0.0.0).
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,
    /// Port to bind (default 8080).
    #[arg(long, default_value_t = 8080)]
    pub port: u16,
    /// Optional tracing filter, e.g. "info", "debug".
    #[arg(long, default_value = "info")]
    pub log: String,
}
