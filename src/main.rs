// Render the landing page for one simulated visitor session.
//
// Environment:
//   SHOWCASE_CONFIG   path to a JSON config file (optional)
//   POSTHOG_API_KEY   use PostHog for flags and analytics when set
//   POSTHOG_HOST      PostHog host (default https://us.i.posthog.com)
//   SHOWCASE_VARIANT  flag value to use when PostHog is not configured
//   RUST_LOG          log filter (default "info")

use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use voyagevista_showcase::{
    render_html, AnalyticsSink, Catalog, FlagProvider, LogSink, PostHogClient, PostHogConfig,
    Session, ShowcaseConfig, StaticFlagProvider,
};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn collaborators() -> Result<(Arc<dyn FlagProvider>, Arc<dyn AnalyticsSink>)> {
    match env::var("POSTHOG_API_KEY") {
        Ok(api_key) => {
            let mut config = PostHogConfig {
                api_key,
                ..Default::default()
            };
            if let Ok(host) = env::var("POSTHOG_HOST") {
                config.host = host;
            }
            let client = Arc::new(PostHogClient::new(config).context("invalid PostHog settings")?);
            Ok((client.clone(), client))
        }
        Err(_) => {
            let flag = env::var("SHOWCASE_VARIANT").ok();
            Ok((Arc::new(StaticFlagProvider::new(flag)), Arc::new(LogSink)))
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = match env::var("SHOWCASE_CONFIG") {
        Ok(path) => ShowcaseConfig::from_file(&path)
            .with_context(|| format!("failed to load config from {path}"))?,
        Err(_) => ShowcaseConfig::default(),
    };

    let (flags, sink) = collaborators()?;
    let session = Session::new(Arc::new(Catalog::seeded()), flags, sink, config)?;

    let variant = session.resolve_variant().await;
    info!(%variant, "Rendering landing page");
    println!("{}", render_html(&session.page_view()).into_string());

    session.shutdown();
    Ok(())
}
