//! lingo-server - translation practice API
//!
//! Serves practice sentences, scores translations, and proxies
//! similar-sentence and grammar-refinement requests to a generative model.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use lingo_common::config::{load_toml_config, ConfigOverrides, ServerConfig};
use lingo_common::Corpus;
use lingo_server::llm::GeminiClient;
use lingo_server::{build_router, cors_layer, AppState};
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Command-line arguments for lingo-server
///
/// Every flag can also be set through its environment variable; both take
/// precedence over the TOML config file.
#[derive(Parser, Debug)]
#[command(name = "lingo-server")]
#[command(about = "Translation practice API server")]
#[command(version)]
struct Args {
    /// TOML config file (default: <config dir>/lingo/config.toml if present)
    #[arg(short, long, env = "LINGO_CONFIG")]
    config: Option<PathBuf>,

    /// Address to bind
    #[arg(long, env = "LINGO_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,

    /// Browser origin allowed by CORS
    #[arg(long, env = "FRONTEND_URL")]
    frontend_origin: Option<String>,

    /// JSON corpus file (default: built-in corpus)
    #[arg(long, env = "LINGO_CORPUS")]
    corpus: Option<PathBuf>,

    /// Scores below this offer similar sentences (0-100)
    #[arg(long, env = "LINGO_SIMILAR_THRESHOLD")]
    similar_threshold: Option<u8>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "LINGO_LLM_MODEL")]
    model: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LINGO_LOG_LEVEL")]
    log_level: Option<String>,
}

impl Args {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            host: self.host,
            port: self.port,
            frontend_origin: self.frontend_origin,
            corpus_path: self.corpus,
            similar_threshold: self.similar_threshold,
            api_key: self.api_key,
            model: self.model,
            log_level: self.log_level,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = Args::parse();

    // Configuration must resolve before tracing: it carries the log level
    let config_file = args.config.take();
    let toml = load_toml_config(config_file.as_deref()).context("Failed to load config file")?;
    let config =
        ServerConfig::resolve(args.into_overrides(), toml).context("Invalid configuration")?;

    init_tracing(&config.log_level);

    info!("Starting lingo-server v{}", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &config_file {
        info!("Config file: {}", path.display());
    }

    let corpus = Corpus::load_or_builtin(config.corpus_path.as_deref())
        .context("Failed to load practice corpus")?;
    info!("Corpus ready: {} practice items", corpus.len());

    if config.llm.api_key.is_none() {
        warn!("No Gemini API key configured; similar-sentence and grammar requests will fail");
    }
    let llm = GeminiClient::new(&config.llm).context("Failed to create Gemini client")?;
    info!("Generative model: {}", llm.model());

    let cors = cors_layer(&config.frontend_origin).context("Invalid frontend origin")?;
    info!("CORS origin: {}", config.frontend_origin);
    info!(
        "Similar sentences offered below {}% accuracy",
        config.policy.similar_threshold
    );

    let state = AppState::new(corpus, Arc::new(llm), config.policy);
    let app = build_router(state, cors);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let received = wait_for_stop_signal().await;
            info!(signal = received, "Stop requested, draining connections");
        })
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing; RUST_LOG overrides the configured level
fn init_tracing(level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("lingo_server={level},lingo_common={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Resolves with the name of the first stop signal received
///
/// Ctrl+C is always watched; SIGTERM is added on Unix when its handler can
/// be installed.
async fn wait_for_stop_signal() -> &'static str {
    #[cfg(unix)]
    {
        use signal::unix::{signal as unix_signal, SignalKind};

        match unix_signal(SignalKind::terminate()) {
            Ok(mut sigterm) => tokio::select! {
                _ = signal::ctrl_c() => "SIGINT",
                _ = sigterm.recv() => "SIGTERM",
            },
            Err(e) => {
                warn!("SIGTERM handler unavailable, only Ctrl+C will stop the server: {}", e);
                wait_for_ctrl_c().await
            }
        }
    }

    #[cfg(not(unix))]
    {
        wait_for_ctrl_c().await
    }
}

async fn wait_for_ctrl_c() -> &'static str {
    if let Err(e) = signal::ctrl_c().await {
        // Without a handler the server runs until killed
        warn!("Ctrl+C handler unavailable: {}", e);
        std::future::pending::<()>().await;
    }
    "SIGINT"
}
