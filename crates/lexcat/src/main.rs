use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, info};
use tracing_subscriber::EnvFilter;
use wordnet_categories::{CategoryEngine, DEFAULT_EXPORT_ORDER, export_to_path};
use wordnet_db::{LoadMode, WordNet};

use lexcat::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_WORDNET_PATH: &str = "wordnet/dict";
const DEFAULT_WORDNET_IMAGE_PATH: &str = "/app/wordnet";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!(
        "using wordnet at {} (mode: {:?})",
        config.wordnet_path.display(),
        config.wordnet_mode
    );

    let wn_start = Instant::now();
    let wordnet = Arc::new(
        WordNet::load_with_mode(&config.wordnet_path, config.wordnet_mode)
            .with_context(|| format!("loading WordNet from {}", config.wordnet_path.display()))?,
    );
    info!(
        "wordnet loaded in {} ms ({} synsets, {} lemmas)",
        wn_start.elapsed().as_millis(),
        wordnet.synset_count(),
        wordnet.lemma_count()
    );

    if let Some(path) = &config.export_path {
        let start = Instant::now();
        let summary = export_to_path(CategoryEngine::new(&wordnet), &DEFAULT_EXPORT_ORDER, path)?;
        info!(
            "export of {} lemmas finished in {} ms",
            summary.records,
            start.elapsed().as_millis()
        );
        return Ok(());
    }

    info!("binding to {}:{}", config.host, config.port);
    if config.disable_cache {
        info!("cache headers disabled");
    }

    let state = AppState {
        wordnet,
        disable_cache: config.disable_cache,
    };
    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    wordnet_path: PathBuf,
    wordnet_mode: LoadMode,
    disable_cache: bool,
    export_path: Option<PathBuf>,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_wordnet_dir: Option<PathBuf> = None;
    let mut cli_wordnet_mode: Option<LoadMode> = None;
    let mut cli_export: Option<PathBuf> = None;
    let mut args = env::args().skip(1).peekable();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--wordnet-dir" => {
                if let Some(path) = args.next() {
                    cli_wordnet_dir = Some(PathBuf::from(path));
                }
            }
            "--export" => {
                if let Some(path) = args.next() {
                    cli_export = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--wordnet-dir=") {
                    cli_wordnet_dir = Some(PathBuf::from(path));
                } else if let Some(mode) = arg.strip_prefix("--wordnet-mode=") {
                    cli_wordnet_mode = parse_load_mode(mode);
                } else if let Some(path) = arg.strip_prefix("--export=") {
                    cli_export = Some(PathBuf::from(path));
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let wordnet_path = cli_wordnet_dir
        .or_else(|| env::var("WORDNET_DIR").ok().map(PathBuf::from))
        .unwrap_or_else(default_wordnet_path);
    let wordnet_mode = cli_wordnet_mode
        .or_else(|| {
            env::var("WORDNET_LOAD_MODE")
                .ok()
                .as_deref()
                .and_then(parse_load_mode)
        })
        .unwrap_or(LoadMode::Mmap);
    let export_path = cli_export.or_else(|| env::var("EXPORT_PATH").ok().map(PathBuf::from));

    Config {
        host,
        port,
        wordnet_path,
        wordnet_mode,
        disable_cache,
        export_path,
    }
}

fn default_wordnet_path() -> PathBuf {
    let local = PathBuf::from(DEFAULT_WORDNET_PATH);
    if local.exists() {
        return local;
    }
    PathBuf::from(DEFAULT_WORDNET_IMAGE_PATH)
}

fn parse_load_mode(raw: &str) -> Option<LoadMode> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Some(LoadMode::Mmap),
        "owned" => Some(LoadMode::Owned),
        _ => None,
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
