//! searchfront: HTTP front-end for an Elasticsearch-compatible search engine
//!
//! This is the main entry point for the application.

use anyhow::{bail, Result};
use searchfront::{
    catalog,
    config::{self, Settings},
    engine::{check_connection, ElasticClient},
    network::HttpClient,
    web::{create_router, route_path, AppState},
    SearchMode,
};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

enum Command {
    Serve,
    Seed(PathBuf),
    Help,
    Version,
}

fn parse_args() -> Result<Command> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("serve") => Ok(Command::Serve),
        Some("seed") => match args.next() {
            Some(path) => Ok(Command::Seed(PathBuf::from(path))),
            None => bail!("seed requires a path to a JSON array of documents"),
        },
        Some("-h") | Some("--help") => Ok(Command::Help),
        Some("-V") | Some("--version") => Ok(Command::Version),
        Some(other) => bail!("unknown command: {}", other),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let command = match parse_args() {
        Ok(command) => command,
        Err(e) => {
            eprintln!("error: {}", e);
            print_usage();
            std::process::exit(2);
        }
    };

    match command {
        Command::Help => {
            print_usage();
            return Ok(());
        }
        Command::Version => {
            println!("searchfront {}", searchfront::VERSION);
            return Ok(());
        }
        _ => {}
    }

    let settings_path = config::find_settings_file();
    let settings = config::load(settings_path.as_ref())?;

    init_logging(settings.general.debug);

    info!("Starting searchfront v{}", searchfront::VERSION);
    match settings_path {
        Some(ref path) => info!("Loaded settings from: {}", path.display()),
        None => info!("No settings file found, using defaults"),
    }

    let client = HttpClient::with_settings(&settings.outgoing)?;
    let elastic = ElasticClient::new(&settings.engine, client)?;
    info!("Search engine node: {}", elastic.base_url());

    let connected = check_connection(
        &elastic,
        settings.engine.connect_attempts,
        settings.engine.retry_delay(),
    )
    .await;

    match command {
        Command::Seed(path) => {
            if !connected {
                error!("Failed to connect to the search engine. Make sure it is running.");
                std::process::exit(1);
            }
            seed(&settings, &elastic, &path).await
        }
        _ => {
            if !connected {
                warn!("Search engine unreachable; serving anyway, /health will report it");
            }
            serve(settings, elastic).await
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

async fn serve(settings: Settings, elastic: ElasticClient) -> Result<()> {
    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, Arc::new(elastic));
    info!("Application state initialized for instance: {}", state.instance_name());

    let app = create_router(state);

    info!("Starting server on http://{}", addr);
    info!("- Health check: http://{}/health", addr);
    for mode in SearchMode::ALL {
        info!("- {} search: http://{}{}", mode, addr, route_path(mode));
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed(settings: &Settings, elastic: &ElasticClient, path: &Path) -> Result<()> {
    let index = &settings.engine.index;
    elastic
        .ensure_index(index, &catalog::index_definition())
        .await?;

    let documents = catalog::load_documents(path)?;
    info!("Read {} documents from {}", documents.len(), path.display());

    let report = elastic.bulk_index(index, &documents).await?;
    if report.has_failures() {
        warn!(
            "Bulk indexing had errors: {} indexed, {} failed",
            report.indexed,
            report.failures.len()
        );
    } else {
        info!("Successfully indexed {} documents", report.indexed);
    }

    info!("Data seeding completed");
    Ok(())
}

/// Print usage information
fn print_usage() {
    println!(
        r#"
searchfront v{}
HTTP front-end for an Elasticsearch-compatible search engine

USAGE:
    searchfront [serve]          Start the HTTP server
    searchfront seed <FILE>      Create the index and bulk-load a JSON array of documents

OPTIONS:
    -h, --help             Print help information
    -V, --version          Print version information

ENVIRONMENT VARIABLES:
    SEARCHFRONT_SETTINGS_PATH  Path to settings.yml
    SEARCHFRONT_DEBUG          Enable debug logging (true/false)
    ELASTIC_NODE               Search engine URL
    ELASTIC_INDEX              Index name
    ELASTIC_API_KEY            API key for the search engine
    PORT                       Server port
    BIND_ADDRESS               Bind address
"#,
        searchfront::VERSION
    );
}
