use anyhow::{Context as _, Result};
use clap::Parser;
use leadbook_config as config;
use leadbook_server::{app, shutdown, AppState, Database};
use leadbook_store::paths;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error, info};

#[derive(Debug, Parser)]
#[command(name = "leadbook", version, about = "leadbook lead-tracking service")]
struct Cli {
    #[arg(long)]
    db_path: Option<PathBuf>,
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen port; overrides the config file and `PORT`
    #[arg(long)]
    port: Option<u16>,
    #[arg(long, short)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(err) => {
            error!(error = %err, "failed to start runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        port,
        verbose,
    } = cli;

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path = paths::resolve_db_path(db_path.or(app_config.database))
        .with_context(|| "resolve database path")?;
    debug!(path = %db_path.display(), "database path resolved");

    let db = Database::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;

    let port = port.unwrap_or(app_config.port);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "leadbook listening");

    axum::serve(listener, app(AppState::new(db.clone())))
        .with_graceful_shutdown(shutdown::ctrl_c())
        .await
        .with_context(|| "serve http")?;

    db.close().with_context(|| "close database")?;
    info!("leadbook stopped");
    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
