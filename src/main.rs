use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use slate_board::api::state::AppState;
use slate_board::api::{build_router, with_cors};
use slate_board::config::AppConfig;
use slate_board::slate::load_slate;
use slate_board::store::MongoStore;
use slate_board::table::{render_text_table, SortColumn, SortDirection, SortState};

#[derive(Parser)]
#[command(name = "slate-board")]
#[command(about = "NBA player matchup slate board")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the sorted slate table
    Table {
        /// Column to sort by (games_played, PTS, REB, AST, 3PM, STL, BLK)
        #[arg(long, default_value = "PTS")]
        sort: SortColumn,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// Slate file (defaults to the configured one)
        #[arg(long)]
        slate: Option<PathBuf>,
    },
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_tracing(level, cli.json_logs);

    tracing::info!("Starting slate-board v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            let state = AppState {
                store: Arc::new(MongoStore::from_config(&config.database)),
                collection: config.database.collection.clone(),
                slate: Arc::new(config.slate.clone()),
            };
            let app = with_cors(build_router(state), &config.server.cors_origin);

            let host = host.unwrap_or_else(|| config.server.host.clone());
            let port = port.unwrap_or(config.server.port);
            let addr = format!("{}:{}", host, port);
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {}", addr))?;

            tracing::info!("Serving slate from {:?}", config.slate.slate_path());
            tracing::info!("Dashboard: http://{}/nba", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Table { sort, desc, slate } => {
            let path = slate.unwrap_or_else(|| config.slate.slate_path());
            let rows = load_slate(&path).await?;

            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            let state = SortState::new(sort, direction);

            print!("{}", render_text_table(&rows, &state));
            println!("\n{} players, sorted by {} {}", rows.len(), sort, direction.code());
        }
    }

    Ok(())
}
