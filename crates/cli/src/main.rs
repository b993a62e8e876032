//! `taxonomy-api` CLI entry-point.
//!
//! Available sub-commands:
//! - `serve`   - start the API server (optionally migrating first).
//! - `migrate` - run pending database migrations.

mod logging;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "taxonomy-api",
    about = "CRUD API for domains, subdomains, skills and job titles",
    version
)]
struct Cli {
    /// Log filter, e.g. `info` or `api=debug,db=debug`. `RUST_LOG` overrides it.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the REST API server.
    Serve {
        #[arg(long, default_value = "0.0.0.0:8080")]
        bind: String,

        #[arg(long, env = "DATABASE_URL")]
        database_url: String,

        #[arg(long, default_value_t = 10)]
        max_connections: u32,

        /// Apply pending migrations before accepting requests.
        #[arg(long)]
        migrate: bool,
    },
    /// Run pending database migrations.
    Migrate {
        #[arg(long, env = "DATABASE_URL")]
        database_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(&cli.log_level)?;

    match cli.command {
        Command::Serve { bind, database_url, max_connections, migrate } => {
            let pool = db::pool::create_pool(&database_url, max_connections)
                .await
                .context("failed to connect to database")?;
            if migrate {
                db::pool::run_migrations(&pool).await.context("migration failed")?;
            }
            info!("starting API server on {bind}");
            api::serve(&bind, pool).await.context("API server failed")?;
        }
        Command::Migrate { database_url } => {
            let pool = db::pool::create_pool(&database_url, 2)
                .await
                .context("failed to connect to database")?;
            db::pool::run_migrations(&pool).await.context("migration failed")?;
            info!("migrations applied successfully");
        }
    }

    Ok(())
}
