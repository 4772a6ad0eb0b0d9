use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use pizza_restaurant_service::handlers::{AppState, app};
use pizza_restaurant_service::{DEFAULT_PORT, database_url, establish_pool, run_migrations, seed};

#[derive(Parser)]
#[command(version)]
struct Cli {
    /// Port to listen on
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Replace the database contents with sample restaurants and pizzas
    Seed,
}

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let database_url = database_url();
    let pool = establish_pool(&database_url)?;
    run_migrations(&pool)?;
    info!(%database_url, "database ready");

    match cli.command {
        Some(Commands::Seed) => {
            let conn = &mut pool.get()?;
            seed::run(conn)?;
            Ok(())
        }
        None => {
            let app = app(AppState { pool });
            let listener = tokio::net::TcpListener::bind(("0.0.0.0", cli.port)).await?;
            info!("listening on {}", listener.local_addr()?);

            axum::serve(listener, app).await?;
            Ok(())
        }
    }
}
