use std::env;
use std::error::Error;

use diesel::SqliteConnection;
use diesel::connection::SimpleConnection;
use diesel::r2d2::{self, ConnectionManager, CustomizeConnection, Pool};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use dotenvy::dotenv;
use tracing::info;

pub mod error;
pub mod handlers;
pub mod models;
pub mod schema;
pub mod seed;
pub mod serializer;
pub mod store;
pub mod validation;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// `app.db` beside the service sources, like the migrations directory.
pub const DEFAULT_DATABASE_URL: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/app.db");
pub const DEFAULT_PORT: u16 = 5555;

/// Checked in order; the first non-empty value wins.
pub const DATABASE_URL_VARS: [&str; 2] = ["DATABASE_URL", "DB_URI"];

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Reads the database location from the environment (honoring `.env`).
pub fn database_url() -> String {
    dotenv().ok();

    resolve_database_url(|key| env::var(key).ok())
}

fn resolve_database_url(lookup: impl Fn(&str) -> Option<String>) -> String {
    let url = DATABASE_URL_VARS
        .into_iter()
        .filter_map(&lookup)
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string());
    sqlite_path(&url).to_string()
}

/// Turns `sqlite:///relative.db`, `sqlite:////abs/path.db` and
/// `sqlite://path.db` into the filename SQLite expects.
fn sqlite_path(url: &str) -> &str {
    url.strip_prefix("sqlite:///")
        .or_else(|| url.strip_prefix("sqlite://"))
        .unwrap_or(url)
}

/// Milliseconds a connection waits on another writer's lock before failing.
pub const BUSY_TIMEOUT_MS: u32 = 5000;

/// Per-connection SQLite settings: foreign keys are off unless asked, and
/// pooled connections to one file must queue on locks rather than fail.
#[derive(Debug)]
struct SqliteConnectionOptions;

impl CustomizeConnection<SqliteConnection, r2d2::Error> for SqliteConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}; \
             PRAGMA journal_mode = WAL; \
             PRAGMA foreign_keys = ON;"
        ))
        .map_err(r2d2::Error::QueryError)
    }
}

fn pool_builder() -> r2d2::Builder<ConnectionManager<SqliteConnection>> {
    Pool::builder().connection_customizer(Box::new(SqliteConnectionOptions))
}

pub fn establish_pool(database_url: &str) -> Result<DbPool, r2d2::PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    pool_builder().build(manager)
}

pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn Error + Send + Sync>> {
    let mut pooled = pool.get()?;
    let conn: &mut SqliteConnection = &mut pooled;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        info!(%version, "applied migration");
    }
    Ok(())
}
