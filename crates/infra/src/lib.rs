mod config;
mod queue;
mod repos;
mod system;

pub use config::Config;
pub use queue::{IDelayQueue, InMemoryDelayQueue, PostgresDelayQueue};
pub use repos::{INotificationRepo, IReminderNotificationRepo, IReminderRepo, Repos};
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct Context {
    pub repos: Repos,
    /// The delay queue is process-wide shared infrastructure. It is
    /// injected here so that the use cases can be exercised against an
    /// in-memory queue.
    pub queue: Arc<dyn IDelayQueue>,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

struct ContextParams {
    pub postgres_connection_string: String,
}

impl Context {
    async fn create(params: ContextParams) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(&params.postgres_connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        Self {
            repos: Repos::create_postgres(pool.clone()),
            queue: Arc::new(PostgresDelayQueue::new(pool)),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }

    pub fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            queue: Arc::new(InMemoryDelayQueue::new()),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> Context {
    Context::create(ContextParams {
        postgres_connection_string: get_psql_connection_string(),
    })
    .await
}

/// Context backed by in-memory repositories and queue. Used by tests and
/// for local development without a database.
pub fn setup_context_inmemory() -> Context {
    Context::create_inmemory()
}

fn get_psql_connection_string() -> String {
    const PSQL_CONNECTION_STRING: &str = "DATABASE_URL";

    std::env::var(PSQL_CONNECTION_STRING)
        .unwrap_or_else(|_| panic!("{} env var to be present.", PSQL_CONNECTION_STRING))
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&get_psql_connection_string())
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
