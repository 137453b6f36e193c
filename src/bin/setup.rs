//! Drops and recreates the `todos` table, then loads the seed rows.

use todo_api::config::{self, Config};
use todo_api::domain::repository::TodoRepository;
use todo_api::infrastructure::sqlite_repo::SqliteTodoRepository;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    todo_api::init_tracing();

    tracing::info!(database_url = %config.database_url, "resetting database");
    config::prepare_sqlite_file(&config.database_url)?;
    let repo = SqliteTodoRepository::connect(&config.database_url).await?;
    if let Err(err) = repo.reset().await {
        tracing::error!(error = ?err, "reset failed");
        return Err(err);
    }
    Ok(())
}
