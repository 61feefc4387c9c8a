//! Application state - shared across all handlers.

use std::sync::Arc;

use todos_core::ports::{TodoRepository, UserRepository};
use todos_infra::database::DatabaseConfig;
use todos_infra::memory::{InMemoryTodoRepository, InMemoryUserRepository};

#[cfg(feature = "postgres")]
use todos_infra::database::{PostgresTodoRepository, PostgresUserRepository, connect};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub todos: Arc<dyn TodoRepository>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(config) = db_config {
            match connect(config).await {
                Ok(conn) => {
                    tracing::info!("Application state initialized (postgres)");
                    return Self {
                        users: Arc::new(PostgresUserRepository::new(conn.clone())),
                        todos: Arc::new(PostgresTodoRepository::new(conn)),
                    };
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                }
            }
        }

        #[cfg(not(feature = "postgres"))]
        let _ = db_config;

        tracing::warn!("Database not configured. Running in-memory; data is lost on restart.");
        Self::in_memory()
    }

    /// State backed by in-memory repositories. Used as the no-database
    /// fallback and by handler tests.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            todos: Arc::new(InMemoryTodoRepository::new()),
        }
    }
}
