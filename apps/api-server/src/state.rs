//! Application state - shared across all handlers.

use std::sync::Arc;

use scribe_core::ports::{CommentRepository, PostRepository, TagRepository, UserRepository};
use scribe_infra::database::{
    DatabaseConfig, DatabaseConnections, DbErr, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
}

impl AppState {
    /// Build the application state on top of the database pool.
    pub async fn new(config: &DatabaseConfig) -> Result<Self, DbErr> {
        let connections = DatabaseConnections::init(config).await?;
        let db = connections.main;

        tracing::info!("Application state initialized");

        Ok(Self {
            users: Arc::new(PostgresUserRepository::new(db.clone())),
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db)),
        })
    }
}
