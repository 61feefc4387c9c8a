use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Todo, User};
use crate::error::RepoError;

/// Generic repository trait defining standard per-record operations.
///
/// `insert` and `update` are separate so adapters can map them onto the
/// store's native create/update statements.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Fails with `Constraint` on uniqueness violations.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity in full. Fails with `NotFound` if absent.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID. Fails with `NotFound` if absent.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository. No user update/delete is exposed by the API, so the
/// domain-specific surface is lookup only.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their unique username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Todo repository with ownership-scoped queries.
#[async_trait]
pub trait TodoRepository: BaseRepository<Todo, Uuid> {
    /// All todos owned by a single user.
    async fn find_by_owner(&self, owner_id: Uuid) -> Result<Vec<Todo>, RepoError>;

    /// All todos across all owners (admin scope).
    async fn find_all(&self) -> Result<Vec<Todo>, RepoError>;
}
