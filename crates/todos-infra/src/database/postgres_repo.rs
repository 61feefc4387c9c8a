//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use todos_core::domain::{Todo, User};
use todos_core::error::RepoError;
use todos_core::ports::{TodoRepository, UserRepository};

use super::entity::todo::{self, Entity as TodoEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL todo repository.
pub type PostgresTodoRepository = PostgresBaseRepository<TodoEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(%username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find_by_owner(&self, owner_id: uuid::Uuid) -> Result<Vec<Todo>, RepoError> {
        let result = TodoEntity::find()
            .filter(todo::Column::UserId.eq(owner_id))
            .order_by_asc(todo::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn find_all(&self) -> Result<Vec<Todo>, RepoError> {
        let result = TodoEntity::find()
            .order_by_asc(todo::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
