//! Todo CRUD handlers.
//!
//! Every route here runs behind the `Identity` extractor; ownership rules
//! are decided by `todos_core::policy` rather than per-route checks.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use todos_core::domain::Todo;
use todos_core::policy::{TodoScope, can_access};
use todos_shared::dto::{CreateTodoRequest, MessageResponse, TodoResponse, UpdateTodoRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/todos
///
/// Admin callers see every todo; everyone else only their own. The scope is
/// applied at the query, not filtered after the fact.
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let todos = match TodoScope::for_caller(identity.role, identity.user_id) {
        TodoScope::All => state.todos.find_all().await?,
        TodoScope::Owner(owner_id) => state.todos.find_by_owner(owner_id).await?,
    };

    let body: Vec<TodoResponse> = todos.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/todos
///
/// The owner is always the authenticated caller; no policy check needed.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateTodoRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }

    let todo = Todo::new(identity.user_id, req.title, req.completed.unwrap_or(false));
    let saved = state.todos.insert(todo).await?;

    tracing::debug!(todo_id = %saved.id, owner = %saved.user_id, "Todo created");

    Ok(HttpResponse::Created().json(TodoResponse::from(saved)))
}

/// PUT /api/todos/{id}
///
/// Partial update: absent fields are unchanged, `updated_at` is refreshed.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateTodoRequest>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let req = body.into_inner();

    let mut todo = state
        .todos
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    if !can_access(identity.role, identity.user_id, todo.user_id) {
        return Err(AppError::Forbidden);
    }

    todo.apply_patch(req.title, req.completed);
    let saved = state.todos.update(todo).await?;

    Ok(HttpResponse::Ok().json(TodoResponse::from(saved)))
}

/// DELETE /api/todos/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let todo = state
        .todos
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Todo not found".to_string()))?;

    if !can_access(identity.role, identity.user_id, todo.user_id) {
        return Err(AppError::Forbidden);
    }

    state.todos.delete(id).await?;

    tracing::debug!(todo_id = %id, "Todo deleted");

    Ok(HttpResponse::Ok().json(MessageResponse::new("Todo deleted successfully")))
}
