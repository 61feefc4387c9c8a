//! Admin-only views.

use std::collections::HashMap;

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use todos_core::domain::Todo;
use todos_shared::dto::{TodoResponse, UserTodosResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/admin/todos
///
/// All todos grouped by owning user with the username attached.
/// Admin role only.
pub async fn todos_by_user(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    if !identity.is_admin() {
        return Err(AppError::Forbidden);
    }

    let todos = state.todos.find_all().await?;

    // Group by owner, keeping first-seen order.
    let mut order: Vec<Uuid> = Vec::new();
    let mut groups: HashMap<Uuid, Vec<Todo>> = HashMap::new();
    for todo in todos {
        if !groups.contains_key(&todo.user_id) {
            order.push(todo.user_id);
        }
        groups.entry(todo.user_id).or_default().push(todo);
    }

    let mut body = Vec::with_capacity(order.len());
    for owner_id in order {
        // Users are never deleted, so a missing owner means a dangling
        // reference; drop the group rather than invent a username.
        let Some(owner) = state.users.find_by_id(owner_id).await? else {
            tracing::warn!(%owner_id, "Todos reference a missing user");
            continue;
        };

        let todos = groups.remove(&owner_id).unwrap_or_default();
        body.push(UserTodosResponse {
            user_id: owner_id,
            username: owner.username,
            todos: todos.into_iter().map(TodoResponse::from).collect(),
        });
    }

    Ok(HttpResponse::Ok().json(body))
}
