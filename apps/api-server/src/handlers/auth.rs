//! Registration and login handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use todos_core::domain::User;
use todos_core::ports::{PasswordService, TokenService};
use todos_shared::dto::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    if req.username.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password required".to_string(),
        ));
    }

    // The unique column is the backstop; this check gives a clean 409.
    if state
        .users
        .find_by_username(&req.username)
        .await?
        .is_some()
    {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = User::new(req.username, password_hash, req.role.unwrap_or_default());
    let saved = state.users.insert(user).await?;

    tracing::info!(user_id = %saved.id, "User registered");

    Ok(HttpResponse::Created().json(MessageResponse::new("User registered successfully")))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    // Same response for unknown user and wrong password.
    let invalid = || AppError::BadRequest("Invalid username or password".to_string());

    let user = state
        .users
        .find_by_username(&req.username)
        .await?
        .ok_or_else(invalid)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(invalid());
    }

    let token = token_service
        .issue_token(user.id, &user.username, user.role)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(TokenResponse { token }))
}
