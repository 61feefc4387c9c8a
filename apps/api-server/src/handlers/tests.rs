//! Handler-level tests over the in-memory repositories.
//!
//! Exercises the full request path: JSON body -> bearer extractor ->
//! policy -> store -> serialized response.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use serde_json::json;
use uuid::Uuid;

use todos_core::domain::Role;
use todos_core::ports::{PasswordService, TokenService};
use todos_infra::auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
use todos_shared::dto::{TodoResponse, TokenResponse, UserTodosResponse};

use crate::handlers::configure_routes;
use crate::state::AppState;

const TEST_SECRET: &str = "test-jwt-secret";
const TEST_ISSUER: &str = "todos-api-test";

fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        expiration_hours: 1,
        issuer: TEST_ISSUER.to_string(),
    }
}

fn test_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(test_jwt_config()));
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    App::new()
        .app_data(web::Data::new(state))
        .app_data(web::Data::new(token_service))
        .app_data(web::Data::new(password_service))
        .configure(configure_routes)
}

async fn register<S, B>(app: &S, username: &str, password: &str, role: Option<&str>) -> StatusCode
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let mut body = json!({ "username": username, "password": password });
    if let Some(role) = role {
        body["role"] = json!(role);
    }

    let req = test::TestRequest::post()
        .uri("/api/register")
        .set_json(&body)
        .to_request();
    test::call_service(app, req).await.status()
}

async fn login<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp: TokenResponse = test::call_and_read_body_json(app, req).await;
    resp.token
}

async fn create_todo<S, B>(app: &S, token: &str, title: &str) -> TodoResponse
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": title }))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

async fn list_todos<S, B>(app: &S, token: &str) -> Vec<TodoResponse>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

#[actix_web::test]
async fn health_check_reports_ok() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn register_duplicate_username_conflicts() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    assert_eq!(
        register(&app, "alice", "pw1", None).await,
        StatusCode::CREATED
    );
    assert_eq!(
        register(&app, "alice", "pw2", None).await,
        StatusCode::CONFLICT
    );
}

#[actix_web::test]
async fn register_rejects_missing_fields() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    assert_eq!(
        register(&app, "", "pw1", None).await,
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        register(&app, "alice", "", None).await,
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn login_rejects_bad_credentials() {
    let app = test::init_service(test_app(AppState::in_memory())).await;
    register(&app, "alice", "pw1", None).await;

    // Wrong password
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "alice", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    assert!(!String::from_utf8_lossy(&body).contains("\"token\""));

    // Unknown user gets the same class of error
    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({ "username": "nobody", "password": "pw1" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn todo_crud_end_to_end() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    assert_eq!(
        register(&app, "alice", "pw1", None).await,
        StatusCode::CREATED
    );
    let token = login(&app, "alice", "pw1").await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "buy milk" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: TodoResponse = test::read_body_json(resp).await;
    assert_eq!(created.title, "buy milk");
    assert!(!created.completed);

    // List contains it
    let todos = list_todos(&app, &token).await;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, created.id);

    // Partial update: only `completed`, title must survive
    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "completed": true }))
        .to_request();
    let updated: TodoResponse = test::call_and_read_body_json(&app, req).await;
    assert!(updated.completed);
    assert_eq!(updated.title, "buy milk");

    // Delete
    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{}", created.id))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // Gone from the listing
    assert!(list_todos(&app, &token).await.is_empty());
}

#[actix_web::test]
async fn create_todo_requires_title() {
    let app = test::init_service(test_app(AppState::in_memory())).await;
    register(&app, "alice", "pw1", None).await;
    let token = login(&app, "alice", "pw1").await;

    let req = test::TestRequest::post()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "title": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn listing_is_scoped_to_owner() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    register(&app, "alice", "pw1", None).await;
    register(&app, "bob", "pw2", None).await;
    let alice = login(&app, "alice", "pw1").await;
    let bob = login(&app, "bob", "pw2").await;

    let a1 = create_todo(&app, &alice, "alice-1").await;
    let a2 = create_todo(&app, &alice, "alice-2").await;
    create_todo(&app, &bob, "bob-1").await;

    let todos = list_todos(&app, &alice).await;
    let ids: Vec<Uuid> = todos.iter().map(|t| t.id).collect();

    assert_eq!(ids, vec![a1.id, a2.id]);
}

#[actix_web::test]
async fn user_cannot_touch_foreign_todo() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    register(&app, "alice", "pw1", None).await;
    register(&app, "bob", "pw2", None).await;
    let alice = login(&app, "alice", "pw1").await;
    let bob = login(&app, "bob", "pw2").await;

    let todo = create_todo(&app, &alice, "alice's todo").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", todo.id))
        .insert_header(("Authorization", format!("Bearer {bob}")))
        .set_json(json!({ "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{}", todo.id))
        .insert_header(("Authorization", format!("Bearer {bob}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Record untouched
    let todos = list_todos(&app, &alice).await;
    assert_eq!(todos.len(), 1);
    assert!(!todos[0].completed);
}

#[actix_web::test]
async fn admin_overrides_ownership() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    register(&app, "alice", "pw1", None).await;
    register(&app, "root", "pw-admin", Some("admin")).await;
    let alice = login(&app, "alice", "pw1").await;
    let admin = login(&app, "root", "pw-admin").await;

    let todo = create_todo(&app, &alice, "alice's todo").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", todo.id))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .set_json(json!({ "completed": true }))
        .to_request();
    let updated: TodoResponse = test::call_and_read_body_json(&app, req).await;
    assert!(updated.completed);
    // Ownership never changes, even under admin edits.
    assert_eq!(updated.user_id, todo.user_id);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/todos/{}", todo.id))
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn admin_list_sees_all_todos() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    register(&app, "alice", "pw1", None).await;
    register(&app, "bob", "pw2", None).await;
    register(&app, "root", "pw-admin", Some("admin")).await;
    let alice = login(&app, "alice", "pw1").await;
    let bob = login(&app, "bob", "pw2").await;
    let admin = login(&app, "root", "pw-admin").await;

    create_todo(&app, &alice, "alice-1").await;
    create_todo(&app, &bob, "bob-1").await;

    let todos = list_todos(&app, &admin).await;
    assert_eq!(todos.len(), 2);
}

#[actix_web::test]
async fn admin_grouped_listing() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    register(&app, "alice", "pw1", None).await;
    register(&app, "bob", "pw2", None).await;
    register(&app, "root", "pw-admin", Some("admin")).await;
    let alice = login(&app, "alice", "pw1").await;
    let bob = login(&app, "bob", "pw2").await;
    let admin = login(&app, "root", "pw-admin").await;

    create_todo(&app, &alice, "alice-1").await;
    create_todo(&app, &alice, "alice-2").await;
    create_todo(&app, &bob, "bob-1").await;

    let req = test::TestRequest::get()
        .uri("/api/admin/todos")
        .insert_header(("Authorization", format!("Bearer {admin}")))
        .to_request();
    let groups: Vec<UserTodosResponse> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(groups.len(), 2);
    let alice_group = groups.iter().find(|g| g.username == "alice").unwrap();
    assert_eq!(alice_group.todos.len(), 2);
    let bob_group = groups.iter().find(|g| g.username == "bob").unwrap();
    assert_eq!(bob_group.todos.len(), 1);

    // Non-admin callers are rejected
    let req = test::TestRequest::get()
        .uri("/api/admin/todos")
        .insert_header(("Authorization", format!("Bearer {alice}")))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn missing_token_is_unauthorized() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    let req = test::TestRequest::get().uri("/api/todos").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn invalid_token_is_forbidden() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", "Bearer not-a-real-token"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn expired_token_is_forbidden() {
    let app = test::init_service(test_app(AppState::in_memory())).await;

    // Same secret and issuer, but a lifetime that already ended.
    let expired_issuer = JwtTokenService::new(JwtConfig {
        expiration_hours: -2,
        ..test_jwt_config()
    });
    let token = expired_issuer
        .issue_token(Uuid::new_v4(), "alice", Role::User)
        .unwrap();

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn update_missing_todo_is_not_found() {
    let app = test::init_service(test_app(AppState::in_memory())).await;
    register(&app, "alice", "pw1", None).await;
    let token = login(&app, "alice", "pw1").await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", Uuid::new_v4()))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
