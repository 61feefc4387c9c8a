//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod health;
mod todos;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            // Protected routes
            .service(
                web::scope("/todos")
                    .route("", web::get().to(todos::list))
                    .route("", web::post().to(todos::create))
                    .route("/{id}", web::put().to(todos::update))
                    .route("/{id}", web::delete().to(todos::delete)),
            )
            .route("/admin/todos", web::get().to(admin::todos_by_user)),
    );
}
