pub mod auth;
pub mod health;
pub mod todos;

use crate::auth::AuthMiddleware;
use actix_web::web;

/// Mounts the API routes. Auth routes are public; the todo scope is wrapped
/// by the bearer-token middleware so every todo handler sees an
/// authenticated user id.
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::register)
            .service(auth::login)
            .service(auth::forgot_password),
    )
    .service(
        web::scope("/todos")
            .wrap(AuthMiddleware)
            .service(todos::list_todos)
            .service(todos::add_todo)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
