use crate::{
    auth::AuthenticatedUserId,
    error::AppError,
    models::{page_count, page_offset, Todo, TodoInput, TodoPage, TodoQuery, TodoUpdate, PAGE_SIZE},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Builds the ILIKE pattern for a user-supplied search string. The LIKE
/// metacharacters `\`, `%` and `_` are escaped so they match literally;
/// the surrounding wildcards give substring matching.
fn like_pattern(search: &str) -> String {
    let escaped = search
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// Lists the authenticated user's todos, newest first.
///
/// ## Query Parameters:
/// - `page` (optional): 1-based page number, default 1. Pages hold 4 todos.
/// - `search` (optional): case-insensitive substring match on the todo text.
///
/// ## Responses:
/// - `200 OK`: `{todos, total, page, pages}` where `pages` counts the pages
///   of the filtered set (0 when nothing matches).
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    query_params: web::Query<TodoQuery>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let AuthenticatedUserId(user_id) = user;
    let page = query_params.page.unwrap_or(1).max(1);
    let search_pattern = like_pattern(query_params.search.as_deref().unwrap_or(""));

    let todos: Vec<Todo> = sqlx::query_as(
        "SELECT id, user_id, text, completed, created_at FROM todos \
         WHERE user_id = $1 AND text ILIKE $2 \
         ORDER BY created_at DESC \
         LIMIT $3 OFFSET $4",
    )
    .bind(user_id)
    .bind(&search_pattern)
    .bind(PAGE_SIZE)
    .bind(page_offset(page))
    .fetch_all(&**pool)
    .await?;

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM todos WHERE user_id = $1 AND text ILIKE $2")
            .bind(user_id)
            .bind(&search_pattern)
            .fetch_one(&**pool)
            .await?;

    Ok(HttpResponse::Ok().json(TodoPage {
        todos,
        total,
        page,
        pages: page_count(total),
    }))
}

/// Creates a new todo for the authenticated user.
///
/// ## Responses:
/// - `201 Created`: the new `Todo`.
/// - `400 Bad Request`: empty `text`.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[post("")]
pub async fn add_todo(
    pool: web::Data<PgPool>,
    todo_data: web::Json<TodoInput>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = Todo::new(todo_data.into_inner(), user.0);

    let result: Todo = sqlx::query_as(
        "INSERT INTO todos (id, user_id, text, completed, created_at) \
         VALUES ($1, $2, $3, $4, $5) \
         RETURNING id, user_id, text, completed, created_at",
    )
    .bind(todo.id)
    .bind(todo.user_id)
    .bind(&todo.text)
    .bind(todo.completed)
    .bind(todo.created_at)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(result))
}

/// Partially updates one of the authenticated user's todos.
///
/// Only the fields present in the body are applied. A todo owned by someone
/// else is indistinguishable from a missing one.
///
/// ## Responses:
/// - `200 OK`: the updated `Todo`.
/// - `400 Bad Request`: `text` present but empty.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no todo with that id owned by the caller.
#[patch("/{id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    todo_data: web::Json<TodoUpdate>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    if let Some(text) = &todo_data.text {
        if text.is_empty() {
            return Err(AppError::Validation("Text is required".into()));
        }
    }

    let todo: Option<Todo> = sqlx::query_as(
        "UPDATE todos \
         SET text = COALESCE($1, text), completed = COALESCE($2, completed) \
         WHERE id = $3 AND user_id = $4 \
         RETURNING id, user_id, text, completed, created_at",
    )
    .bind(todo_data.text.as_deref())
    .bind(todo_data.completed)
    .bind(todo_id.into_inner())
    .bind(user.0)
    .fetch_optional(&**pool)
    .await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(todo)),
        None => Err(AppError::NotFound("Todo not found".into())),
    }
}

/// Deletes one of the authenticated user's todos.
///
/// ## Responses:
/// - `200 OK`: `{"message": "Todo deleted"}`.
/// - `401 Unauthorized`: missing or invalid bearer token.
/// - `404 Not Found`: no todo with that id owned by the caller.
#[delete("/{id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    todo_id: web::Path<Uuid>,
    user: AuthenticatedUserId,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id.into_inner())
        .bind(user.0)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Todo not found".into()));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Todo deleted"
    })))
}
