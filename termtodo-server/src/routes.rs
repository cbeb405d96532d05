//! HTTP routes for the todo API.
//!
//! Collections live under `/api/todos`; every request is scoped to an
//! owner via the `userId` query parameter (creation carries the owner
//! in the body instead). Validation failures map to 400, invisible rows
//! to 404, and error bodies are small JSON objects with an `error`
//! field.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use termtodo_model::{Task, TaskDraft, TaskPatch};

use crate::store::{TableError, TaskTable};

/// Owner scoping carried on every read/update request.
#[derive(Debug, serde::Deserialize)]
pub struct OwnerParam {
    /// The requesting owner.
    #[serde(rename = "userId")]
    pub user_id: String,
}

#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

fn table_error(e: &TableError) -> Response {
    let status = match e {
        TableError::NotFound(_) => StatusCode::NOT_FOUND,
        TableError::InvalidTitle(_) => StatusCode::BAD_REQUEST,
    };
    error_response(status, e.to_string())
}

/// Builds the API router around a shared [`TaskTable`].
pub fn router(state: Arc<TaskTable>) -> Router {
    Router::new()
        .route("/api/todos", get(list_todos).post(create_todo))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/api/todos/{id}/toggle", patch(toggle_todo))
        .route("/api/todos/completed/{completed}", get(list_by_status))
        .with_state(state)
}

async fn list_todos(
    State(table): State<Arc<TaskTable>>,
    Query(owner): Query<OwnerParam>,
) -> Json<Vec<Task>> {
    Json(table.list(&owner.user_id).await)
}

async fn list_by_status(
    State(table): State<Arc<TaskTable>>,
    Path(completed): Path<bool>,
    Query(owner): Query<OwnerParam>,
) -> Json<Vec<Task>> {
    Json(table.list_by_status(&owner.user_id, completed).await)
}

async fn get_todo(
    State(table): State<Arc<TaskTable>>,
    Path(id): Path<i64>,
    Query(owner): Query<OwnerParam>,
) -> Response {
    match table.get(id, &owner.user_id).await {
        Ok(task) => Json(task).into_response(),
        Err(e) => table_error(&e),
    }
}

async fn create_todo(
    State(table): State<Arc<TaskTable>>,
    Json(draft): Json<TaskDraft>,
) -> Response {
    match table.create(draft).await {
        Ok(task) => {
            tracing::debug!(id = ?task.id, owner = %task.owner_id, "task created");
            (StatusCode::CREATED, Json(task)).into_response()
        }
        Err(e) => {
            tracing::debug!(error = %e, "task creation rejected");
            table_error(&e)
        }
    }
}

async fn update_todo(
    State(table): State<Arc<TaskTable>>,
    Path(id): Path<i64>,
    Query(owner): Query<OwnerParam>,
    Json(patch): Json<TaskPatch>,
) -> Response {
    match table.update(id, &owner.user_id, patch).await {
        Ok(task) => Json(task).into_response(),
        Err(e) => table_error(&e),
    }
}

async fn toggle_todo(
    State(table): State<Arc<TaskTable>>,
    Path(id): Path<i64>,
    Query(owner): Query<OwnerParam>,
) -> Response {
    match table.toggle(id, &owner.user_id).await {
        Ok(task) => Json(task).into_response(),
        Err(e) => table_error(&e),
    }
}

async fn delete_todo(
    State(table): State<Arc<TaskTable>>,
    Path(id): Path<i64>,
    Query(owner): Query<OwnerParam>,
) -> Response {
    match table.delete(id, &owner.user_id).await {
        Ok(()) => {
            tracing::debug!(id, owner = %owner.user_id, "task deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => table_error(&e),
    }
}

/// Starts the server with a pre-populated [`TaskTable`].
///
/// Binding to port 0 picks an OS-assigned port; the bound address is
/// returned along with the serve task's handle.
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given
/// address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<TaskTable>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "todo server error");
        }
    });

    Ok((bound_addr, handle))
}
