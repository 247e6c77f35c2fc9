// Teacher Directory - REST API with Axum
//
// The SQLite connection is handed to the router as state when it is built;
// handlers never reach for a global.

use crate::db;
use crate::entities::{NewTeacher, Teacher, TeacherUpdate};
use crate::error::{Result, TeacherError};
use crate::filter::{SearchParams, TeacherFilter};
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use rusqlite::Connection;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    db: Arc<Mutex<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.db.lock().map_err(|_| TeacherError::LockPoisoned)
    }
}

// ============================================================================
// Error responses
// ============================================================================

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<String>,
}

impl IntoResponse for TeacherError {
    fn into_response(self) -> Response {
        let (status, message, field) = match &self {
            TeacherError::Validation { field, .. } => {
                (StatusCode::BAD_REQUEST, self.to_string(), Some(field.clone()))
            }
            TeacherError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string(), None),
            TeacherError::Persistence(_) | TeacherError::LockPoisoned => {
                tracing::error!(error = %self, "database operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed".to_string(),
                    None,
                )
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code(),
                message,
                field,
            },
        };

        (status, Json(body)).into_response()
    }
}

fn parse_id(raw: &str) -> Result<i64> {
    raw.parse::<i64>()
        .map_err(|_| TeacherError::validation("id", format!("expected an integer, got {:?}", raw)))
}

fn body<T>(payload: std::result::Result<Json<T>, JsonRejection>) -> Result<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| TeacherError::validation("body", rejection.body_text()))
}

// ============================================================================
// API Handlers
// ============================================================================

/// GET /health - Health check
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /teachers - All teachers
async fn list_teachers(State(state): State<AppState>) -> Result<Json<Vec<Teacher>>> {
    let conn = state.conn()?;
    Ok(Json(db::get_all_teachers(&conn)?))
}

/// GET /teachers/:id - One teacher, 404 if absent
async fn get_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Teacher>> {
    let id = parse_id(&id)?;
    let conn = state.conn()?;
    Ok(Json(db::get_teacher(&conn, id)?))
}

/// POST /teachers - Create a teacher; ID and timestamps are assigned here
async fn create_teacher(
    State(state): State<AppState>,
    payload: std::result::Result<Json<NewTeacher>, JsonRejection>,
) -> Result<Json<Teacher>> {
    let new = body(payload)?;
    let conn = state.conn()?;
    Ok(Json(db::insert_teacher(&conn, &new)?))
}

/// PUT /teachers/:id - Merge body fields onto an existing teacher
async fn update_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: std::result::Result<Json<TeacherUpdate>, JsonRejection>,
) -> Result<Json<Teacher>> {
    let id = parse_id(&id)?;
    let update = body(payload)?;
    let conn = state.conn()?;
    Ok(Json(db::update_teacher(&conn, id, update)?))
}

/// DELETE /teachers/:id - Responds {"id<id>": "is deleted"}
async fn delete_teacher(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>> {
    let id = parse_id(&id)?;
    let conn = state.conn()?;
    db::delete_teacher(&conn, id)?;

    let mut confirmation = serde_json::Map::new();
    confirmation.insert(format!("id{}", id), "is deleted".into());
    Ok(Json(serde_json::Value::Object(confirmation)))
}

/// GET /teachers/search?firstName=&lastName=&age=&salary=
async fn search_teachers(
    State(state): State<AppState>,
    params: std::result::Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<Teacher>>> {
    let Query(params) =
        params.map_err(|rejection| TeacherError::validation("query", rejection.body_text()))?;
    let filter = TeacherFilter::from_params(&params)?;

    let conn = state.conn()?;
    Ok(Json(db::search_teachers(&conn, &filter)?))
}

// ============================================================================
// Router
// ============================================================================

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/teachers", get(list_teachers).post(create_teacher))
        .route("/teachers/search", get(search_teachers))
        .route(
            "/teachers/:id",
            get(get_teacher).put(update_teacher).delete(delete_teacher),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

// ============================================================================
// Tests
// ============================================================================
