// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::OffsetDateTime;
use tip_split_api::{
    ApiError, ApiResult, AuditTimelineResponse, CsvExport, EditShiftResponse, EmployeeInfo,
    EmployeeRequest, ListEmployeesResponse, ListPositionsResponse, ListShiftTypesResponse,
    ListShiftsResponse, PositionRequest, SettingsRequest, ShiftRequest, ShiftResponse,
    ShiftTypeRequest, calculate_shift, create_employee, create_position, create_shift,
    create_shift_type, delete_employee, delete_position, delete_shift, delete_shift_type,
    edit_shift, export_shift_csv, get_audit_timeline, get_employee, get_settings, get_shift,
    list_employees, list_positions, list_shift_types, list_shifts, rename_shift_type,
    update_employee, update_position, update_settings, update_shift,
};
use tip_split_audit::{Actor, Cause};
use tip_split_domain::{Position, Settings, ShiftType};
use tip_split_persistence::Persistence;
use tokio::sync::Mutex;
use tracing::{error, info};

/// Header naming the person performing a request, for audit attribution.
const ACTOR_HEADER: &str = "x-actor";

/// Header carrying a caller-supplied correlation id.
const REQUEST_ID_HEADER: &str = "x-request-id";

/// Actor recorded when a request does not name one.
const DEFAULT_ACTOR: &str = "manager";

/// Tip Split Server - HTTP server for restaurant tip distribution
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: String,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a single mutex, so shift mutations
/// never interleave.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
}

/// Query parameters for the audit timeline.
#[derive(Debug, Deserialize)]
struct AuditTimelineQuery {
    /// Restrict the timeline to one shift.
    shift_id: Option<i64>,
}

/// Response for a write that returns no entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct WriteResponse {
    /// Whether the operation succeeded.
    success: bool,
    /// A human-readable message.
    message: String,
    /// The audit event recorded, if any.
    event_id: Option<i64>,
}

/// Response for a shift create or update.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ShiftWriteResponse {
    /// The stored shift.
    shift: ShiftResponse,
    /// The audit event recorded for the change.
    event_id: Option<i64>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::DomainRuleViolation { .. } if err.is_conflict() => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Builds the audit actor from the `X-Actor` header.
fn actor_from_headers(headers: &HeaderMap) -> Actor {
    let id: &str = header_str(headers, ACTOR_HEADER).unwrap_or(DEFAULT_ACTOR);
    Actor::new(id.to_string(), String::from("manager"))
}

/// Builds the audit cause, using `X-Request-Id` as its id when present.
fn cause_from_headers(headers: &HeaderMap, description: &str) -> Cause {
    let id: &str = header_str(headers, REQUEST_ID_HEADER).unwrap_or("http");
    Cause::new(id.to_string(), description.to_string())
}

// ========================================================================
// Reference Data
// ========================================================================

/// Handler for GET `/positions` endpoint.
async fn handle_list_positions(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListPositionsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_positions(&mut *persistence)?))
}

/// Handler for POST `/positions` endpoint.
async fn handle_create_position(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<Position>, HttpError> {
    info!(name = %req.name, "Handling create_position request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_position(&mut *persistence, &req)?))
}

/// Handler for PUT `/positions/{name}` endpoint.
async fn handle_update_position(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
    Json(req): Json<PositionRequest>,
) -> Result<Json<Position>, HttpError> {
    info!(name = %name, new_name = %req.name, "Handling update_position request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_position(&mut *persistence, &name, &req)?))
}

/// Handler for DELETE `/positions/{name}` endpoint.
async fn handle_delete_position(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(name = %name, "Handling delete_position request");
    let mut persistence = app_state.persistence.lock().await;
    delete_position(&mut *persistence, &name)?;
    Ok(Json(WriteResponse {
        success: true,
        message: format!("Deleted position '{name}'"),
        event_id: None,
    }))
}

/// Handler for GET `/employees` endpoint.
async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_employees(&mut *persistence)?))
}

/// Handler for POST `/employees` endpoint.
async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    info!(
        employee_number = req.employee_number,
        "Handling create_employee request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_employee(&mut *persistence, &req)?))
}

/// Handler for GET `/employees/{record_id}` endpoint.
async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(record_id): Path<i64>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_employee(&mut *persistence, record_id)?))
}

/// Handler for PUT `/employees/{record_id}` endpoint.
async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(record_id): Path<i64>,
    Json(req): Json<EmployeeRequest>,
) -> Result<Json<EmployeeInfo>, HttpError> {
    info!(
        record_id,
        employee_number = req.employee_number,
        "Handling update_employee request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_employee(&mut *persistence, record_id, &req)?))
}

/// Handler for DELETE `/employees/{record_id}` endpoint.
async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(record_id): Path<i64>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(record_id, "Handling delete_employee request");
    let mut persistence = app_state.persistence.lock().await;
    delete_employee(&mut *persistence, record_id)?;
    Ok(Json(WriteResponse {
        success: true,
        message: format!("Deleted employee record {record_id}"),
        event_id: None,
    }))
}

/// Handler for GET `/shift_types` endpoint.
async fn handle_list_shift_types(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListShiftTypesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_shift_types(&mut *persistence)?))
}

/// Handler for POST `/shift_types` endpoint.
async fn handle_create_shift_type(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ShiftTypeRequest>,
) -> Result<Json<ShiftType>, HttpError> {
    info!(name = %req.name, "Handling create_shift_type request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(create_shift_type(&mut *persistence, &req)?))
}

/// Handler for PUT `/shift_types/{name}` endpoint.
async fn handle_rename_shift_type(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
    Json(req): Json<ShiftTypeRequest>,
) -> Result<Json<ShiftType>, HttpError> {
    info!(name = %name, new_name = %req.name, "Handling rename_shift_type request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(rename_shift_type(&mut *persistence, &name, &req)?))
}

/// Handler for DELETE `/shift_types/{name}` endpoint.
async fn handle_delete_shift_type(
    AxumState(app_state): AxumState<AppState>,
    Path(name): Path<String>,
) -> Result<Json<WriteResponse>, HttpError> {
    info!(name = %name, "Handling delete_shift_type request");
    let mut persistence = app_state.persistence.lock().await;
    delete_shift_type(&mut *persistence, &name)?;
    Ok(Json(WriteResponse {
        success: true,
        message: format!("Deleted shift type '{name}'"),
        event_id: None,
    }))
}

/// Handler for GET `/settings` endpoint.
async fn handle_get_settings(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<Settings>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_settings(&mut *persistence)?))
}

/// Handler for PUT `/settings` endpoint.
async fn handle_update_settings(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SettingsRequest>,
) -> Result<Json<Settings>, HttpError> {
    info!(
        restaurant_name = %req.restaurant_name,
        time_rounding_minutes = req.time_rounding_minutes,
        "Handling update_settings request"
    );
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_settings(&mut *persistence, &req)?))
}

// ========================================================================
// Shifts
// ========================================================================

/// Handler for POST `/shifts/calculate` endpoint.
///
/// Previews the allocation without storing anything.
async fn handle_calculate_shift(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ShiftRequest>,
) -> Result<Json<ShiftResponse>, HttpError> {
    info!(lines = req.lines.len(), "Handling calculate_shift request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(calculate_shift(&mut *persistence, &req)?))
}

/// Handler for GET `/shifts` endpoint.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_shifts(&mut *persistence)?))
}

/// Handler for POST `/shifts` endpoint.
async fn handle_create_shift(
    AxumState(app_state): AxumState<AppState>,
    headers: HeaderMap,
    Json(req): Json<ShiftRequest>,
) -> Result<Json<ShiftWriteResponse>, HttpError> {
    let actor: Actor = actor_from_headers(&headers);
    info!(actor_id = %actor.id, lines = req.lines.len(), "Handling create_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ShiftResponse> = create_shift(
        &mut *persistence,
        &req,
        actor,
        cause_from_headers(&headers, "Create shift"),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(ShiftWriteResponse {
        shift: result.response,
        event_id: result.audit_event.event_id,
    }))
}

/// Handler for GET `/shifts/{shift_id}` endpoint.
async fn handle_get_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<ShiftResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_shift(&mut *persistence, shift_id)?))
}

/// Handler for PUT `/shifts/{shift_id}` endpoint.
///
/// Replaces the whole shift and recomputes its allocation.
async fn handle_update_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    headers: HeaderMap,
    Json(req): Json<ShiftRequest>,
) -> Result<Json<ShiftWriteResponse>, HttpError> {
    let actor: Actor = actor_from_headers(&headers);
    info!(
        actor_id = %actor.id,
        shift_id,
        lines = req.lines.len(),
        "Handling update_shift request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<ShiftResponse> = update_shift(
        &mut *persistence,
        shift_id,
        &req,
        actor,
        cause_from_headers(&headers, "Update shift"),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(ShiftWriteResponse {
        shift: result.response,
        event_id: result.audit_event.event_id,
    }))
}

/// Handler for DELETE `/shifts/{shift_id}` endpoint.
async fn handle_delete_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Json<WriteResponse>, HttpError> {
    let actor: Actor = actor_from_headers(&headers);
    info!(actor_id = %actor.id, shift_id, "Handling delete_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let result: ApiResult<()> = delete_shift(
        &mut *persistence,
        shift_id,
        actor,
        cause_from_headers(&headers, "Delete shift"),
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(WriteResponse {
        success: true,
        message: format!("Deleted shift {shift_id}"),
        event_id: result.audit_event.event_id,
    }))
}

/// Handler for GET `/shifts/{shift_id}/edit` endpoint.
async fn handle_edit_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Json<EditShiftResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(edit_shift(&mut *persistence, shift_id)?))
}

/// Handler for GET `/shifts/{shift_id}/export` endpoint.
///
/// Returns the allocation as a CSV attachment.
async fn handle_export_shift(
    AxumState(app_state): AxumState<AppState>,
    Path(shift_id): Path<i64>,
) -> Result<Response, HttpError> {
    info!(shift_id, "Handling export_shift request");

    let mut persistence = app_state.persistence.lock().await;
    let export: CsvExport = export_shift_csv(&mut *persistence, shift_id)?;
    drop(persistence);

    let disposition: HeaderValue =
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", export.file_name))
            .map_err(|e| HttpError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: format!("Invalid export file name: {e}"),
            })?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("text/csv; charset=utf-8"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export.content,
    )
        .into_response())
}

/// Handler for GET `/audit` endpoint.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AuditTimelineQuery>,
) -> Result<Json<AuditTimelineResponse>, HttpError> {
    info!(shift_id = ?params.shift_id, "Handling get_audit_timeline request");
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_audit_timeline(&mut *persistence, params.shift_id)?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/positions",
            get(handle_list_positions).post(handle_create_position),
        )
        .route(
            "/positions/{name}",
            axum::routing::put(handle_update_position).delete(handle_delete_position),
        )
        .route(
            "/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route(
            "/employees/{record_id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route(
            "/shift_types",
            get(handle_list_shift_types).post(handle_create_shift_type),
        )
        .route(
            "/shift_types/{name}",
            axum::routing::put(handle_rename_shift_type).delete(handle_delete_shift_type),
        )
        .route(
            "/settings",
            get(handle_get_settings).put(handle_update_settings),
        )
        .route("/shifts/calculate", post(handle_calculate_shift))
        .route("/shifts", get(handle_list_shifts).post(handle_create_shift))
        .route(
            "/shifts/{shift_id}",
            get(handle_get_shift)
                .put(handle_update_shift)
                .delete(handle_delete_shift),
        )
        .route("/shifts/{shift_id}/edit", get(handle_edit_shift))
        .route("/shifts/{shift_id}/export", get(handle_export_shift))
        .route("/audit", get(handle_get_audit_timeline))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tip Split Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener: tokio::net::TcpListener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
