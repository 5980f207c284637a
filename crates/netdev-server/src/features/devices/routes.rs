//! Device API routes
//!
//! - `POST /api/v1/devices` - Create a device
//! - `GET /api/v1/devices` - List devices with filters, search and pagination
//! - `GET /api/v1/devices/:id` - Get a device
//! - `PUT /api/v1/devices/:id` - Replace a device's fields
//! - `PATCH /api/v1/devices/:id/status` - Change a device's status
//! - `DELETE /api/v1/devices/:id` - Delete a device
//! - `GET /api/v1/devices/:id/logs` - A device's audit history

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde_json::json;
use uuid::Uuid;

use super::{
    commands::{
        CreateDeviceCommand, DeleteDeviceCommand, UpdateDeviceCommand, UpdateDeviceStatusCommand,
    },
    queries::{DeviceLogsQuery, GetDeviceQuery, ListDevicesQuery},
};
use crate::api::extract::{ApiJson, ApiPath, ApiQuery};
use crate::api::response::ApiResponse;
use crate::error::ServerResult;
use crate::store::SharedStore;

pub fn devices_routes() -> Router<SharedStore> {
    Router::new()
        .route("/", post(create_device).get(list_devices))
        .route(
            "/:id",
            get(get_device).put(update_device).delete(delete_device),
        )
        .route("/:id/status", patch(update_device_status))
        .route("/:id/logs", get(device_logs))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// `POST /api/v1/devices`
///
/// ```json
/// { "name": "Router-1", "type": "ROUTER", "ip_address": "10.0.0.1", "location": "Rack 1" }
/// ```
///
/// - `201 Created` - the stored device
/// - `400 Bad Request` - validation error listing every bad field
#[tracing::instrument(skip(store, command))]
async fn create_device(
    State(store): State<SharedStore>,
    ApiJson(command): ApiJson<CreateDeviceCommand>,
) -> ServerResult<Response> {
    let device = super::commands::create::handle(store, command).await?;
    Ok(ApiResponse::success(device).created())
}

/// `PUT /api/v1/devices/:id`
///
/// - `200 OK` - the updated device
/// - `400 Bad Request` - validation error
/// - `404 Not Found` - unknown device
#[tracing::instrument(skip(store, command), fields(device_id = %id))]
async fn update_device(
    State(store): State<SharedStore>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(mut command): ApiJson<UpdateDeviceCommand>,
) -> ServerResult<Response> {
    command.id = id;
    let device = super::commands::update::handle(store, command).await?;
    Ok(ApiResponse::success(device).into_response())
}

/// `PATCH /api/v1/devices/:id/status`
///
/// ```json
/// { "status": "MAINTENANCE" }
/// ```
#[tracing::instrument(skip(store, command), fields(device_id = %id))]
async fn update_device_status(
    State(store): State<SharedStore>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(mut command): ApiJson<UpdateDeviceStatusCommand>,
) -> ServerResult<Response> {
    command.id = id;
    let device = super::commands::update_status::handle(store, command).await?;
    Ok(ApiResponse::success(device).into_response())
}

/// `DELETE /api/v1/devices/:id`
///
/// - `204 No Content` - deleted, history kept
/// - `404 Not Found` - unknown device
#[tracing::instrument(skip(store), fields(device_id = %id))]
async fn delete_device(
    State(store): State<SharedStore>,
    ApiPath(id): ApiPath<Uuid>,
) -> ServerResult<Response> {
    super::commands::delete::handle(store, DeleteDeviceCommand { id }).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// `GET /api/v1/devices/:id`
#[tracing::instrument(skip(store), fields(device_id = %id))]
async fn get_device(
    State(store): State<SharedStore>,
    ApiPath(id): ApiPath<Uuid>,
) -> ServerResult<Response> {
    let device = super::queries::get::handle(store, GetDeviceQuery { id }).await?;
    Ok(ApiResponse::success(device).into_response())
}

/// `GET /api/v1/devices?status=&type=&q=&page=&size=&sort=`
///
/// Pagination is returned under `meta.pagination`.
#[tracing::instrument(skip(store, query), fields(page = ?query.page, size = ?query.size))]
async fn list_devices(
    State(store): State<SharedStore>,
    ApiQuery(query): ApiQuery<ListDevicesQuery>,
) -> ServerResult<Response> {
    let response = super::queries::list::handle(store, query).await?;

    let meta = json!({
        "pagination": response.pagination
    });
    Ok(ApiResponse::success_with_meta(response.items, meta).into_response())
}

/// `GET /api/v1/devices/:id/logs`
///
/// Always `200 OK`; deleted or unknown devices return whatever history exists.
#[tracing::instrument(skip(store), fields(device_id = %id))]
async fn device_logs(
    State(store): State<SharedStore>,
    ApiPath(id): ApiPath<Uuid>,
) -> ServerResult<Response> {
    let logs = super::queries::logs::handle(store, DeviceLogsQuery { id }).await?;
    Ok(ApiResponse::success(logs).into_response())
}
