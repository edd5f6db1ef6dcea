//! JSON REST handlers for devices.

use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use depot_app::ports::DeviceRepository;
use depot_domain::device::{Device, DeviceState};
use depot_domain::error::{NotFoundError, ValidationError};
use depot_domain::id::DeviceId;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for creating a device.
///
/// Every field is optional so that a missing field surfaces as a domain
/// validation error (400) rather than a deserialization rejection.
#[derive(Deserialize)]
pub struct CreateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Request body for PUT (full replace) and PATCH (partial update).
///
/// `None` keeps "field not supplied" distinct from "field supplied as
/// blank"; the use-case layer decides what each means per verb.
#[derive(Deserialize)]
pub struct UpdateDeviceRequest {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub state: Option<String>,
}

/// Query string for the brand filter.
#[derive(Deserialize)]
pub struct BrandQuery {
    pub brand: Option<String>,
}

/// Query string for the state filter.
#[derive(Deserialize)]
pub struct StateQuery {
    pub state: Option<String>,
}

/// Possible responses from the list endpoints.
pub enum ListResponse {
    Ok(Json<Vec<Device>>),
}

impl IntoResponse for ListResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the get endpoint.
pub enum GetResponse {
    Ok(Json<Device>),
}

impl IntoResponse for GetResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the create endpoint.
pub enum CreateResponse {
    Created(Json<Device>),
}

impl IntoResponse for CreateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(json) => (StatusCode::CREATED, json).into_response(),
        }
    }
}

/// Possible responses from the PUT and PATCH endpoints.
pub enum UpdateResponse {
    Ok(Json<Device>),
}

impl IntoResponse for UpdateResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Ok(json) => json.into_response(),
        }
    }
}

/// Possible responses from the delete endpoint.
pub enum DeleteResponse {
    NoContent,
}

impl IntoResponse for DeleteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// Parse a path id. Unparseable ids behave like ids with no record behind
/// them.
fn parse_id(raw: &str) -> Result<DeviceId, ApiError> {
    DeviceId::from_str(raw).map_err(|_| {
        ApiError::from(NotFoundError {
            entity: "Device",
            id: raw.to_string(),
        })
    })
}

/// `GET /api/devices`
pub async fn list<DR>(State(state): State<AppState<DR>>) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let devices = state.device_service.list_devices().await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/by-brand?brand=`
pub async fn list_by_brand<DR>(
    State(state): State<AppState<DR>>,
    Query(query): Query<BrandQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let devices = state
        .device_service
        .get_devices_by_brand(query.brand.as_deref().unwrap_or_default())
        .await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/by-state?state=`
///
/// The filter value is validated strictly at this boundary, before any use
/// case or storage call: blank means missing, anything unrecognized is a
/// hard error.
pub async fn list_by_state<DR>(
    State(state): State<AppState<DR>>,
    Query(query): Query<StateQuery>,
) -> Result<ListResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let raw = query.state.as_deref().map_or("", str::trim);
    if raw.is_empty() {
        return Err(ValidationError::EmptyState.into());
    }
    let filter = DeviceState::from_str(raw)?;

    let devices = state.device_service.get_devices_by_state(filter).await?;
    Ok(ListResponse::Ok(Json(devices)))
}

/// `GET /api/devices/{id}`
pub async fn get<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<GetResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device = state.device_service.get_device(parse_id(&id)?).await?;
    Ok(GetResponse::Ok(Json(device)))
}

/// `POST /api/devices`
pub async fn create<DR>(
    State(state): State<AppState<DR>>,
    Json(req): Json<CreateDeviceRequest>,
) -> Result<CreateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device = state
        .device_service
        .create_device(
            req.name.as_deref().unwrap_or_default(),
            req.brand.as_deref().unwrap_or_default(),
            req.state.as_deref(),
        )
        .await?;
    Ok(CreateResponse::Created(Json(device)))
}

/// `PUT /api/devices/{id}` — full replace; all fields required.
pub async fn replace<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<UpdateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device = state
        .device_service
        .replace_device(
            parse_id(&id)?,
            req.name.as_deref(),
            req.brand.as_deref(),
            req.state.as_deref(),
        )
        .await?;
    Ok(UpdateResponse::Ok(Json(device)))
}

/// `PATCH /api/devices/{id}` — partial update; absent fields keep their
/// current values.
pub async fn update<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateDeviceRequest>,
) -> Result<UpdateResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    let device = state
        .device_service
        .update_device(
            parse_id(&id)?,
            req.name.as_deref(),
            req.brand.as_deref(),
            req.state.as_deref(),
        )
        .await?;
    Ok(UpdateResponse::Ok(Json(device)))
}

/// `DELETE /api/devices/{id}`
pub async fn delete<DR>(
    State(state): State<AppState<DR>>,
    Path(id): Path<String>,
) -> Result<DeleteResponse, ApiError>
where
    DR: DeviceRepository + Send + Sync + 'static,
{
    state.device_service.delete_device(parse_id(&id)?).await?;
    Ok(DeleteResponse::NoContent)
}
