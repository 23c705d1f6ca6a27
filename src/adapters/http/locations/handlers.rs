//! HTTP handlers for location endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, LocationId, Timestamp};
use crate::domain::geo::Coordinates;
use crate::domain::scheduling::Location;

use super::super::error::error_response;
use super::super::identity::Tenant;
use super::super::AppState;
use super::dto::{
    CreateLocationRequest, DeleteLocationQuery, LocationQuery, UpdateLocationRequest,
};

/// GET /scheduling/locations[?locationId=]
pub async fn get_locations(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<LocationQuery>,
) -> Response {
    match &query.location_id {
        Some(raw) => {
            let id = match raw.parse::<LocationId>() {
                Ok(id) => id,
                Err(e) => return error_response(&e),
            };
            match state.locations.get(&tenant, &id).await {
                Ok(Some(location)) => (StatusCode::OK, Json(location)).into_response(),
                Ok(None) => error_response(&DomainError::not_found(
                    ErrorCode::LocationNotFound,
                    "Location",
                    &id,
                )),
                Err(e) => error_response(&e),
            }
        }
        None => match state.locations.list(&tenant).await {
            Ok(locations) => (StatusCode::OK, Json(locations)).into_response(),
            Err(e) => error_response(&e),
        },
    }
}

fn coordinates_from(lat: Option<f64>, lng: Option<f64>) -> Result<Option<Coordinates>, DomainError> {
    match (lat, lng) {
        (Some(lat), Some(lng)) => Coordinates::new(lat, lng).map(Some),
        (None, None) => Ok(None),
        _ => Err(DomainError::new(
            ErrorCode::BadCoordinates,
            "lat and lng must be provided together",
        )),
    }
}

/// POST /scheduling/locations
pub async fn create_location(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<CreateLocationRequest>,
) -> Response {
    let id = match req
        .location_id
        .map_or_else(|| LocationId::new(Uuid::new_v4().to_string()), LocationId::new)
    {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut location = match Location::new(tenant, id, req.name) {
        Ok(l) => l,
        Err(e) => return error_response(&e),
    };
    location.address = req.address;
    location.coordinates = match coordinates_from(req.lat, req.lng) {
        Ok(c) => c,
        Err(e) => return error_response(&e),
    };
    if let Some(radius) = req.check_in_radius_meters {
        location.check_in_radius_meters = radius;
    }
    location.extra = req.extra;
    if let Err(e) = location.validate() {
        return error_response(&e);
    }

    match state.locations.put(&location).await {
        Ok(()) => (StatusCode::CREATED, Json(location)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH /scheduling/locations (id in body)
pub async fn update_location(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<UpdateLocationRequest>,
) -> Response {
    let id = match req.location_id.parse::<LocationId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut location = match state.locations.get(&tenant, &id).await {
        Ok(Some(l)) => l,
        Ok(None) => {
            return error_response(&DomainError::not_found(
                ErrorCode::LocationNotFound,
                "Location",
                &id,
            ))
        }
        Err(e) => return error_response(&e),
    };

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return error_response(&DomainError::bad_input("name", "location name cannot be empty"));
        }
        location.name = name;
    }
    if let Some(address) = req.address {
        location.address = Some(address);
    }
    match coordinates_from(req.lat, req.lng) {
        Ok(Some(c)) => location.coordinates = Some(c),
        Ok(None) => {}
        Err(e) => return error_response(&e),
    }
    if let Some(radius) = req.check_in_radius_meters {
        location.check_in_radius_meters = radius;
    }
    if let Some(extra) = req.extra {
        location.extra = extra;
    }
    location.updated_at = Timestamp::now();
    if let Err(e) = location.validate() {
        return error_response(&e);
    }

    match state.locations.put(&location).await {
        Ok(()) => (StatusCode::OK, Json(location)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE /scheduling/locations?locationId=
pub async fn delete_location(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DeleteLocationQuery>,
) -> Response {
    let id = match query.location_id.parse::<LocationId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.locations.get(&tenant, &id).await {
        Ok(Some(location)) => match state.locations.delete(&tenant, &id).await {
            Ok(()) => (StatusCode::OK, Json(location)).into_response(),
            Err(e) => error_response(&e),
        },
        Ok(None) => error_response(&DomainError::not_found(
            ErrorCode::LocationNotFound,
            "Location",
            &id,
        )),
        Err(e) => error_response(&e),
    }
}
