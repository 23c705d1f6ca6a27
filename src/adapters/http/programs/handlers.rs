//! HTTP handlers for program endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, Timestamp};
use crate::domain::scheduling::Program;

use super::super::error::error_response;
use super::super::identity::Tenant;
use super::super::AppState;
use super::dto::{CreateProgramRequest, DeleteProgramQuery, ProgramQuery, UpdateProgramRequest};

/// GET /scheduling/programs[?programId=]
pub async fn get_programs(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<ProgramQuery>,
) -> Response {
    match &query.program_id {
        Some(raw) => {
            let id = match raw.parse::<ProgramId>() {
                Ok(id) => id,
                Err(e) => return error_response(&e),
            };
            match state.programs.get(&tenant, &id).await {
                Ok(Some(program)) => (StatusCode::OK, Json(program)).into_response(),
                Ok(None) => error_response(&DomainError::not_found(
                    ErrorCode::ProgramNotFound,
                    "Program",
                    &id,
                )),
                Err(e) => error_response(&e),
            }
        }
        None => match state.programs.list(&tenant).await {
            Ok(programs) => (StatusCode::OK, Json(programs)).into_response(),
            Err(e) => error_response(&e),
        },
    }
}

/// POST /scheduling/programs
pub async fn create_program(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<CreateProgramRequest>,
) -> Response {
    let id = match req
        .program_id
        .map_or_else(|| ProgramId::new(Uuid::new_v4().to_string()), ProgramId::new)
    {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut program = match Program::new(tenant, id, req.name) {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    program.description = req.description;
    program.tags = req.tags;
    program.extra = req.extra;

    match state.programs.put(&program).await {
        Ok(()) => (StatusCode::CREATED, Json(program)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH /scheduling/programs (id in body)
pub async fn update_program(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<UpdateProgramRequest>,
) -> Response {
    let id = match req.program_id.parse::<ProgramId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut program = match state.programs.get(&tenant, &id).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            return error_response(&DomainError::not_found(
                ErrorCode::ProgramNotFound,
                "Program",
                &id,
            ))
        }
        Err(e) => return error_response(&e),
    };

    if let Some(name) = req.name {
        if name.trim().is_empty() {
            return error_response(&DomainError::bad_input("name", "program name cannot be empty"));
        }
        program.name = name;
    }
    if let Some(description) = req.description {
        program.description = Some(description);
    }
    if let Some(tags) = req.tags {
        program.tags = tags;
    }
    if let Some(extra) = req.extra {
        program.extra = extra;
    }
    program.updated_at = Timestamp::now();

    match state.programs.put(&program).await {
        Ok(()) => (StatusCode::OK, Json(program)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE /scheduling/programs?programId=
pub async fn delete_program(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DeleteProgramQuery>,
) -> Response {
    let id = match query.program_id.parse::<ProgramId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.programs.get(&tenant, &id).await {
        Ok(Some(program)) => match state.programs.delete(&tenant, &id).await {
            Ok(()) => (StatusCode::OK, Json(program)).into_response(),
            Err(e) => error_response(&e),
        },
        Ok(None) => error_response(&DomainError::not_found(
            ErrorCode::ProgramNotFound,
            "Program",
            &id,
        )),
        Err(e) => error_response(&e),
    }
}
