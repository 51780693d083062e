//! Crustacean CRUD handlers

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};

use super::dto::{
    CreateCrustaceanRequest, CrustaceanResponse, ListCrustaceansParams,
    PaginatedCrustaceanResponse, UpdateCrustaceanRequest,
};
use crate::application::CrustaceanService;
use crate::domain::DomainError;
use crate::interfaces::http::common::{ApiError, ApiResponse, ApiResult, ValidatedJson};
use crate::shared::pagination;

/// Crustacean handler state
#[derive(Clone)]
pub struct CrustaceanState {
    pub service: Arc<CrustaceanService>,
}

fn parse_id(id: Result<Path<i32>, PathRejection>) -> ApiResult<i32> {
    id.map(|Path(id)| id)
        .map_err(|_| ApiError::bad_request("Invalid ID parameter"))
}

fn parse_query(
    params: Result<Query<ListCrustaceansParams>, QueryRejection>,
) -> ApiResult<ListCrustaceansParams> {
    params.map(|Query(params)| params).map_err(|rejection| {
        ApiError::invalid("Invalid pagination parameters", vec![rejection.body_text()])
    })
}

#[utoipa::path(
    post,
    path = "/api/crustaceans",
    tag = "Crustaceans",
    request_body = CreateCrustaceanRequest,
    responses(
        (status = 201, description = "Crustacean created", body = ApiResponse<CrustaceanResponse>),
        (status = 400, description = "Malformed JSON or validation failure"),
        (status = 409, description = "A crustacean with this name already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn create_crustacean(
    State(state): State<CrustaceanState>,
    ValidatedJson(request): ValidatedJson<CreateCrustaceanRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<CrustaceanResponse>>)> {
    let created = state.service.create(request.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Crustacean created successfully",
            CrustaceanResponse::from(created),
        )),
    ))
}

#[utoipa::path(
    get,
    path = "/api/crustaceans",
    tag = "Crustaceans",
    params(ListCrustaceansParams),
    responses(
        (status = 200, description = "One page of crustaceans, newest first", body = PaginatedCrustaceanResponse),
        (status = 400, description = "Invalid pagination parameters")
    )
)]
pub async fn list_crustaceans(
    State(state): State<CrustaceanState>,
    params: Result<Query<ListCrustaceansParams>, QueryRejection>,
) -> ApiResult<Json<PaginatedCrustaceanResponse>> {
    let params = parse_query(params)?;
    let paging = params
        .pagination()
        .map_err(|errors| ApiError::invalid("Invalid pagination parameters", errors))?;

    let violations = pagination::validate(&paging);
    if !violations.is_empty() {
        return Err(ApiError::invalid("Invalid pagination parameters", violations));
    }

    let result = state.service.list(params.filter(), paging).await?;
    Ok(Json(PaginatedCrustaceanResponse::new(
        "Crustaceans retrieved successfully",
        result,
    )))
}

#[utoipa::path(
    get,
    path = "/api/crustaceans/{id}",
    tag = "Crustaceans",
    params(("id" = i32, Path, description = "Crustacean id")),
    responses(
        (status = 200, description = "Crustacean details", body = ApiResponse<CrustaceanResponse>),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "Crustacean not found")
    )
)]
pub async fn get_crustacean(
    State(state): State<CrustaceanState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<ApiResponse<CrustaceanResponse>>> {
    let id = parse_id(id)?;
    let crustacean = state
        .service
        .find_by_id(id)
        .await?
        .ok_or(DomainError::not_found(id))?;

    Ok(Json(ApiResponse::success(
        "Crustacean retrieved successfully",
        CrustaceanResponse::from(crustacean),
    )))
}

#[utoipa::path(
    put,
    path = "/api/crustaceans/{id}",
    tag = "Crustaceans",
    params(("id" = i32, Path, description = "Crustacean id")),
    request_body = UpdateCrustaceanRequest,
    responses(
        (status = 200, description = "Crustacean updated", body = ApiResponse<CrustaceanResponse>),
        (status = 400, description = "Invalid ID, malformed JSON or validation failure"),
        (status = 404, description = "Crustacean not found"),
        (status = 409, description = "A crustacean with this name already exists")
    )
)]
pub async fn update_crustacean(
    State(state): State<CrustaceanState>,
    id: Result<Path<i32>, PathRejection>,
    ValidatedJson(request): ValidatedJson<UpdateCrustaceanRequest>,
) -> ApiResult<Json<ApiResponse<CrustaceanResponse>>> {
    let id = parse_id(id)?;
    let updated = state
        .service
        .update(id, request.into())
        .await?
        .ok_or(DomainError::not_found(id))?;

    Ok(Json(ApiResponse::success(
        "Crustacean updated successfully",
        CrustaceanResponse::from(updated),
    )))
}

#[utoipa::path(
    delete,
    path = "/api/crustaceans/{id}",
    tag = "Crustaceans",
    params(("id" = i32, Path, description = "Crustacean id")),
    responses(
        (status = 200, description = "Crustacean deleted"),
        (status = 400, description = "Invalid ID parameter"),
        (status = 404, description = "Crustacean not found")
    )
)]
pub async fn delete_crustacean(
    State(state): State<CrustaceanState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Json<ApiResponse<()>>> {
    let id = parse_id(id)?;
    if !state.service.delete(id).await? {
        return Err(DomainError::not_found(id).into());
    }
    Ok(Json(ApiResponse::ok("Crustacean deleted successfully")))
}
