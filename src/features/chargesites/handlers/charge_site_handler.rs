use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, AppPath, AppQuery};
use crate::features::chargesites::dtos::{
    ChargeSiteRequestDto, ChargeSiteResponseDto, QueryPolicyResponseDto, RegionQueryParams,
};
use crate::features::chargesites::services::ChargeSiteService;

/// List charge sites around a map viewport
///
/// Returns every site whose obfuscated location lies within
/// `queryDistanceScale * max(latd, lond) + maxObfuscatedRadius` of the
/// center, narrowed by each status filter that is present.
#[utoipa::path(
    get,
    path = "/api/chargesites",
    params(RegionQueryParams),
    responses(
        (status = 200, description = "Charge sites in region", body = Vec<ChargeSiteResponseDto>),
        (status = 400, description = "Missing or invalid query parameters")
    ),
    tag = "chargesites"
)]
pub async fn list_charge_sites(
    State(service): State<Arc<ChargeSiteService>>,
    AppQuery(params): AppQuery<RegionQueryParams>,
) -> Result<Json<Vec<ChargeSiteResponseDto>>> {
    params
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sites = service.find_in_region(&params).await?;
    Ok(Json(sites))
}

/// Region query policy shared with map clients
#[utoipa::path(
    get,
    path = "/api/chargesites/params",
    responses(
        (status = 200, description = "Query policy", body = QueryPolicyResponseDto)
    ),
    tag = "chargesites"
)]
pub async fn get_query_policy(
    State(service): State<Arc<ChargeSiteService>>,
) -> Json<QueryPolicyResponseDto> {
    Json(service.query_policy())
}

/// Get a charge site by ID
#[utoipa::path(
    get,
    path = "/api/chargesites/{id}",
    params(
        ("id" = i64, Path, description = "Charge site ID")
    ),
    responses(
        (status = 200, description = "Charge site found", body = ChargeSiteResponseDto),
        (status = 404, description = "Charge site not found")
    ),
    tag = "chargesites"
)]
pub async fn get_charge_site(
    State(service): State<Arc<ChargeSiteService>>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ChargeSiteResponseDto>> {
    let site = service.get_by_id(id).await?;
    Ok(Json(site))
}

/// Create a charge site
///
/// The obfuscated location is generated server-side.
#[utoipa::path(
    post,
    path = "/api/chargesites",
    request_body = ChargeSiteRequestDto,
    responses(
        (status = 201, description = "Charge site created", body = ChargeSiteResponseDto),
        (status = 400, description = "Validation error")
    ),
    tag = "chargesites"
)]
pub async fn create_charge_site(
    State(service): State<Arc<ChargeSiteService>>,
    AppJson(dto): AppJson<ChargeSiteRequestDto>,
) -> Result<(StatusCode, Json<ChargeSiteResponseDto>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let site = service.create(dto).await?;
    Ok((StatusCode::CREATED, Json(site)))
}

/// Replace a charge site
#[utoipa::path(
    put,
    path = "/api/chargesites/{id}",
    params(
        ("id" = i64, Path, description = "Charge site ID")
    ),
    request_body = ChargeSiteRequestDto,
    responses(
        (status = 200, description = "Charge site updated", body = ChargeSiteResponseDto),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Charge site not found")
    ),
    tag = "chargesites"
)]
pub async fn update_charge_site(
    State(service): State<Arc<ChargeSiteService>>,
    AppPath(id): AppPath<i64>,
    AppJson(dto): AppJson<ChargeSiteRequestDto>,
) -> Result<Json<ChargeSiteResponseDto>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let site = service.update(id, dto).await?;
    Ok(Json(site))
}

/// Delete a charge site
#[utoipa::path(
    delete,
    path = "/api/chargesites/{id}",
    params(
        ("id" = i64, Path, description = "Charge site ID")
    ),
    responses(
        (status = 204, description = "Charge site deleted"),
        (status = 404, description = "Charge site not found")
    ),
    tag = "chargesites"
)]
pub async fn delete_charge_site(
    State(service): State<Arc<ChargeSiteService>>,
    AppPath(id): AppPath<i64>,
) -> Result<StatusCode> {
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
