use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{Company, CompanyUpdate, NewCompany};
use crate::filter::CompanyFilter;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /companies - create a company (admin)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewCompany>, JsonRejection>,
) -> ApiResult<Company> {
    let Json(payload) = payload?;
    payload.validate()?;

    let company = state.companies().create(payload).await?;
    Ok(ApiResponse::created(company))
}

/// GET /companies?name=&minEmployees=&maxEmployees= - filtered listing
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<CompanyFilter>, QueryRejection>,
) -> ApiResult<Vec<Company>> {
    let Query(filter) = query?;
    filter.validate()?;

    let companies = state.companies().find_all(&filter).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /companies/:handle
pub async fn get(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> ApiResult<Company> {
    let Path(handle) = handle?;
    let company = state.companies().get(&handle).await?;
    Ok(ApiResponse::success(company))
}

/// PATCH /companies/:handle - partial update (admin)
pub async fn update(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
    payload: Result<Json<CompanyUpdate>, JsonRejection>,
) -> ApiResult<Company> {
    let Path(handle) = handle?;
    let Json(payload) = payload?;
    payload.validate()?;

    let company = state.companies().update(&handle, payload).await?;
    Ok(ApiResponse::success(company))
}

/// DELETE /companies/:handle (admin)
pub async fn remove(
    State(state): State<AppState>,
    handle: Result<Path<String>, PathRejection>,
) -> ApiResult<Value> {
    let Path(handle) = handle?;
    state.companies().remove(&handle).await?;
    Ok(ApiResponse::success(json!({ "deleted": handle })))
}
