use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};

use crate::app::AppState;
use crate::database::models::{Job, JobDetail, JobListing, JobUpdate, NewJob};
use crate::filter::JobFilter;
use crate::middleware::{ApiResponse, ApiResult};

/// POST /jobs - create a job (admin)
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> ApiResult<Job> {
    let Json(payload) = payload?;
    payload.validate()?;

    let job = state.jobs().create(payload).await?;
    Ok(ApiResponse::created(job))
}

/// GET /jobs?title=&minSalary=&hasEquity= - filtered listing with company names
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> ApiResult<Vec<JobListing>> {
    let Query(filter) = query?;
    filter.validate()?;

    let jobs = state.jobs().find_all(&filter).await?;
    Ok(ApiResponse::success(jobs))
}

/// GET /jobs/:id - job with its company nested
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<JobDetail> {
    let Path(id) = id?;
    let job = state.jobs().get(id).await?;
    Ok(ApiResponse::success(job))
}

/// PATCH /jobs/:id - partial update (admin)
pub async fn update(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<JobUpdate>, JsonRejection>,
) -> ApiResult<Job> {
    let Path(id) = id?;
    let Json(payload) = payload?;
    payload.validate()?;

    let job = state.jobs().update(id, payload).await?;
    Ok(ApiResponse::success(job))
}

/// DELETE /jobs/:id (admin)
pub async fn remove(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> ApiResult<Value> {
    let Path(id) = id?;
    state.jobs().remove(id).await?;
    Ok(ApiResponse::success(json!({ "deleted": id })))
}
