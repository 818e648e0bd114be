use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Local;
use uuid::Uuid;

use crate::api::params::{CollectionKind, DashboardParams, ListParams};
use crate::api::responses::ApiResponse;
use crate::domain::models::{CreateInstrumentRequest, Direction, UpdateInstrumentRequest};
use crate::domain::service::InstrumentService;
use crate::engine::ListQuery;
use crate::error::AppError;
use crate::storage::InstrumentStore;

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn list_instruments<S: InstrumentStore>(
    State(svc): State<InstrumentService<S>>,
    Path((kind, direction)): Path<(CollectionKind, Direction)>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let query = ListQuery {
        criteria: params.criteria(),
        sort: params.sort(),
        page: svc.page_request(params.page, params.page_size),
    };
    let page = svc.list(kind.into(), direction, &query).await?;
    Ok(Json(ApiResponse::paged(page, query.sort)))
}

pub async fn create_instrument<S: InstrumentStore>(
    State(svc): State<InstrumentService<S>>,
    Path((kind, direction)): Path<(CollectionKind, Direction)>,
    Json(req): Json<CreateInstrumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let instrument = svc.create(kind.into(), direction, req).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::new(instrument))))
}

pub async fn get_instrument<S: InstrumentStore>(
    State(svc): State<InstrumentService<S>>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let instrument = svc.get(id).await?;
    Ok(Json(ApiResponse::new(instrument)))
}

pub async fn update_instrument<S: InstrumentStore>(
    State(svc): State<InstrumentService<S>>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateInstrumentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let instrument = svc.update(id, req).await?;
    Ok(Json(ApiResponse::new(instrument)))
}

pub async fn dashboard<S: InstrumentStore>(
    State(svc): State<InstrumentService<S>>,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse, AppError> {
    let today = params.today.unwrap_or_else(|| Local::now().date_naive());
    let dashboard = svc.dashboard(today).await?;
    Ok(Json(ApiResponse::new(dashboard)))
}
