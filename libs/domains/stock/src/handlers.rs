use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use axum_helpers::{
    ApiResponse, AuditEvent, AuditOutcome, JsonBody,
    errors::responses::{BadRequestResponse, InternalServerErrorResponse, NotFoundResponse},
};
use serde_json::json;
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::StockResult;
use crate::models::{CreateStock, Stock, StockDetails, UpdateStock};
use crate::repository::StockRepository;
use crate::service::StockService;

pub const TAG: &str = "stock";
/// Mount point below `/api`
pub const URL: &str = "/stock";

/// OpenAPI documentation for the stock API
#[derive(OpenApi)]
#[openapi(
    paths(list_stock, create_stock, update_stock, get_stock),
    components(
        schemas(Stock, StockDetails, CreateStock, UpdateStock),
        responses(BadRequestResponse, NotFoundResponse, InternalServerErrorResponse)
    ),
    tags(
        (name = TAG, description = "Stock inventory lifecycle")
    )
)]
pub struct ApiDoc;

/// Stock router, to be nested under [`URL`]
pub fn router<R: StockRepository + 'static>(service: StockService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_stock::<R>).post(create_stock::<R>).put(update_stock::<R>))
        .route("/{stock_id}", get(get_stock::<R>))
        .with_state(shared_service)
}

/// List all stock, most recently updated first
#[utoipa::path(
    get,
    path = "",
    tag = TAG,
    responses(
        (status = 200, description = "All stock rows with project, property and broker names", body = ApiResponse<Vec<StockDetails>>),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
) -> StockResult<ApiResponse<Vec<StockDetails>>> {
    let stock = service.list_stock().await?;
    Ok(ApiResponse::ok(stock))
}

/// Create a stock row for an existing property
#[utoipa::path(
    post,
    path = "",
    tag = TAG,
    request_body = CreateStock,
    responses(
        (status = 201, description = "Stock created", body = ApiResponse<Stock>),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<CreateStock>,
) -> StockResult<impl IntoResponse> {
    let stock = service.create_stock(input).await?;

    AuditEvent::new(
        "stock.create",
        Some(format!("stock:{}", stock.stock_id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .with_details(json!({
        "project_id": stock.project_id,
        "property_id": stock.property_id,
        "property_type": stock.property_type,
    }))
    .log();

    Ok((StatusCode::CREATED, ApiResponse::ok(stock)))
}

/// Partially update a stock row identified by `stock_id` in the body
#[utoipa::path(
    put,
    path = "",
    tag = TAG,
    request_body = UpdateStock,
    responses(
        (status = 200, description = "Stock updated", body = ApiResponse<Stock>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    headers: HeaderMap,
    JsonBody(input): JsonBody<UpdateStock>,
) -> StockResult<ApiResponse<Stock>> {
    let stock = service.update_stock(input).await?;

    AuditEvent::new(
        "stock.update",
        Some(format!("stock:{}", stock.stock_id)),
        AuditOutcome::Success,
    )
    .with_request_headers(&headers)
    .log();

    Ok(ApiResponse::ok(stock))
}

/// Get one stock row with its catalog names
#[utoipa::path(
    get,
    path = "/{stock_id}",
    tag = TAG,
    params(
        ("stock_id" = String, Path, description = "Numeric stock identifier")
    ),
    responses(
        (status = 200, description = "Stock found", body = ApiResponse<StockDetails>),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_stock<R: StockRepository>(
    State(service): State<Arc<StockService<R>>>,
    Path(stock_id): Path<String>,
) -> StockResult<ApiResponse<StockDetails>> {
    let stock = service.get_stock(&stock_id).await?;
    Ok(ApiResponse::ok(stock))
}
