use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "Stock API",
        version = "0.1.0",
        description = "Inventory lifecycle for real-estate stock: create, update, list and look up units by id"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    nest(
        (path = domain_stock::handlers::URL, api = domain_stock::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
