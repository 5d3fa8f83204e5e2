use axum::Router;

pub mod health;
pub mod stock;

/// API routes without the `/api` prefix, which `create_router` adds.
///
/// Sub-routers have their state applied, so the result is stateless.
pub fn routes(state: &crate::state::AppState) -> Router {
    Router::new().nest(domain_stock::handlers::URL, stock::router(state))
}

/// `/ready`, with state applied so it merges into the stateless app router.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
