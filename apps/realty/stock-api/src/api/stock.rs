use axum::Router;
use domain_stock::{PgStockRepository, StockService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let repository = PgStockRepository::new(state.db.clone());
    let service = StockService::new(repository);
    handlers::router(service)
}
