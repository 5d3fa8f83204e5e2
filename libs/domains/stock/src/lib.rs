//! Stock Domain
//!
//! Lifecycle of inventory units (stock) that belong to a property within a
//! project: create, partial update, list and lookup by id.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, response envelope, audit log
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Required fields, property check, date normalisation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Persistence port (in-memory and PostgreSQL adapters)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Stock, catalog records, request DTOs, Patch<T>
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_stock::{handlers, repository::InMemoryStockRepository, service::StockService};
//!
//! let repository = InMemoryStockRepository::new();
//! let service = StockService::new(repository);
//!
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{StockError, StockResult};
pub use models::{
    Broker, CreateStock, NewStock, Patch, Project, Property, Stock, StockDetails, StockPatch,
    UpdateStock,
};
pub use postgres::PgStockRepository;
pub use repository::{InMemoryStockRepository, StockRepository};
pub use service::StockService;
