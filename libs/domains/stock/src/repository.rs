use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StockError, StockResult};
use crate::models::{Broker, NewStock, Project, Property, Stock, StockDetails, StockPatch};

/// Persistence port for stock rows and the catalog they reference
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockRepository: Send + Sync {
    /// Look up a property by its identifier
    async fn find_property(&self, property_id: &str) -> StockResult<Option<Property>>;

    /// Insert a stock row; the store assigns `stock_id` and both timestamps
    async fn create(&self, input: NewStock) -> StockResult<Stock>;

    /// Apply `patch` and touch `updated_at`; `NotFound` when no row matches
    async fn update(&self, stock_id: i32, patch: StockPatch) -> StockResult<Stock>;

    /// Fetch one row with project, property and broker names
    async fn get_by_id(&self, stock_id: i32) -> StockResult<Option<StockDetails>>;

    /// All rows with names, most recently updated first
    async fn list(&self) -> StockResult<Vec<StockDetails>>;
}

#[derive(Debug, Default)]
struct Tables {
    stock: BTreeMap<i32, Stock>,
    projects: HashMap<String, Project>,
    properties: HashMap<String, Property>,
    brokers: HashMap<String, Broker>,
    last_id: i32,
    last_write: Option<DateTime<Utc>>,
}

impl Tables {
    /// Write timestamps never repeat, so ordering by `updated_at` is stable
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let now = match self.last_write {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        };
        self.last_write = Some(now);
        now
    }

    /// Mirrors the foreign keys of the `stock` table
    fn check_references(&self, stock: &Stock) -> StockResult<()> {
        if !self.projects.contains_key(&stock.project_id) {
            return Err(fk_violation("fk_stock_project_id"));
        }
        if !self.properties.contains_key(&stock.property_id) {
            return Err(fk_violation("fk_stock_property_id"));
        }
        match &stock.broker_id {
            Some(broker_id) if !self.brokers.contains_key(broker_id) => {
                Err(fk_violation("fk_stock_broker_id"))
            }
            _ => Ok(()),
        }
    }

    fn details(&self, stock: &Stock) -> StockDetails {
        StockDetails {
            project_name: self
                .projects
                .get(&stock.project_id)
                .map(|p| p.project_name.clone()),
            property_name: self
                .properties
                .get(&stock.property_id)
                .map(|p| p.property_name.clone()),
            broker_name: stock
                .broker_id
                .as_ref()
                .and_then(|id| self.brokers.get(id))
                .map(|b| b.broker_name.clone()),
            stock: stock.clone(),
        }
    }
}

fn fk_violation(constraint: &str) -> StockError {
    StockError::Persistence(format!(
        "insert or update on table \"stock\" violates foreign key constraint \"{}\"",
        constraint
    ))
}

/// Most recently updated first; ties broken by the newer id
pub(crate) fn sort_for_listing(rows: &mut [StockDetails]) {
    rows.sort_by(|a, b| {
        b.stock
            .updated_at
            .cmp(&a.stock.updated_at)
            .then(b.stock.stock_id.cmp(&a.stock.stock_id))
    });
}

/// In-memory implementation of StockRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryStockRepository {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStockRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_project(&self, project: Project) {
        let mut tables = self.tables.write().await;
        tables.projects.insert(project.project_id.clone(), project);
    }

    pub async fn insert_property(&self, property: Property) {
        let mut tables = self.tables.write().await;
        tables.properties.insert(property.property_id.clone(), property);
    }

    pub async fn insert_broker(&self, broker: Broker) {
        let mut tables = self.tables.write().await;
        tables.brokers.insert(broker.broker_id.clone(), broker);
    }
}

#[async_trait]
impl StockRepository for InMemoryStockRepository {
    async fn find_property(&self, property_id: &str) -> StockResult<Option<Property>> {
        let tables = self.tables.read().await;
        Ok(tables.properties.get(property_id).cloned())
    }

    async fn create(&self, input: NewStock) -> StockResult<Stock> {
        let mut tables = self.tables.write().await;

        let now = tables.tick();
        let stock = Stock {
            stock_id: tables.last_id + 1,
            project_id: input.project_id,
            property_id: input.property_id,
            property_type: input.property_type,
            size: input.size,
            bsp: input.bsp,
            broker_id: input.broker_id,
            remarks: input.remarks,
            on_hold_status: input.on_hold_status,
            hold_till_date: input.hold_till_date,
            hold_remarks: input.hold_remarks,
            created_at: now,
            updated_at: now,
        };
        tables.check_references(&stock)?;

        tables.last_id = stock.stock_id;
        tables.stock.insert(stock.stock_id, stock.clone());

        tracing::info!(stock_id = stock.stock_id, "Created stock");
        Ok(stock)
    }

    async fn update(&self, stock_id: i32, patch: StockPatch) -> StockResult<Stock> {
        let mut tables = self.tables.write().await;

        let mut stock = tables
            .stock
            .get(&stock_id)
            .cloned()
            .ok_or(StockError::NotFound(stock_id))?;
        patch.apply(&mut stock);
        tables.check_references(&stock)?;

        stock.updated_at = tables.tick();
        tables.stock.insert(stock_id, stock.clone());

        tracing::info!(stock_id, "Updated stock");
        Ok(stock)
    }

    async fn get_by_id(&self, stock_id: i32) -> StockResult<Option<StockDetails>> {
        let tables = self.tables.read().await;
        Ok(tables.stock.get(&stock_id).map(|s| tables.details(s)))
    }

    async fn list(&self) -> StockResult<Vec<StockDetails>> {
        let tables = self.tables.read().await;

        let mut rows: Vec<StockDetails> = tables.stock.values().map(|s| tables.details(s)).collect();
        sort_for_listing(&mut rows);

        Ok(rows)
    }
}
