use async_trait::async_trait;
use chrono::Utc;
use database::BaseRepository;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::collections::{BTreeSet, HashMap};

use crate::{
    entity::{broker, project, property, stock},
    error::{StockError, StockResult},
    models::{NewStock, Patch, Property, Stock, StockDetails, StockPatch},
    repository::StockRepository,
};

pub struct PgStockRepository {
    base: BaseRepository<stock::Entity>,
}

impl PgStockRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Attach catalog names with one `IN (...)` lookup per catalog table.
    async fn with_names(&self, rows: Vec<stock::Model>) -> StockResult<Vec<StockDetails>> {
        let db = self.base.db();

        let project_ids: BTreeSet<String> = rows.iter().map(|r| r.project_id.clone()).collect();
        let property_ids: BTreeSet<String> = rows.iter().map(|r| r.property_id.clone()).collect();
        let broker_ids: BTreeSet<String> = rows.iter().filter_map(|r| r.broker_id.clone()).collect();

        let projects: HashMap<String, String> = if project_ids.is_empty() {
            HashMap::new()
        } else {
            project::Entity::find()
                .filter(project::Column::ProjectId.is_in(project_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|p| (p.project_id, p.project_name))
                .collect()
        };

        let properties: HashMap<String, String> = if property_ids.is_empty() {
            HashMap::new()
        } else {
            property::Entity::find()
                .filter(property::Column::PropertyId.is_in(property_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|p| (p.property_id, p.property_name))
                .collect()
        };

        let brokers: HashMap<String, String> = if broker_ids.is_empty() {
            HashMap::new()
        } else {
            broker::Entity::find()
                .filter(broker::Column::BrokerId.is_in(broker_ids))
                .all(db)
                .await?
                .into_iter()
                .map(|b| (b.broker_id, b.broker_name))
                .collect()
        };

        Ok(rows
            .into_iter()
            .map(|row| StockDetails {
                project_name: projects.get(&row.project_id).cloned(),
                property_name: properties.get(&row.property_id).cloned(),
                broker_name: row.broker_id.as_ref().and_then(|id| brokers.get(id)).cloned(),
                stock: row.into(),
            })
            .collect())
    }
}

fn patch_column<T, V>(patch: Patch<T>) -> sea_orm::ActiveValue<Option<V>>
where
    V: From<T>,
    Option<V>: Into<sea_orm::Value>,
{
    match patch {
        Patch::Unchanged => NotSet,
        Patch::Clear => Set(None),
        Patch::Set(value) => Set(Some(value.into())),
    }
}

#[async_trait]
impl StockRepository for PgStockRepository {
    async fn find_property(&self, property_id: &str) -> StockResult<Option<Property>> {
        let model = property::Entity::find_by_id(property_id.to_string())
            .one(self.base.db())
            .await?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, input: NewStock) -> StockResult<Stock> {
        let now = Utc::now();
        let active_model = stock::ActiveModel {
            stock_id: NotSet,
            project_id: Set(input.project_id),
            property_id: Set(input.property_id),
            property_type: Set(input.property_type),
            size: Set(input.size),
            bsp: Set(input.bsp),
            broker_id: Set(input.broker_id),
            remarks: Set(input.remarks),
            on_hold_status: Set(input.on_hold_status),
            hold_till_date: Set(input.hold_till_date.map(Into::into)),
            hold_remarks: Set(input.hold_remarks),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let model = self.base.insert(active_model).await?;

        tracing::info!(stock_id = model.stock_id, "Created stock");
        Ok(model.into())
    }

    async fn update(&self, stock_id: i32, patch: StockPatch) -> StockResult<Stock> {
        let mut active_model = stock::ActiveModel {
            stock_id: Unchanged(stock_id),
            updated_at: Set(Utc::now().into()),
            ..Default::default()
        };

        if let Some(project_id) = patch.project_id {
            active_model.project_id = Set(project_id);
        }
        if let Some(property_id) = patch.property_id {
            active_model.property_id = Set(property_id);
        }
        if let Some(property_type) = patch.property_type {
            active_model.property_type = Set(property_type);
        }
        if let Some(size) = patch.size {
            active_model.size = Set(size);
        }
        active_model.bsp = patch_column(patch.bsp);
        active_model.broker_id = patch_column(patch.broker_id);
        active_model.remarks = patch_column(patch.remarks);
        active_model.on_hold_status = patch_column(patch.on_hold_status);
        active_model.hold_till_date = patch_column(patch.hold_till_date);
        active_model.hold_remarks = patch_column(patch.hold_remarks);

        let model = self.base.update(active_model).await.map_err(|e| match e {
            DbErr::RecordNotUpdated => StockError::NotFound(stock_id),
            other => other.into(),
        })?;

        tracing::info!(stock_id, "Updated stock");
        Ok(model.into())
    }

    async fn get_by_id(&self, stock_id: i32) -> StockResult<Option<StockDetails>> {
        let Some(model) = self.base.find_by_id(stock_id).await? else {
            return Ok(None);
        };

        Ok(self.with_names(vec![model]).await?.pop())
    }

    async fn list(&self) -> StockResult<Vec<StockDetails>> {
        let rows = stock::Entity::find()
            .order_by_desc(stock::Column::UpdatedAt)
            .order_by_desc(stock::Column::StockId)
            .all(self.base.db())
            .await?;

        self.with_names(rows).await
    }
}
