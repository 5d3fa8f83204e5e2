use serde_json::Value;
use std::sync::Arc;
use validator::{Validate, ValidationErrors};

use crate::error::{StockError, StockResult};
use crate::models::{
    CreateStock, NewStock, Patch, REQUIRED_FIELDS, Stock, StockDetails, StockPatch, UpdateStock,
    normalize_hold_date, parse_stock_id, stock_id_from_value,
};
use crate::repository::StockRepository;

/// Service layer for the stock lifecycle
#[derive(Clone)]
pub struct StockService<R: StockRepository> {
    repository: Arc<R>,
}

impl<R: StockRepository> StockService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a stock row for an existing property.
    ///
    /// Nothing is written when a required field is missing or the property
    /// is unknown. The property check and the insert are not atomic; the
    /// foreign key on `stock.property_id` rejects the insert if the property
    /// disappears in between.
    pub async fn create_stock(&self, input: CreateStock) -> StockResult<Stock> {
        input.validate().map_err(|e| missing_fields(&e))?;

        let hold_till_date = match &input.hold_till_date {
            Some(value) => normalize_hold_date(value)?,
            None => None,
        };

        let new_stock = NewStock {
            project_id: input.project_id.unwrap_or_default(),
            property_id: input.property_id.unwrap_or_default(),
            property_type: input.property_type.unwrap_or_default(),
            size: input.size.unwrap_or_default(),
            bsp: input.bsp,
            broker_id: input.broker_id,
            remarks: input.remarks,
            on_hold_status: input.on_hold_status,
            hold_till_date,
            hold_remarks: input.hold_remarks,
        };

        if self
            .repository
            .find_property(&new_stock.property_id)
            .await?
            .is_none()
        {
            return Err(StockError::PropertyNotFound(new_stock.property_id));
        }

        self.repository.create(new_stock).await
    }

    /// Apply a partial update to the row named by `input.stock_id`.
    ///
    /// The property reference is not checked against the catalog here.
    pub async fn update_stock(&self, input: UpdateStock) -> StockResult<Stock> {
        let stock_id = stock_id_from_value(input.stock_id.as_ref())?;
        let patch = into_patch(input)?;

        self.repository.update(stock_id, patch).await
    }

    /// Every stock row with catalog names, most recently updated first
    pub async fn list_stock(&self) -> StockResult<Vec<StockDetails>> {
        self.repository.list().await
    }

    /// One stock row by its raw path identifier
    pub async fn get_stock(&self, raw_id: &str) -> StockResult<StockDetails> {
        let stock_id = parse_stock_id(raw_id)?;

        self.repository
            .get_by_id(stock_id)
            .await?
            .ok_or(StockError::NotFound(stock_id))
    }
}

fn missing_fields(errors: &ValidationErrors) -> StockError {
    let fields = errors.field_errors();
    let missing: Vec<&str> = REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| fields.contains_key(*field))
        .collect();

    StockError::Validation(format!("Required fields missing: {}", missing.join(", ")))
}

fn into_patch(input: UpdateStock) -> StockResult<StockPatch> {
    let mut cleared = Vec::new();
    let mut required = |name: &'static str, patch: Patch<String>| match patch {
        Patch::Unchanged => None,
        Patch::Set(value) if !value.trim().is_empty() => Some(value),
        Patch::Set(_) | Patch::Clear => {
            cleared.push(name);
            None
        }
    };

    let project_id = required("project_id", input.project_id);
    let property_id = required("property_id", input.property_id);
    let property_type = required("property_type", input.property_type);
    let size = required("size", input.size);

    if !cleared.is_empty() {
        return Err(StockError::Validation(format!(
            "Fields cannot be cleared: {}",
            cleared.join(", ")
        )));
    }

    Ok(StockPatch {
        project_id,
        property_id,
        property_type,
        size,
        bsp: input.bsp,
        broker_id: input.broker_id,
        remarks: input.remarks,
        on_hold_status: input.on_hold_status,
        hold_till_date: hold_date_patch(input.hold_till_date)?,
        hold_remarks: input.hold_remarks,
    })
}

fn hold_date_patch(patch: Patch<Value>) -> StockResult<Patch<chrono::DateTime<chrono::Utc>>> {
    Ok(match patch {
        Patch::Unchanged => Patch::Unchanged,
        Patch::Clear => Patch::Clear,
        Patch::Set(value) => normalize_hold_date(&value)?.into(),
    })
}
