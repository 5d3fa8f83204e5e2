use sea_orm::entity::prelude::*;

use crate::models::Stock;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "stock")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub stock_id: i32,
    #[sea_orm(column_type = "Text")]
    pub project_id: String,
    #[sea_orm(column_type = "Text")]
    pub property_id: String,
    #[sea_orm(column_type = "Text")]
    pub property_type: String,
    #[sea_orm(column_type = "Text")]
    pub size: String,
    #[sea_orm(column_type = "Double", nullable)]
    pub bsp: Option<f64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub broker_id: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub remarks: Option<String>,
    pub on_hold_status: Option<bool>,
    pub hold_till_date: Option<DateTimeWithTimeZone>,
    #[sea_orm(column_type = "Text", nullable)]
    pub hold_remarks: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Stock {
    fn from(model: Model) -> Self {
        Self {
            stock_id: model.stock_id,
            project_id: model.project_id,
            property_id: model.property_id,
            property_type: model.property_type,
            size: model.size,
            bsp: model.bsp,
            broker_id: model.broker_id,
            remarks: model.remarks,
            on_hold_status: model.on_hold_status,
            hold_till_date: model.hold_till_date.map(Into::into),
            hold_remarks: model.hold_remarks,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
