use sea_orm::entity::prelude::*;

use crate::models::Property;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "properties")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false, column_type = "Text")]
    pub property_id: String,
    #[sea_orm(column_type = "Text")]
    pub property_name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub project_id: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Property {
    fn from(model: Model) -> Self {
        Self {
            property_id: model.property_id,
            property_name: model.property_name,
            project_id: model.project_id,
        }
    }
}
