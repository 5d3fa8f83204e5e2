use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Stock::Table)
                    .if_not_exists()
                    .col(pk_auto(Stock::StockId))
                    .col(ColumnDef::new(Stock::ProjectId).text().not_null())
                    .col(ColumnDef::new(Stock::PropertyId).text().not_null())
                    .col(ColumnDef::new(Stock::PropertyType).text().not_null())
                    .col(ColumnDef::new(Stock::Size).text().not_null())
                    .col(double_null(Stock::Bsp))
                    .col(text_null(Stock::BrokerId))
                    .col(text_null(Stock::Remarks))
                    .col(boolean_null(Stock::OnHoldStatus))
                    .col(timestamp_with_time_zone_null(Stock::HoldTillDate))
                    .col(text_null(Stock::HoldRemarks))
                    .col(
                        timestamp_with_time_zone(Stock::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Stock::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_project_id")
                            .from(Stock::Table, Stock::ProjectId)
                            .to(Projects::Table, Projects::ProjectId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_property_id")
                            .from(Stock::Table, Stock::PropertyId)
                            .to(Properties::Table, Properties::PropertyId)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_stock_broker_id")
                            .from(Stock::Table, Stock::BrokerId)
                            .to(Brokers::Table, Brokers::BrokerId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing sorts on updated_at
        manager
            .create_index(
                Index::create()
                    .name("idx_stock_updated_at")
                    .table(Stock::Table)
                    .col(Stock::UpdatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_stock_property_id")
                    .table(Stock::Table)
                    .col(Stock::PropertyId)
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER stock_touch_updated_at
                    BEFORE UPDATE ON stock
                    FOR EACH ROW
                    EXECUTE FUNCTION util.touch_updated_at()
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS stock_touch_updated_at ON stock")
            .await?;

        manager
            .drop_table(Table::drop().table(Stock::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Stock {
    Table,
    StockId,
    ProjectId,
    PropertyId,
    PropertyType,
    Size,
    Bsp,
    BrokerId,
    Remarks,
    OnHoldStatus,
    HoldTillDate,
    HoldRemarks,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProjectId,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    PropertyId,
}

#[derive(DeriveIden)]
enum Brokers {
    Table,
    BrokerId,
}
