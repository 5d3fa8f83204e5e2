use sea_orm_migration::prelude::*;

/// Projects, properties and brokers. The stock API only reads these.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Projects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Projects::ProjectId)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Projects::ProjectName).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Properties::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Properties::PropertyId)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Properties::PropertyName).text().not_null())
                    .col(ColumnDef::new(Properties::ProjectId).text().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_properties_project_id")
                            .from(Properties::Table, Properties::ProjectId)
                            .to(Projects::Table, Projects::ProjectId)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Brokers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Brokers::BrokerId)
                            .text()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Brokers::BrokerName).text().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_properties_project_id")
                    .table(Properties::Table)
                    .col(Properties::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Brokers::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Properties::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Projects::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    ProjectId,
    ProjectName,
}

#[derive(DeriveIden)]
enum Properties {
    Table,
    PropertyId,
    PropertyName,
    ProjectId,
}

#[derive(DeriveIden)]
enum Brokers {
    Table,
    BrokerId,
    BrokerName,
}
