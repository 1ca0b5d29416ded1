use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sensors::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sensors::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sensors::Name).string_len(256))
                    .col(ColumnDef::new(Sensors::Location).string_len(256))
                    .col(
                        ColumnDef::new(Sensors::CreationTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Sensors::UpperWarning).double().not_null())
                    .col(ColumnDef::new(Sensors::LowerWarning).double().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sensors::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Sensors {
    Table,
    Id,
    Name,
    Location,
    CreationTime,
    UpperWarning,
    LowerWarning,
}
