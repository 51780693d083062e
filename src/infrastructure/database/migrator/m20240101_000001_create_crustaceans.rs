//! Create crustaceans table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Crustaceans::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Crustaceans::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Crustaceans::Name).string().not_null())
                    .col(
                        ColumnDef::new(Crustaceans::GroupName)
                            .string()
                            .not_null()
                            .default("Crustaceans"),
                    )
                    .col(ColumnDef::new(Crustaceans::SubGroup).string().not_null())
                    .col(ColumnDef::new(Crustaceans::Description).string().not_null())
                    .col(ColumnDef::new(Crustaceans::Habitat).string().not_null())
                    .col(ColumnDef::new(Crustaceans::AverageSize).double().not_null())
                    .col(ColumnDef::new(Crustaceans::ScientificName).string().not_null())
                    .col(
                        ColumnDef::new(Crustaceans::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Crustaceans::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // The unique index is the authoritative name-uniqueness guard
        manager
            .create_index(
                Index::create()
                    .name("idx_crustaceans_name")
                    .table(Crustaceans::Table)
                    .col(Crustaceans::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crustaceans_group_sub_group")
                    .table(Crustaceans::Table)
                    .col(Crustaceans::GroupName)
                    .col(Crustaceans::SubGroup)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_crustaceans_created_at")
                    .table(Crustaceans::Table)
                    .col(Crustaceans::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Crustaceans::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Crustaceans {
    Table,
    Id,
    Name,
    GroupName,
    SubGroup,
    Description,
    Habitat,
    AverageSize,
    ScientificName,
    CreatedAt,
    UpdatedAt,
}
