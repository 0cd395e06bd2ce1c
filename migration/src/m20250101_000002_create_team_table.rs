use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Team::Table)
                .if_not_exists()
                .col(ColumnDef::new(Team::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Team::Name).string_len(100).not_null())
                .col(ColumnDef::new(Team::Description).text().not_null().default(""))
                .col(ColumnDef::new(Team::LeaderId).uuid().not_null())
                .col(ColumnDef::new(Team::MaxMembers).integer().not_null().default(4))
                .col(ColumnDef::new(Team::IsActive).boolean().not_null().default(true))
                .col(ColumnDef::new(Team::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_team_leader")
                        .from(Team::Table, Team::LeaderId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("uk_team_name")
                .table(Team::Table)
                .col(Team::Name)
                .unique()
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Team::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Team {
    Table,
    Id,
    Name,
    Description,
    LeaderId,
    MaxMembers,
    IsActive,
    CreatedAt,
}
