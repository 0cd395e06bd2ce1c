use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_team_table::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Message {
    Table,
    Id,
    TeamId,
    AuthorId,
    Content,
    CreatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(Message::Table)
                .if_not_exists()
                .col(ColumnDef::new(Message::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(Message::TeamId).integer().not_null())
                .col(ColumnDef::new(Message::AuthorId).uuid().not_null())
                .col(ColumnDef::new(Message::Content).text().not_null())
                .col(ColumnDef::new(Message::CreatedAt).timestamp_with_time_zone().not_null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_message_team")
                        .from(Message::Table, Message::TeamId)
                        .to(Team::Table, Team::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_message_author")
                        .from(Message::Table, Message::AuthorId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        // Polling reads a whole team in (created_at, id) order.
        m.create_index(
            Index::create()
                .name("idx_message_team_created")
                .table(Message::Table)
                .col(Message::TeamId)
                .col(Message::CreatedAt)
                .col(Message::Id)
                .to_owned(),
        ).await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(Message::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
