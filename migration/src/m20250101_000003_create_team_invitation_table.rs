use sea_orm_migration::prelude::*;

use crate::m20250101_000001_create_user_table::User;
use crate::m20250101_000002_create_team_table::Team;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum TeamInvitation {
    Table,
    Id,
    TeamId,
    InvitedUserId,
    InvitedBy,
    Message,
    Status,
    CreatedAt,
    RespondedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.create_table(
            Table::create()
                .table(TeamInvitation::Table)
                .if_not_exists()
                .col(ColumnDef::new(TeamInvitation::Id).integer().not_null().auto_increment().primary_key())
                .col(ColumnDef::new(TeamInvitation::TeamId).integer().not_null())
                .col(ColumnDef::new(TeamInvitation::InvitedUserId).uuid().not_null())
                .col(ColumnDef::new(TeamInvitation::InvitedBy).uuid().not_null())
                .col(ColumnDef::new(TeamInvitation::Message).text().not_null().default(""))
                .col(ColumnDef::new(TeamInvitation::Status).string_len(16).not_null().default("pending"))
                .col(ColumnDef::new(TeamInvitation::CreatedAt).timestamp_with_time_zone().not_null())
                .col(ColumnDef::new(TeamInvitation::RespondedAt).timestamp_with_time_zone().null())
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_team_invitation_team")
                        .from(TeamInvitation::Table, TeamInvitation::TeamId)
                        .to(Team::Table, Team::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .foreign_key(
                    ForeignKey::create()
                        .name("fk_team_invitation_user")
                        .from(TeamInvitation::Table, TeamInvitation::InvitedUserId)
                        .to(User::Table, User::Id)
                        .on_delete(ForeignKeyAction::Cascade)
                        .on_update(ForeignKeyAction::Cascade),
                )
                .to_owned(),
        ).await?;

        m.create_index(
            Index::create()
                .name("idx_team_invitation_team")
                .table(TeamInvitation::Table)
                .col(TeamInvitation::TeamId)
                .to_owned(),
        ).await?;

        // At most one pending request per (team, user). Resolved rows pile up freely.
        // Partial indexes read the same on PostgreSQL and SQLite.
        m.get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS uk_team_invitation_pending
                ON team_invitation (team_id, invited_user_id)
                WHERE status = 'pending';
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, m: &SchemaManager) -> Result<(), DbErr> {
        m.drop_table(Table::drop().table(TeamInvitation::Table).if_exists().to_owned()).await?;
        Ok(())
    }
}
