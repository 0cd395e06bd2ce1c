use crate::db::db_service::{load_user, DbService};
use crate::types::chat::AuthoredMessage;
use crate::types::error::AppError;
use chrono::Utc;
use entity::message::{ActiveModel as MessageActive, Entity as Message, Model as MessageModel};
use entity::user::{Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set, TransactionTrait,
};
use tracing::debug;
use uuid::Uuid;

fn authored(row: (MessageModel, Option<UserModel>)) -> AuthoredMessage {
    let (message, author) = row;
    AuthoredMessage {
        message,
        author: author.map(|u| u.username).unwrap_or_default(),
    }
}

async fn latest<C: ConnectionTrait>(conn: &C, team_id: i32) -> Result<Option<AuthoredMessage>, AppError> {
    Ok(Message::find()
        .filter(entity::message::Column::TeamId.eq(team_id))
        .order_by_desc(entity::message::Column::CreatedAt)
        .order_by_desc(entity::message::Column::Id)
        .find_also_related(User)
        .one(conn)
        .await?
        .map(authored))
}

impl DbService {
    /// Append a message to a team's chat. Content is stored trimmed.
    pub async fn post_message(&self, author_id: Uuid, team_id: i32, content: &str) -> Result<AuthoredMessage, AppError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::EmptyContent);
        }

        let txn = self.database_connection.begin().await?;
        let author = load_user(&txn, author_id, false).await?;
        if author.team_id != Some(team_id) {
            return Err(AppError::NotAMember);
        }

        // Keep created_at monotonic within the team even if the clock steps back.
        let mut created_at = Utc::now();
        if let Some(last) = latest(&txn, team_id).await? {
            created_at = created_at.max(last.message.created_at);
        }

        let message = MessageActive {
            id: NotSet,
            team_id: Set(team_id),
            author_id: Set(author.id),
            content: Set(content.to_string()),
            created_at: Set(created_at),
        }
        .insert(&txn)
        .await?;
        txn.commit().await?;

        debug!(team = team_id, message = message.id, "message posted");
        Ok(AuthoredMessage { message, author: author.username })
    }

    /// Whole chat history of a team, oldest first. Members only.
    pub async fn list_messages(&self, requester_id: Uuid, team_id: i32) -> Result<Vec<AuthoredMessage>, AppError> {
        let requester = load_user(&self.database_connection, requester_id, false).await?;
        if requester.team_id != Some(team_id) {
            return Err(AppError::NotAMember);
        }

        let rows = Message::find()
            .filter(entity::message::Column::TeamId.eq(team_id))
            .order_by_asc(entity::message::Column::CreatedAt)
            .order_by_asc(entity::message::Column::Id)
            .find_also_related(User)
            .all(&self.database_connection)
            .await?;
        Ok(rows.into_iter().map(authored).collect())
    }

    pub async fn last_message(&self, team_id: i32) -> Result<Option<AuthoredMessage>, AppError> {
        latest(&self.database_connection, team_id).await
    }
}
