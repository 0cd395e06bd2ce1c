use crate::db::db_service::{is_unique_violation, load_user, DbService};
use crate::{
    types::{error::AppError, user::DBUserCreate},
    utils::token::{self, encrypt, new_secret},
};
use chrono::Utc;
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

impl DbService {
    pub async fn user_exists_by_username(&self, username: &str) -> Result<bool, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::Username.eq(username))
            .count(&self.database_connection)
            .await?
            > 0)
    }

    pub async fn find_user(&self, id: Uuid) -> Result<Option<UserModel>, AppError> {
        Ok(User::find_by_id(id).one(&self.database_connection).await?)
    }

    pub async fn get_user_by_id(&self, id: &Uuid) -> Result<UserModel, AppError> {
        load_user(&self.database_connection, *id, false).await
    }

    /// Signup: create user. `payload.token` is already hashed.
    pub async fn create_user(&self, payload: DBUserCreate) -> Result<Uuid, AppError> {
        let username = payload.username.trim().to_string();
        if username.is_empty() {
            return Err(AppError::Validation("Username is required".into()));
        }
        if self.user_exists_by_username(&username).await? {
            return Err(AppError::AlreadyExists);
        }
        let uid = token::new_id();
        let now = Utc::now();

        let res = User::insert(UserActive {
            id: Set(uid),
            username: Set(username),
            email: Set(payload.email),
            token: Set(payload.token),
            role: Set(payload.role),
            skills: Set(payload.skills),
            about: Set(payload.about),
            team_id: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        })
        .exec(&self.database_connection)
        .await;

        match res {
            Ok(_) => {
                info!(user = %uid, role = ?payload.role, "user created");
                Ok(uid)
            }
            Err(err) if is_unique_violation(&err) => Err(AppError::AlreadyExists),
            Err(err) => Err(err.into()),
        }
    }

    /// Swap the stored hash for a fresh secret and hand the plain secret back once.
    pub async fn regenerate_user_token(&self, user_id: &Uuid) -> Result<String, AppError> {
        let user = self.get_user_by_id(user_id).await?;
        let secret = new_secret();
        let encrypted = encrypt(&secret).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))?;
        let mut am: UserActive = user.into();
        am.token = Set(encrypted);
        am.updated_at = Set(Utc::now());
        am.update(&self.database_connection).await?;
        Ok(secret)
    }
}
