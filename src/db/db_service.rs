use entity::team::{Entity as Team, Model as TeamModel};
use entity::user::{Entity as User, Model as UserModel};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QuerySelect, Select, SqlErr,
};
use tracing::info;
use uuid::Uuid;

use crate::types::error::{AppError, Resource};

/// The one handle onto persistent state. Every operation that changes a
/// user's team, an invitation or the chat lives on this type.
#[derive(Clone)]
pub struct DbService {
    pub(crate) database_connection: DatabaseConnection,
}

impl DbService {
    pub async fn new(uri: &str) -> Result<Self, DbErr> {
        info!("Connecting to database...");
        let mut opts = ConnectOptions::new(uri.to_owned());
        opts.sqlx_logging(false);
        if is_in_memory_sqlite(uri) {
            // every pooled connection would otherwise get its own empty database
            opts.max_connections(1).min_connections(1);
        }
        let database_connection = Database::connect(opts).await?;
        info!("Running migrations...");
        Migrator::up(&database_connection, None).await?;
        info!(backend = ?database_connection.get_database_backend(), "Database ready.");
        Ok(Self { database_connection })
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.database_connection.ping().await?)
    }
}

fn is_in_memory_sqlite(uri: &str) -> bool {
    uri.starts_with("sqlite") && uri.contains(":memory:")
}

/// `SELECT ... FOR UPDATE` where the backend has row locks. SQLite serializes
/// writers on its own.
pub(crate) fn for_update<E: EntityTrait>(select: Select<E>, backend: DbBackend) -> Select<E> {
    match backend {
        DbBackend::Postgres | DbBackend::MySql => select.lock_exclusive(),
        DbBackend::Sqlite => select,
    }
}

pub(crate) fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

pub(crate) async fn load_user<C: ConnectionTrait>(conn: &C, id: Uuid, lock: bool) -> Result<UserModel, AppError> {
    let mut select = User::find_by_id(id);
    if lock {
        select = for_update(select, conn.get_database_backend());
    }
    select.one(conn).await?.ok_or(AppError::NotFound(Resource::User))
}

pub(crate) async fn load_team<C: ConnectionTrait>(conn: &C, id: i32, lock: bool) -> Result<TeamModel, AppError> {
    let mut select = Team::find_by_id(id);
    if lock {
        select = for_update(select, conn.get_database_backend());
    }
    select.one(conn).await?.ok_or(AppError::NotFound(Resource::Team))
}

pub(crate) async fn count_members<C: ConnectionTrait>(conn: &C, team_id: i32) -> Result<u64, AppError> {
    Ok(User::find()
        .filter(entity::user::Column::TeamId.eq(team_id))
        .count(conn)
        .await?)
}
