use crate::db::db_service::{count_members, is_unique_violation, load_team, load_user, DbService};
use crate::db::team_invite::ensure_pending_invitation;
use crate::types::error::AppError;
use crate::types::invite::Ensured;
use crate::types::team::RTeamUpdate;
use chrono::Utc;
use entity::message::Entity as Message;
use entity::team::{
    ActiveModel as TeamActive, Entity as Team, Model as TeamModel, DEFAULT_MAX_MEMBERS,
    MAX_MAX_MEMBERS, MIN_MAX_MEMBERS,
};
use entity::team_invite::{Entity as Invite, Model as InviteModel};
use entity::user::{ActiveModel as UserActive, Capability, Entity as User, Model as UserModel};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, FromQueryResult, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

const MAX_NAME_LEN: usize = 100;

#[derive(Debug, Clone)]
pub struct NewTeam {
    pub name: String,
    pub description: String,
    pub max_members: Option<i32>,
}

fn clean_name(raw: &str) -> Result<String, AppError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Team name is required".into()));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(AppError::Validation(format!("Team name must be at most {MAX_NAME_LEN} characters")));
    }
    Ok(name.to_string())
}

fn check_capacity_bounds(max_members: i32) -> Result<i32, AppError> {
    if !(MIN_MAX_MEMBERS..=MAX_MAX_MEMBERS).contains(&max_members) {
        return Err(AppError::Validation(format!(
            "max_members must be between {MIN_MAX_MEMBERS} and {MAX_MAX_MEMBERS}"
        )));
    }
    Ok(max_members)
}

async fn name_taken<C: ConnectionTrait>(conn: &C, name: &str, except: Option<i32>) -> Result<bool, AppError> {
    let mut q = Team::find().filter(entity::team::Column::Name.eq(name));
    if let Some(id) = except {
        q = q.filter(entity::team::Column::Id.ne(id));
    }
    Ok(q.count(conn).await? > 0)
}

#[derive(Debug, FromQueryResult)]
struct TeamHeadcount {
    team_id: i32,
    members: i64,
}

fn name_conflict() -> AppError {
    AppError::Validation("A team with this name already exists".into())
}

impl DbService {
    /// Create a team led by `creator`, who becomes its first member.
    pub async fn create_team(&self, creator_id: Uuid, data: NewTeam) -> Result<TeamModel, AppError> {
        let name = clean_name(&data.name)?;
        let max_members = check_capacity_bounds(data.max_members.unwrap_or(DEFAULT_MAX_MEMBERS))?;

        let txn = self.database_connection.begin().await?;
        let creator = load_user(&txn, creator_id, true).await?;
        if creator.team_id.is_some() {
            return Err(AppError::AlreadyMember);
        }
        if name_taken(&txn, &name, None).await? {
            return Err(name_conflict());
        }

        let team = TeamActive {
            id: NotSet,
            name: Set(name),
            description: Set(data.description.trim().to_string()),
            leader_id: Set(creator.id),
            max_members: Set(max_members),
            is_active: Set(true),
            created_at: Set(Utc::now()),
        }
        .insert(&txn)
        .await
        .map_err(|e| if is_unique_violation(&e) { name_conflict() } else { e.into() })?;

        let mut am: UserActive = creator.into();
        am.team_id = Set(Some(team.id));
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;

        txn.commit().await?;
        info!(team = team.id, leader = %creator_id, "team created");
        Ok(team)
    }

    pub async fn get_team(&self, id: i32) -> Result<TeamModel, AppError> {
        load_team(&self.database_connection, id, false).await
    }

    /// Teams with their member counts, oldest first.
    pub async fn list_teams(&self, include_inactive: bool) -> Result<Vec<(TeamModel, u64)>, AppError> {
        let mut q = Team::find().order_by_asc(entity::team::Column::Id);
        if !include_inactive {
            q = q.filter(entity::team::Column::IsActive.eq(true));
        }
        let teams = q.all(&self.database_connection).await?;

        let counts: HashMap<i32, i64> = User::find()
            .select_only()
            .column(entity::user::Column::TeamId)
            .column_as(Expr::col(entity::user::Column::Id).count(), "members")
            .filter(entity::user::Column::TeamId.is_not_null())
            .group_by(entity::user::Column::TeamId)
            .into_model::<TeamHeadcount>()
            .all(&self.database_connection)
            .await?
            .into_iter()
            .map(|row| (row.team_id, row.members))
            .collect();

        Ok(teams
            .into_iter()
            .map(|team| {
                let n = counts.get(&team.id).copied().unwrap_or(0).max(0) as u64;
                (team, n)
            })
            .collect())
    }

    pub async fn list_members(&self, team_id: i32) -> Result<Vec<UserModel>, AppError> {
        Ok(User::find()
            .filter(entity::user::Column::TeamId.eq(team_id))
            .order_by_asc(entity::user::Column::Username)
            .all(&self.database_connection)
            .await?)
    }

    pub async fn member_count(&self, team_id: i32) -> Result<u64, AppError> {
        count_members(&self.database_connection, team_id).await
    }

    pub async fn is_full(&self, team: &TeamModel) -> Result<bool, AppError> {
        Ok(self.member_count(team.id).await? >= team.max_members as u64)
    }

    /// Ask to join a team. Creates a pending invitation from the leader to the
    /// user; asking again while it is pending returns the same row.
    pub async fn join_team(&self, user_id: Uuid, team_id: i32) -> Result<Ensured<InviteModel>, AppError> {
        let txn = self.database_connection.begin().await?;
        let team = load_team(&txn, team_id, false).await?;
        let user = load_user(&txn, user_id, false).await?;

        if user.team_id.is_some() {
            return Err(AppError::AlreadyMember);
        }
        if !team.is_active {
            return Err(AppError::TeamInactive);
        }
        if count_members(&txn, team.id).await? >= team.max_members as u64 {
            return Err(AppError::TeamFull);
        }

        let invitation = ensure_pending_invitation(&txn, &team, &user).await?;
        txn.commit().await?;

        if invitation.was_created() {
            info!(team = team.id, user = %user.id, invitation = invitation.get().id, "join requested");
        }
        Ok(invitation)
    }

    pub async fn leave_team(&self, user_id: Uuid, team_id: i32) -> Result<(), AppError> {
        let txn = self.database_connection.begin().await?;
        let team = load_team(&txn, team_id, false).await?;
        let user = load_user(&txn, user_id, true).await?;

        if user.team_id != Some(team.id) {
            return Err(AppError::NotAMember);
        }
        if team.is_led_by(user.id) {
            return Err(AppError::LeaderCannotLeave);
        }

        let mut am: UserActive = user.into();
        am.team_id = Set(None);
        am.updated_at = Set(Utc::now());
        am.update(&txn).await?;

        txn.commit().await?;
        info!(team = team_id, user = %user_id, "member left team");
        Ok(())
    }

    /// Leader (or anyone allowed to manage any team) edits the team.
    pub async fn update_team(&self, actor: &UserModel, team_id: i32, changes: RTeamUpdate) -> Result<TeamModel, AppError> {
        let txn = self.database_connection.begin().await?;
        let team = load_team(&txn, team_id, true).await?;
        if !team.is_led_by(actor.id) && !actor.role.can(Capability::ManageAnyTeam) {
            return Err(AppError::NotLeader);
        }

        let members = count_members(&txn, team.id).await?;
        let mut am: TeamActive = team.into();

        if let Some(name) = changes.name {
            let name = clean_name(&name)?;
            if name_taken(&txn, &name, Some(team_id)).await? {
                return Err(name_conflict());
            }
            am.name = Set(name);
        }
        if let Some(description) = changes.description {
            am.description = Set(description.trim().to_string());
        }
        if let Some(max_members) = changes.max_members {
            let max_members = check_capacity_bounds(max_members)?;
            if (max_members as u64) < members {
                return Err(AppError::Validation(format!(
                    "The team already has {members} members"
                )));
            }
            am.max_members = Set(max_members);
        }
        if let Some(is_active) = changes.is_active {
            am.is_active = Set(is_active);
        }

        let team = am
            .update(&txn)
            .await
            .map_err(|e| if is_unique_violation(&e) { name_conflict() } else { e.into() })?;
        txn.commit().await?;
        info!(team = team.id, by = %actor.id, "team updated");
        Ok(team)
    }

    /// Remove a team together with its invitations and chat, releasing its members.
    pub async fn delete_team(&self, actor: &UserModel, team_id: i32) -> Result<(), AppError> {
        if !actor.role.can(Capability::ManageAnyTeam) {
            return Err(AppError::Forbidden);
        }
        let txn = self.database_connection.begin().await?;
        let team = load_team(&txn, team_id, true).await?;

        Message::delete_many()
            .filter(entity::message::Column::TeamId.eq(team.id))
            .exec(&txn)
            .await?;
        Invite::delete_many()
            .filter(entity::team_invite::Column::TeamId.eq(team.id))
            .exec(&txn)
            .await?;
        User::update_many()
            .col_expr(entity::user::Column::TeamId, Expr::value(Option::<i32>::None))
            .col_expr(entity::user::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::user::Column::TeamId.eq(team.id))
            .exec(&txn)
            .await?;
        Team::delete_by_id(team.id).exec(&txn).await?;

        txn.commit().await?;
        info!(team = team_id, by = %actor.id, "team deleted");
        Ok(())
    }
}
