use crate::db::db_service::{count_members, for_update, is_unique_violation, load_team, load_user, DbService};
use crate::types::error::{AppError, Resource};
use crate::types::invite::{join_request_message, Ensured};
use chrono::Utc;
use entity::team::Model as TeamModel;
use entity::team_invite::{
    ActiveModel as InviteActive, Entity as Invite, InvitationStatus, Model as InviteModel,
};
use entity::user::{ActiveModel as UserActive, Entity as User, Model as UserModel};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info};
use uuid::Uuid;

async fn find_pending<C: ConnectionTrait>(conn: &C, team_id: i32, user_id: Uuid) -> Result<Option<InviteModel>, AppError> {
    Ok(Invite::find()
        .filter(entity::team_invite::Column::TeamId.eq(team_id))
        .filter(entity::team_invite::Column::InvitedUserId.eq(user_id))
        .filter(entity::team_invite::Column::Status.eq(InvitationStatus::Pending))
        .one(conn)
        .await?)
}

async fn load_invitation<C: ConnectionTrait>(conn: &C, id: i32, lock: bool) -> Result<InviteModel, AppError> {
    let mut select = Invite::find_by_id(id);
    if lock {
        select = for_update(select, conn.get_database_backend());
    }
    select.one(conn).await?.ok_or(AppError::NotFound(Resource::Invitation))
}

/// Lookup-or-create the pending invitation for (team, user).
///
/// `Created` on the first call, `Existing` for every call while that row is
/// still pending.
pub(crate) async fn ensure_pending_invitation(
    txn: &DatabaseTransaction,
    team: &TeamModel,
    user: &UserModel,
) -> Result<Ensured<InviteModel>, AppError> {
    if let Some(existing) = find_pending(txn, team.id, user.id).await? {
        return Ok(Ensured::Existing(existing));
    }
    insert_pending(txn, team, user).await
}

/// Insert under a savepoint. Losing the race on the partial unique index
/// rolls back to the savepoint and hands back the winner's row.
async fn insert_pending(
    txn: &DatabaseTransaction,
    team: &TeamModel,
    user: &UserModel,
) -> Result<Ensured<InviteModel>, AppError> {
    let savepoint = txn.begin().await?;
    let inserted = InviteActive {
        id: NotSet,
        team_id: Set(team.id),
        invited_user_id: Set(user.id),
        invited_by: Set(team.leader_id),
        message: Set(join_request_message(&user.username)),
        status: Set(InvitationStatus::Pending),
        created_at: Set(Utc::now()),
        responded_at: Set(None),
    }
    .insert(&savepoint)
    .await;

    match inserted {
        Ok(invitation) => {
            savepoint.commit().await?;
            Ok(Ensured::Created(invitation))
        }
        Err(err) if is_unique_violation(&err) => {
            savepoint.rollback().await?;
            debug!(team = team.id, user = %user.id, "lost join request race");
            find_pending(txn, team.id, user.id)
                .await?
                .map(Ensured::Existing)
                .ok_or(AppError::Db(err))
        }
        Err(err) => Err(err.into()),
    }
}

impl DbService {
    pub async fn get_invitation(&self, id: i32) -> Result<InviteModel, AppError> {
        load_invitation(&self.database_connection, id, false).await
    }

    pub async fn find_pending_invitation(&self, team_id: i32, user_id: Uuid) -> Result<Option<InviteModel>, AppError> {
        find_pending(&self.database_connection, team_id, user_id).await
    }

    /// Pending requests for a team, oldest first, with the requesting user.
    pub async fn list_pending_invitations(&self, team_id: i32) -> Result<Vec<(InviteModel, UserModel)>, AppError> {
        let rows = Invite::find()
            .filter(entity::team_invite::Column::TeamId.eq(team_id))
            .filter(entity::team_invite::Column::Status.eq(InvitationStatus::Pending))
            .order_by_asc(entity::team_invite::Column::CreatedAt)
            .order_by_asc(entity::team_invite::Column::Id)
            .find_also_related(User)
            .all(&self.database_connection)
            .await?;
        Ok(rows
            .into_iter()
            .filter_map(|(inv, user)| user.map(|u| (inv, u)))
            .collect())
    }

    /// Leader accepts a join request.
    ///
    /// Capacity is counted again here under the team row lock, in the same
    /// transaction that sets the user's team, so two accepts racing for the
    /// last seat cannot both win. Lock order is team, invitation, user.
    pub async fn accept_invitation(&self, actor_id: Uuid, invitation_id: i32) -> Result<InviteModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let team_id = load_invitation(&txn, invitation_id, false).await?.team_id;
        let team = load_team(&txn, team_id, true).await?;
        let invitation = load_invitation(&txn, invitation_id, true).await?;

        if !team.is_led_by(actor_id) {
            return Err(AppError::NotLeader);
        }
        if !invitation.status.is_pending() {
            return Err(AppError::AlreadyResolved);
        }

        let invited = load_user(&txn, invitation.invited_user_id, true).await?;
        if invited.team_id.is_some() {
            return Err(AppError::AlreadyMember);
        }
        if count_members(&txn, team.id).await? >= team.max_members as u64 {
            return Err(AppError::TeamFull);
        }

        let now = Utc::now();
        let mut am: InviteActive = invitation.into();
        am.status = Set(InvitationStatus::Accepted);
        am.responded_at = Set(Some(now));
        let invitation = am.update(&txn).await?;

        let mut um: UserActive = invited.into();
        um.team_id = Set(Some(team.id));
        um.updated_at = Set(now);
        um.update(&txn).await?;

        txn.commit().await?;
        info!(team = team.id, user = %invitation.invited_user_id, invitation = invitation.id, "join request accepted");
        Ok(invitation)
    }

    /// Leader declines a join request. Resolved invitations stay as they are.
    pub async fn decline_invitation(&self, actor_id: Uuid, invitation_id: i32) -> Result<InviteModel, AppError> {
        let txn = self.database_connection.begin().await?;

        let team_id = load_invitation(&txn, invitation_id, false).await?.team_id;
        let team = load_team(&txn, team_id, false).await?;
        if !team.is_led_by(actor_id) {
            return Err(AppError::NotLeader);
        }

        let invitation = load_invitation(&txn, invitation_id, true).await?;
        if !invitation.status.is_pending() {
            return Err(AppError::AlreadyResolved);
        }

        let mut am: InviteActive = invitation.into();
        am.status = Set(InvitationStatus::Declined);
        am.responded_at = Set(Some(Utc::now()));
        let invitation = am.update(&txn).await?;

        txn.commit().await?;
        info!(team = team.id, invitation = invitation.id, "join request declined");
        Ok(invitation)
    }
}
