use actix_web::{get, web};
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::types::invite::InvitationView;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{MemberView, TeamDetail, TeamSummary};
use crate::utils::webutils::CurrentUser;

#[get("/{id}")]
async fn team_detail(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<TeamDetail> {
    let team = db.get_team(path.into_inner()).await?;
    let members = db.list_members(team.id).await?;
    let is_leader = team.is_led_by(user.id);

    let pending_invitations = if is_leader {
        db.list_pending_invitations(team.id)
            .await?
            .into_iter()
            .map(|(inv, invited)| InvitationView::new(&inv, invited.username))
            .collect()
    } else {
        Vec::new()
    };

    Ok(ApiResponse::Ok(TeamDetail {
        team: TeamSummary::new(&team, members.len() as u64),
        is_member: user.team_id == Some(team.id),
        is_leader,
        members: members
            .into_iter()
            .map(|m| MemberView { id: m.id, username: m.username })
            .collect(),
        pending_invitations,
    }))
}
