use actix_web::{get, web};
use entity::user::Capability;
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{TeamListRes, TeamSummary};
use crate::utils::webutils::CurrentUser;

/// Public. Deactivated teams only show up for users allowed to see them.
#[get("")]
async fn list_teams(
    db: web::Data<Arc<DbService>>,
    user: Option<CurrentUser>,
) -> ApiResult<TeamListRes> {
    let include_inactive = user.map_or(false, |u| u.can(Capability::ViewInactiveTeams));
    let teams = db
        .list_teams(include_inactive)
        .await?
        .iter()
        .map(|(team, members)| TeamSummary::new(team, *members))
        .collect();

    Ok(ApiResponse::Ok(TeamListRes { teams }))
}
