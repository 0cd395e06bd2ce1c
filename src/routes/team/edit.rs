use actix_web::{post, web};
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamUpdate, TeamSummary};
use crate::utils::webutils::CurrentUser;

#[post("/{id}/edit")]
async fn edit_team(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
    data: web::Json<RTeamUpdate>,
) -> ApiResult<TeamSummary> {
    let team = db.update_team(&user, path.into_inner(), data.into_inner()).await?;
    let members = db.member_count(team.id).await?;
    Ok(ApiResponse::Ok(TeamSummary::new(&team, members)))
}
