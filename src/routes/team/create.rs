use actix_web::{post, web};
use entity::user::Capability;
use std::sync::Arc;
use crate::db::{db_service::DbService, teams::NewTeam};
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::team::{RTeamCreate, TeamCreateRes};
use crate::utils::webutils::CurrentUser;

#[post("")]
async fn create_team(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    data: web::Json<RTeamCreate>,
) -> ApiResult<TeamCreateRes> {
    user.require(Capability::CreateTeam)?;
    let data = data.into_inner();

    let team = db
        .create_team(user.id, NewTeam {
            name: data.name,
            description: data.description,
            max_members: data.max_members,
        })
        .await?;

    Ok(ApiResponse::Created(TeamCreateRes {
        id: team.id,
        message: format!("Team {} has been successfully created.", team.name),
    }))
}
