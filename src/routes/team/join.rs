use actix_web::{post, web};
use entity::user::Capability;
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::routes::team::{redirect_on_failure, team_page};
use crate::types::response::{RedirectResult, StatusRedirect};
use crate::utils::webutils::CurrentUser;

#[post("/{id}/join")]
async fn join_team(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> RedirectResult {
    let team_id = path.into_inner();
    let page = team_page(team_id);
    if let Err(e) = user.require(Capability::JoinTeam) {
        return redirect_on_failure(e, &page);
    }

    match db.join_team(user.id, team_id).await {
        Ok(inv) if inv.was_created() => Ok(StatusRedirect::success(&page, "Join request sent to the team leader")),
        Ok(_) => Ok(StatusRedirect::info(&page, "You have already asked to join this team")),
        Err(e) => redirect_on_failure(e, &page),
    }
}
