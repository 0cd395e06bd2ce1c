use actix_web::{post, web};
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::routes::team::{redirect_on_failure, team_page, TEAM_LIST_PAGE};
use crate::types::response::{RedirectResult, StatusRedirect};
use crate::utils::webutils::CurrentUser;

#[post("/{id}/leave")]
async fn leave_team(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> RedirectResult {
    let team_id = path.into_inner();
    match db.leave_team(user.id, team_id).await {
        Ok(()) => Ok(StatusRedirect::success(TEAM_LIST_PAGE, "You left the team")),
        Err(e) => redirect_on_failure(e, &team_page(team_id)),
    }
}
