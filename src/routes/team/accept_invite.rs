use crate::db::db_service::DbService;
use crate::routes::team::{redirect_on_failure, team_page};
use crate::types::response::{RedirectResult, StatusRedirect};
use crate::utils::webutils::CurrentUser;
use actix_web::{post, web};
use std::sync::Arc;

#[post("/invite/{invitation_id}/accept")]
pub async fn accept_invite(
    db: web::Data<Arc<DbService>>,
    path: web::Path<i32>,
    user: CurrentUser,
) -> RedirectResult {
    let invitation = db.get_invitation(path.into_inner()).await?;
    let page = team_page(invitation.team_id);

    match db.accept_invitation(user.id, invitation.id).await {
        Ok(accepted) => {
            let joined = db.get_user_by_id(&accepted.invited_user_id).await?;
            Ok(StatusRedirect::success(&page, format!("{} joined the team", joined.username)))
        }
        Err(e) => redirect_on_failure(e, &page),
    }
}
