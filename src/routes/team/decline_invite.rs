use crate::db::db_service::DbService;
use crate::routes::team::{redirect_on_failure, team_page};
use crate::types::response::{RedirectResult, StatusRedirect};
use crate::utils::webutils::CurrentUser;
use actix_web::{post, web};
use std::sync::Arc;

#[post("/invite/{invitation_id}/decline")]
pub async fn decline_invite(
    db: web::Data<Arc<DbService>>,
    path: web::Path<i32>,
    user: CurrentUser,
) -> RedirectResult {
    let invitation = db.get_invitation(path.into_inner()).await?;
    let page = team_page(invitation.team_id);

    match db.decline_invitation(user.id, invitation.id).await {
        Ok(declined) => {
            let invited = db.get_user_by_id(&declined.invited_user_id).await?;
            Ok(StatusRedirect::success(&page, format!("Request from {} declined", invited.username)))
        }
        Err(e) => redirect_on_failure(e, &page),
    }
}
