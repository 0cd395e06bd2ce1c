use crate::db::db_service::DbService;
use crate::routes::chat::deny_outsiders;
use crate::types::chat::{MessageView, RChatSend, SendMessageRes};
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;
use actix_web::{post, web};
use entity::user::Capability;
use std::sync::Arc;

#[post("/send")]
async fn send_message(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    body: web::Json<RChatSend>,
) -> ApiResult<SendMessageRes> {
    user.require(Capability::UseChat)?;
    let body = body.into_inner();

    let content = body.content.unwrap_or_default();
    if content.trim().is_empty() {
        return Err(AppError::EmptyContent);
    }
    let team_id = body
        .team_id
        .ok_or_else(|| AppError::BadRequest("team_id is required".into()))?;

    let posted = db
        .post_message(user.id, team_id, &content)
        .await
        .map_err(deny_outsiders)?;

    Ok(ApiResponse::Ok(SendMessageRes {
        success: true,
        message: MessageView::new(&posted, user.id),
    }))
}
