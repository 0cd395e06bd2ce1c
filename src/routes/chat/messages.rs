use crate::db::db_service::DbService;
use crate::routes::chat::deny_outsiders;
use crate::types::chat::{MessageView, MessagesRes};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;
use actix_web::{get, web};
use std::sync::Arc;

/// Polled by the chat page every few seconds; always the full history.
#[get("/messages/{team_id}")]
async fn get_messages(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<MessagesRes> {
    let messages = db
        .list_messages(user.id, path.into_inner())
        .await
        .map_err(deny_outsiders)?
        .iter()
        .map(|m| MessageView::new(m, user.id))
        .collect();

    Ok(ApiResponse::Ok(MessagesRes { messages }))
}
