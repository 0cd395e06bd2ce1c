use crate::db::db_service::DbService;
use crate::types::chat::{ChatRoomView, ChatRoomsRes, MessageView};
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;
use actix_web::{get, web};
use std::sync::Arc;

/// The caller's own team chat, if they have a team.
#[get("")]
async fn chat_rooms(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
) -> ApiResult<ChatRoomsRes> {
    let Some(team_id) = user.team_id else {
        return Ok(ApiResponse::Ok(ChatRoomsRes { rooms: Vec::new() }));
    };

    let team = db.get_team(team_id).await?;
    let last_message = db
        .last_message(team.id)
        .await?
        .map(|m| MessageView::new(&m, user.id));

    Ok(ApiResponse::Ok(ChatRoomsRes {
        rooms: vec![ChatRoomView {
            team_id: team.id,
            team_name: team.name,
            last_message,
        }],
    }))
}
