use std::sync::Arc;

use actix_web::{post, web};
use tracing::info;

use crate::{
    db::db_service::DbService,
    types::{
        response::{ApiResponse, ApiResult},
        token::construct_token,
        user::UserRegenerateTokenRes,
    },
    utils::webutils::CurrentUser,
};

#[post("/regenerate")]
async fn regenerate(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
) -> ApiResult<UserRegenerateTokenRes> {
    let secret = db.regenerate_user_token(&user.id).await?;
    info!(user = %user.id, "access token regenerated");

    Ok(ApiResponse::Ok(UserRegenerateTokenRes {
        token: construct_token(&user.id, &secret),
        message: "Regenerated user token. The previous token no longer works.".to_string(),
    }))
}
