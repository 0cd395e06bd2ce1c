use crate::db::db_service::DbService;
use crate::types::error::AppError;
use crate::types::response::{ApiResponse, ApiResult};
use crate::types::token::construct_token;
use crate::types::user::{DBUserCreate, RUserCreate, UserCreateRes};
use crate::utils::token::{encrypt, new_secret};
use actix_web::{post, web};
use std::sync::Arc;

/// Admin-key only. The plain token is returned here and never again.
#[post("")]
async fn create(
    _req: actix_web::HttpRequest,
    db: web::Data<Arc<DbService>>,
    body: web::Json<RUserCreate>,
) -> ApiResult<UserCreateRes> {
    let body = body.into_inner();
    let secret = new_secret();
    let hashed = encrypt(&secret).map_err(|e| AppError::Internal(format!("hashing failed: {e}")))?;

    let user_id = db
        .create_user(DBUserCreate {
            username: body.username,
            email: body.email,
            token: hashed,
            role: body.role,
            skills: body.skills,
            about: body.about,
        })
        .await?;

    Ok(ApiResponse::Created(UserCreateRes {
        id: user_id,
        token: construct_token(&user_id, &secret),
    }))
}
