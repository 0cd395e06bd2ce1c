use actix_web::{delete, web};
use std::sync::Arc;
use crate::db::db_service::DbService;
use crate::types::response::{ApiResponse, ApiResult};
use crate::utils::webutils::CurrentUser;

#[delete("/{id}")]
async fn delete_team(
    db: web::Data<Arc<DbService>>,
    user: CurrentUser,
    path: web::Path<i32>,
) -> ApiResult<()> {
    db.delete_team(&user, path.into_inner()).await?;
    Ok(ApiResponse::NoContent)
}
