use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::db::db_service::DbService;
use crate::types::response::{ApiResponse, ApiResult};

#[derive(Serialize, Deserialize)]
pub struct HealthRes {
    pub status: String,
}

/// Liveness plus a round trip to the database.
#[get("")]
async fn health(db: web::Data<Arc<DbService>>) -> ApiResult<HealthRes> {
    db.ping().await?;
    Ok(ApiResponse::Ok(HealthRes { status: "ok".to_string() }))
}
