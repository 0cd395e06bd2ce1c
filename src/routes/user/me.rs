use crate::types::response::{ApiResponse, ApiResult};
use crate::types::user::UserProfile;
use crate::utils::webutils::CurrentUser;
use actix_web::get;

#[get("/me")]
async fn me(user: CurrentUser) -> ApiResult<UserProfile> {
    Ok(ApiResponse::Ok(UserProfile::from(&user.0)))
}
