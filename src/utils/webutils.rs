use actix_web::{dev::Payload, dev::ServiceRequest, error::ErrorUnauthorized, web, FromRequest, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use entity::user::{Capability, Model as UserModel};
use std::future::Future;
use subtle::ConstantTimeEq;
use std::pin::Pin;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::EnvConfig;
use crate::db::db_service::DbService;
use crate::types::error::AppError;
use crate::types::token::extract_token_parts;
use crate::utils::token::verify;

/// Constant-time comparison against the configured key. An empty key matches nothing.
pub(crate) fn admin_key_matches(expected: &str, given: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(given.as_bytes()))
}

/// Guards the user bootstrap routes: the bearer must be the configured admin key.
pub async fn validate_admin_token(req: ServiceRequest, credentials: BearerAuth) -> Result<ServiceRequest, (actix_web::Error, ServiceRequest)> {
    let admin_key = req.app_data::<web::Data<EnvConfig>>().map(|c| c.admin_key.clone());
    match admin_key {
        Some(key) if admin_key_matches(&key, credentials.token()) => Ok(req),
        _ => {
            warn!(path = %req.path(), "rejected admin request");
            Err((ErrorUnauthorized("Invalid token"), req))
        }
    }
}

/// Resolve a bearer token to the user it belongs to.
pub async fn authenticate(db: &DbService, token: &str) -> Result<UserModel, AppError> {
    let parts = extract_token_parts(token).ok_or(AppError::Unauthorized)?;
    let user = match db.find_user(parts.user_id).await? {
        Some(u) => u,
        None => {
            debug!(user = %parts.user_id, "token for unknown user");
            return Err(AppError::Unauthorized);
        }
    };
    match verify(&parts.secret, &user.token) {
        Ok(true) => Ok(user),
        Ok(false) => Err(AppError::Unauthorized),
        Err(e) => Err(AppError::Internal(format!("stored token hash unreadable: {e}"))),
    }
}

/// The authenticated caller, loaded fresh from the database for every request.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserModel);

impl CurrentUser {
    pub fn can(&self, capability: Capability) -> bool {
        self.0.role.can(capability)
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.can(capability) { Ok(()) } else { Err(AppError::Forbidden) }
    }
}

impl std::ops::Deref for CurrentUser {
    type Target = UserModel;
    fn deref(&self) -> &UserModel {
        &self.0
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let auth = BearerAuth::extract(&req).await.map_err(|_| AppError::Unauthorized)?;
            let db = req
                .app_data::<web::Data<Arc<DbService>>>()
                .ok_or_else(|| AppError::Internal("database service not registered".into()))?;
            let user = authenticate(db, auth.token()).await?;
            Ok(CurrentUser(user))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_key_must_match_exactly() {
        assert!(admin_key_matches("s3cret", "s3cret"));
        assert!(!admin_key_matches("s3cret", "s3cre"));
        assert!(!admin_key_matches("s3cret", "s3cret!"));
        assert!(!admin_key_matches("s3cret", "S3CRET"));
        assert!(!admin_key_matches("", ""));
    }
}
