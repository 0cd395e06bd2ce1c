use crate::types::error::AppError;

pub mod messages;
pub mod rooms;
pub mod send;

/// Outsiders get "access denied" whether or not the team exists.
pub(crate) fn deny_outsiders(err: AppError) -> AppError {
    match err {
        AppError::NotAMember | AppError::NotFound(_) => AppError::AccessDenied,
        other => other,
    }
}
