use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    User,
    Team,
    Invitation,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::User => write!(f, "user"),
            Resource::Team => write!(f, "team"),
            Resource::Invitation => write!(f, "invitation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Authentication,
    Authorization,
    NotFound,
    Conflict,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    // bad input
    #[error("validation error: {0}")]
    Validation(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("message content is empty")]
    EmptyContent,

    #[error("unauthorized")]
    Unauthorized,

    // who may do what
    #[error("not a member of this team")]
    NotAMember,
    #[error("only the team leader can do this")]
    NotLeader,
    #[error("access denied")]
    AccessDenied,
    #[error("forbidden")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(Resource),

    // state conflicts
    #[error("already a member of a team")]
    AlreadyMember,
    #[error("team is full")]
    TeamFull,
    #[error("invitation already resolved")]
    AlreadyResolved,
    #[error("team leader cannot leave the team")]
    LeaderCannotLeave,
    #[error("team is not active")]
    TeamInactive,
    #[error("already exists")]
    AlreadyExists,

    // infra things
    #[error(transparent)]
    Db(#[from] DbErr),
    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    code: &'a str,
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_) | Self::BadRequest(_) | Self::EmptyContent => ErrorCategory::Validation,
            Self::Unauthorized => ErrorCategory::Authentication,
            Self::NotAMember | Self::NotLeader | Self::AccessDenied | Self::Forbidden => {
                ErrorCategory::Authorization
            }
            Self::NotFound(_) => ErrorCategory::NotFound,
            Self::AlreadyMember
            | Self::TeamFull
            | Self::AlreadyResolved
            | Self::LeaderCannotLeave
            | Self::TeamInactive
            | Self::AlreadyExists => ErrorCategory::Conflict,
            Self::Db(_) | Self::Internal(_) => ErrorCategory::Internal,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::EmptyContent => "EMPTY_CONTENT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::NotAMember => "NOT_A_MEMBER",
            Self::NotLeader => "NOT_LEADER",
            Self::AccessDenied => "ACCESS_DENIED",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::TeamFull => "TEAM_FULL",
            Self::AlreadyResolved => "ALREADY_RESOLVED",
            Self::LeaderCannotLeave => "LEADER_CANNOT_LEAVE",
            Self::TeamInactive => "TEAM_INACTIVE",
            Self::AlreadyExists => "ALREADY_EXISTS",
            Self::Db(_) => "DB_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Text safe to hand to a client. Internal failures collapse to a generic line.
    pub fn public_message(&self) -> String {
        match self {
            Self::Db(_) | Self::Internal(_) => "Something went wrong. Please try again later.".to_string(),
            Self::Validation(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::EmptyContent => "Message content is required".to_string(),
            Self::Unauthorized => "Authentication required".to_string(),
            Self::NotAMember | Self::AccessDenied => "Access denied".to_string(),
            Self::NotLeader => "Only the team leader can do this".to_string(),
            Self::Forbidden => "Forbidden".to_string(),
            Self::NotFound(res) => format!("The requested {} was not found", res),
            Self::AlreadyMember => "You are already in a team".to_string(),
            Self::TeamFull => "The team is already full".to_string(),
            Self::AlreadyResolved => "The invitation has already been processed".to_string(),
            Self::LeaderCannotLeave => {
                "The team leader cannot leave the team. Transfer leadership first.".to_string()
            }
            Self::TeamInactive => "The team is not accepting members".to_string(),
            Self::AlreadyExists => "Already exists".to_string(),
        }
    }

    pub fn is_internal(&self) -> bool {
        self.category() == ErrorCategory::Internal
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self.category() {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::Authentication => StatusCode::UNAUTHORIZED,
            ErrorCategory::Authorization => StatusCode::FORBIDDEN,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Conflict => StatusCode::CONFLICT,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            error!(error = %self, "request failed");
        }
        let message = self.public_message();
        HttpResponse::build(self.status_code())
            .json(ErrorBody { error: &message, code: self.kind() })
    }
}
