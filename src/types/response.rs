use serde::Serialize;
use crate::types::error::AppError;
use actix_web::{http::header, HttpResponse, Responder};

pub enum ApiResponse<T> {
    Ok(T),
    Created(T),
    NoContent,
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        match self {
            ApiResponse::Ok(v) => HttpResponse::Ok().json(v),
            ApiResponse::Created(v) => HttpResponse::Created()
                .json(v),
            ApiResponse::NoContent => HttpResponse::NoContent().finish(),
        }
    }
}

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Success,
    Info,
    Error,
}

impl StatusLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusLevel::Success => "success",
            StatusLevel::Info => "info",
            StatusLevel::Error => "error",
        }
    }
}

/// Post-redirect-get answer for the form surface: 303 to a page, carrying a
/// one-line status message in the query string.
#[derive(Debug, Clone)]
pub struct StatusRedirect {
    pub location: String,
    pub level: StatusLevel,
    pub message: String,
}

impl StatusRedirect {
    pub fn new(location: impl Into<String>, level: StatusLevel, message: impl Into<String>) -> Self {
        Self { location: location.into(), level, message: message.into() }
    }

    pub fn success(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(location, StatusLevel::Success, message)
    }

    pub fn info(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(location, StatusLevel::Info, message)
    }

    pub fn error(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(location, StatusLevel::Error, message)
    }

    pub fn target(&self) -> String {
        format!(
            "{}?level={}&status={}",
            self.location,
            self.level.as_str(),
            urlencoding::encode(&self.message)
        )
    }
}

impl Responder for StatusRedirect {
    type Body = actix_web::body::BoxBody;
    fn respond_to(self, _: &actix_web::HttpRequest) -> HttpResponse {
        HttpResponse::SeeOther()
            .insert_header((header::LOCATION, self.target()))
            .finish()
    }
}

pub type RedirectResult = Result<StatusRedirect, AppError>;
