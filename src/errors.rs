use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use derive_more::Display;
use serde::Serialize;

/// One failed rule for one field, reported in request order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    ValidationError(Vec<FieldError>),
    NotFound(String),
    Conflict(String),
    UnauthorizedAccess,
    InvalidCredentials,
    DatabaseError(String),
    FileError(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::ValidationError(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation failed: {}", messages)
            }
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::UnauthorizedAccess => write!(f, "Unauthorized access"),
            AppError::InvalidCredentials => write!(f, "Invalid credentials"),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::FileError(msg) => write!(f, "File error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal server error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let body = match self {
            AppError::ValidationError(errors) => serde_json::json!({
                "message": "Validation failed",
                "status": status.as_u16(),
                "errors": errors
            }),
            AppError::NotFound(msg) => serde_json::json!({
                "message": msg,
                "status": status.as_u16(),
                "data": null
            }),
            AppError::Conflict(msg) => serde_json::json!({
                "message": msg,
                "status": status.as_u16()
            }),
            AppError::UnauthorizedAccess => serde_json::json!({
                "message": "Unauthorized",
                "status": status.as_u16(),
                "data": null
            }),
            AppError::InvalidCredentials => serde_json::json!({
                "message": "Invalid credentials",
                "status": status.as_u16(),
                "data": null
            }),
            // Raw detail stays in the server log; clients get a generic body.
            AppError::DatabaseError(msg)
            | AppError::FileError(msg)
            | AppError::InternalError(msg) => {
                tracing::error!("request failed: {}", msg);
                serde_json::json!({
                    "message": "Internal server error",
                    "status": status.as_u16()
                })
            }
        };
        HttpResponse::build(status)
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::UnauthorizedAccess | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::DatabaseError(_)
            | AppError::FileError(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Conflict("Duplicate record".into())
            }
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23503")) => {
                AppError::Conflict("Record is referenced by other data".into())
            }
            _ => AppError::DatabaseError(err.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid", field));
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        AppError::ValidationError(fields)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::FileError(err.to_string())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Token expired")]
    TokenExpired,

    #[display("Invalid credentials")]
    WrongCredentials,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Missing JWT service")]
    MissingJwtService,
}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let message = match self {
            AuthError::TokenCreation | AuthError::MissingJwtService => {
                tracing::error!("auth failure: {}", self);
                "Internal server error"
            }
            AuthError::WrongCredentials => "Invalid credentials",
            _ => "Unauthorized",
        };
        HttpResponse::build(status).json(serde_json::json!({
            "message": message,
            "status": status.as_u16(),
            "data": null
        }))
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::WrongCredentials
            | AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation | AuthError::MissingJwtService => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

#[derive(Debug, Display)]
pub enum PasswordError {
    #[display("Invalid password parameters: {_0}")]
    InvalidParameters(String),

    #[display("Password hashing failed: {_0}")]
    HashingError(String),

    #[display("Invalid password hash format: {_0}")]
    InvalidHashFormat(String),

    #[display("Password verification failed: {_0}")]
    VerificationError(String),
}

impl From<PasswordError> for AppError {
    fn from(err: PasswordError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl From<PasswordError> for AuthError {
    fn from(_: PasswordError) -> Self {
        AuthError::WrongCredentials
    }
}
