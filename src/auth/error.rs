use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::error;

use crate::auth::dto::{FieldError, MessageResponse, ValidationErrors};

pub const MSG_DUPLICATE: &str = "El usuario ya existe";
pub const MSG_BAD_CREDENTIALS: &str = "Credenciales inválidas";
pub const MSG_SERVER_ERROR: &str = "Error en el servidor";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed on {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("account already exists")]
    DuplicateAccount,

    #[error("no account for email")]
    NotFound,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("infrastructure error: {0:#}")]
    Infrastructure(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = match self {
            AuthError::Validation(errors) => {
                return (status, Json(ValidationErrors { errors })).into_response();
            }
            AuthError::MalformedBody(detail) => detail,
            AuthError::DuplicateAccount => MSG_DUPLICATE.into(),
            // Same body for both so the response does not reveal whether the email exists.
            AuthError::NotFound | AuthError::InvalidCredentials => MSG_BAD_CREDENTIALS.into(),
            AuthError::Infrastructure(e) => {
                error!(error = ?e, "auth request failed");
                MSG_SERVER_ERROR.into()
            }
        };
        (status, Json(MessageResponse { msg })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AuthError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_and_wrong_password_are_indistinguishable() {
        let a = body_json(AuthError::NotFound).await;
        let b = body_json(AuthError::InvalidCredentials).await;
        assert_eq!(a, b);
        assert_eq!(a.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn infrastructure_error_hides_detail() {
        let (status, body) =
            body_json(AuthError::from(anyhow::anyhow!("password authentication failed for user postgres"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["msg"], MSG_SERVER_ERROR);
    }

    #[tokio::test]
    async fn validation_errors_render_as_list() {
        let (status, body) = body_json(AuthError::Validation(vec![FieldError {
            kind: "field",
            path: "email",
            msg: "Debe ser un email válido",
            location: "body",
        }]))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["errors"][0]["path"], "email");
        assert_eq!(body["errors"][0]["type"], "field");
        assert!(body.get("msg").is_none());
    }
}
