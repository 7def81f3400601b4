use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, LoginResponse, MessageResponse, RegisterRequest},
        error::AuthError,
        services::{login_user, register_user},
    },
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

fn body_or_400<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AuthError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected request body");
            Err(AuthError::MalformedBody(rejection.body_text()))
        }
    }
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AuthError> {
    let req = body_or_400(payload)?;
    register_user(state.store.as_ref(), req).await?;
    Ok(Json(MessageResponse {
        msg: "Usuario registrado correctamente".into(),
    }))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AuthError> {
    let req = body_or_400(payload)?;
    let user = login_user(state.store.as_ref(), req).await?;
    Ok(Json(LoginResponse {
        msg: "Login exitoso".into(),
        user,
    }))
}
