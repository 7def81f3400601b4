use serde::{Deserialize, Serialize};

use crate::auth::repo_types::Role;

/// Request body for user registration.
///
/// Missing fields deserialize as empty strings so they are reported by
/// validation alongside the other field errors.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub nombre: String,
}

/// Request body for login.
#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Plain `{ "msg": ... }` body used by success and error responses.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub msg: String,
    pub user: PublicUser,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PublicUser {
    pub id: i64,
    pub nombre: String,
    pub rol: Role,
}

/// One failed validation rule.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub path: &'static str,
    pub msg: &'static str,
    pub location: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}
