use tracing::{info, warn};

use crate::auth::{
    dto::{LoginRequest, PublicUser, RegisterRequest},
    error::AuthError,
    password::{hash_password_blocking, verify_against_dummy, verify_password_blocking},
    repo::UserStore,
    repo_types::{InsertOutcome, NewUser},
    validation::{normalize_email, validate_login, validate_register},
};

/// Validate, reject duplicates, hash and insert. Returns the new user's id.
pub async fn register_user(
    store: &dyn UserStore,
    mut req: RegisterRequest,
) -> Result<i64, AuthError> {
    req.email = normalize_email(&req.email);
    validate_register(&req).map_err(AuthError::Validation)?;

    if store.find_by_email(&req.email).await?.is_some() {
        warn!(email = %req.email, "email already registered");
        return Err(AuthError::DuplicateAccount);
    }

    let password_hash = hash_password_blocking(req.password).await?;
    let new_user = NewUser {
        email: req.email,
        password_hash,
        display_name: req.nombre.trim().to_string(),
    };

    match store.create(&new_user).await? {
        InsertOutcome::Created(user) => {
            info!(user_id = user.id, email = %user.email, "user registered");
            Ok(user.id)
        }
        InsertOutcome::EmailTaken => {
            warn!(email = %new_user.email, "email registered concurrently");
            Err(AuthError::DuplicateAccount)
        }
    }
}

/// Check credentials and return the public projection of the account.
pub async fn login_user(
    store: &dyn UserStore,
    mut req: LoginRequest,
) -> Result<PublicUser, AuthError> {
    req.email = normalize_email(&req.email);
    validate_login(&req).map_err(AuthError::Validation)?;

    let Some(user) = store.find_by_email(&req.email).await? else {
        verify_against_dummy(req.password).await;
        warn!(email = %req.email, "login unknown email");
        return Err(AuthError::NotFound);
    };

    if !verify_password_blocking(req.password, user.password_hash.clone()).await? {
        warn!(user_id = user.id, "login invalid password");
        return Err(AuthError::InvalidCredentials);
    }

    if !user.active {
        warn!(user_id = user.id, "login on inactive account");
        return Err(AuthError::InvalidCredentials);
    }

    let rol = user.role()?;
    info!(user_id = user.id, "user logged in");
    Ok(PublicUser {
        id: user.id,
        nombre: user.display_name,
        rol,
    })
}
