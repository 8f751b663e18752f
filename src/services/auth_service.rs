use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use password_hash::rand_core::OsRng;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set, TransactionTrait,
};
use sea_orm::ActiveValue::NotSet;

use crate::{
    config::AppConfig,
    dto::{
        auth::{Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UpdateProfileRequest},
        is_blank,
    },
    entity::users::{ActiveModel as UserActive, Column as UserCol, Entity as Users},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::UserProfile,
    state::AppState,
};

pub async fn register_user(
    state: &AppState,
    payload: RegisterRequest,
) -> AppResult<RegisterResponse> {
    let missing: Vec<&str> = [
        ("username", payload.username.as_deref()),
        ("email", payload.email.as_deref()),
        ("password", payload.password.as_deref()),
    ]
    .into_iter()
    .filter(|(_, value)| is_blank(*value))
    .map(|(field, _)| field)
    .collect();

    if !missing.is_empty() {
        return Err(AppError::validation(format!(
            "Missing required fields: {}",
            missing.join(", ")
        )));
    }

    let RegisterRequest {
        username,
        email,
        password,
        age,
    } = payload;
    let (username, email, password) = (
        username.unwrap_or_default(),
        email.unwrap_or_default(),
        password.unwrap_or_default(),
    );

    let txn = state.orm.begin().await?;

    let username_taken = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&txn)
        .await?
        .is_some();
    if username_taken {
        return Err(AppError::Conflict("Username already exists".into()));
    }

    let email_taken = Users::find()
        .filter(UserCol::Email.eq(email.as_str()))
        .one(&txn)
        .await?
        .is_some();
    if email_taken {
        return Err(AppError::Conflict("Email already exists".into()));
    }

    let user = UserActive {
        id: NotSet,
        username: Set(username),
        email: Set(email),
        password_hash: Set(hash_password(&password)?),
        age: Set(age),
        created_at: Set(Utc::now().into()),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    tracing::info!(user_id = user.id, username = %user.username, "user registered");

    Ok(RegisterResponse {
        message: "User created successfully".into(),
        user_id: user.id,
    })
}

pub async fn login_user(state: &AppState, payload: LoginRequest) -> AppResult<LoginResponse> {
    let (Some(username), Some(password)) = (payload.username, payload.password) else {
        return Err(AppError::validation("Missing username or password"));
    };

    let user = Users::find()
        .filter(UserCol::Username.eq(username.as_str()))
        .one(&state.orm)
        .await?;

    let user = match user {
        Some(u) if verify_password(&password, &u.password_hash)? => u,
        _ => {
            tracing::debug!(username = %username, "rejected login");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    let access_token = issue_token(user.id, &state.config)?;

    tracing::info!(user_id = user.id, "user logged in");

    Ok(LoginResponse {
        access_token,
        user_id: user.id,
    })
}

pub async fn get_profile(state: &AppState, user: &AuthUser) -> AppResult<UserProfile> {
    let profile = Users::find_by_id(user.user_id)
        .one(&state.orm)
        .await?
        .map(UserProfile::from);
    match profile {
        Some(p) => Ok(p),
        None => Err(AppError::not_found("User not found")),
    }
}

pub async fn update_profile(
    state: &AppState,
    user: &AuthUser,
    payload: UpdateProfileRequest,
) -> AppResult<UserProfile> {
    if payload.is_empty() {
        return Err(AppError::validation("No data provided"));
    }

    let txn = state.orm.begin().await?;

    let existing = Users::find_by_id(user.user_id).one(&txn).await?;
    let existing = match existing {
        Some(u) => u,
        None => return Err(AppError::not_found("User not found")),
    };

    let mut active: UserActive = existing.into();

    if let Some(username) = payload.username {
        if username.trim().is_empty() {
            return Err(AppError::validation("Username cannot be empty"));
        }
        let taken = Users::find()
            .filter(UserCol::Username.eq(username.as_str()))
            .filter(UserCol::Id.ne(user.user_id))
            .one(&txn)
            .await?
            .is_some();
        if taken {
            return Err(AppError::Conflict("Username already exists".into()));
        }
        active.username = Set(username);
    }
    if let Some(email) = payload.email {
        if email.trim().is_empty() {
            return Err(AppError::validation("Email cannot be empty"));
        }
        let taken = Users::find()
            .filter(UserCol::Email.eq(email.as_str()))
            .filter(UserCol::Id.ne(user.user_id))
            .one(&txn)
            .await?
            .is_some();
        if taken {
            return Err(AppError::Conflict("Email already exists".into()));
        }
        active.email = Set(email);
    }
    if let Some(age) = payload.age {
        active.age = Set(age);
    }
    if let Some(password) = payload.password {
        if password.is_empty() {
            return Err(AppError::validation("Password cannot be empty"));
        }
        active.password_hash = Set(hash_password(&password)?);
    }

    let updated = active.update(&txn).await?;
    txn.commit().await?;

    tracing::info!(user_id = updated.id, "profile updated");

    Ok(UserProfile::from(updated))
}

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

pub fn issue_token(user_id: i32, config: &AppConfig) -> AppResult<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(config.jwt_expires_hours))
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp() as usize,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::auth::decode_token;

    fn config() -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            host: "127.0.0.1".into(),
            port: 0,
            jwt_secret: "unit-test-secret".into(),
            jwt_expires_hours: 1,
            cors_origins: crate::config::default_origins(),
            poster_base_url: crate::config::DEFAULT_POSTER_BASE_URL.into(),
        }
    }

    #[test]
    fn password_hash_verifies_only_the_matching_password() {
        let hash = hash_password("pw").unwrap();
        assert!(verify_password("pw", &hash).unwrap());
        assert!(!verify_password("not-pw", &hash).unwrap());
    }

    #[test]
    fn issued_token_carries_the_user_id() {
        let config = config();
        let token = issue_token(42, &config).unwrap();
        let user = decode_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(user.user_id, 42);
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let token = issue_token(7, &config()).unwrap();
        let err = decode_token(&token, "other-secret").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let config = config();
        let past = (Utc::now() - Duration::hours(2)).timestamp() as usize;
        let claims = Claims {
            sub: "1".into(),
            iat: past,
            exp: past,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        match decode_token(&token, &config.jwt_secret) {
            Err(AppError::Unauthorized(message)) => assert!(message.contains("expired")),
            other => panic!("expected expired token error, got {other:?}"),
        }
    }
}
