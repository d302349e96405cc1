use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config;
use crate::database::models::user::{Role, User};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidToken(String),

    #[error("JWT secret not configured")]
    MissingSecret,

    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

/// Token claims: subject is the user id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub role: Role,
    pub name: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;

        Self {
            sub: user.id,
            role: user.role(),
            name: user.name.clone(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(expiry_hours as i64)).timestamp(),
        }
    }
}

fn secret() -> Result<&'static str, AuthError> {
    let secret = config::config().security.jwt_secret.as_str();
    if secret.is_empty() {
        return Err(AuthError::MissingSecret);
    }
    Ok(secret)
}

pub fn issue_token(claims: &Claims) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret()?.as_bytes());
    encode(&Header::default(), claims, &key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

/// Verifies signature and expiry
pub fn validate_token(token: &str) -> Result<Claims, AuthError> {
    let key = DecodingKey::from_secret(secret()?.as_bytes());
    decode::<Claims>(token, &key, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| AuthError::InvalidToken(format!("Invalid JWT token: {}", e)))
}

pub fn hash_password(password: &str) -> Result<String, AuthError> {
    hash_password_with_cost(password, config::config().security.bcrypt_cost)
}

pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::hash(password, cost).map_err(|e| AuthError::Hashing(e.to_string()))
}

/// A malformed stored hash is a failed match, not an error
pub fn verify_password(password: &str, hash: &str) -> bool {
    match bcrypt::verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!("Stored password hash could not be verified: {}", e);
            false
        }
    }
}

// Compared against when an account is unknown or has no stored hash, at the
// same cost as real hashes
static PLACEHOLDER_HASH: Lazy<String> = Lazy::new(|| {
    hash_password("dispatch-console/no-such-account").unwrap_or_else(|e| {
        tracing::error!("Could not build placeholder password hash: {}", e);
        String::new()
    })
});

/// Checks `password` against `stored`. Without a stored hash it still runs one
/// bcrypt verification so unknown accounts answer in the same time, and
/// always returns false.
pub fn verify_password_or_placeholder(password: &str, stored: Option<&str>) -> bool {
    match stored {
        Some(hash) => verify_password(password, hash),
        None => {
            let _ = verify_password(password, &PLACEHOLDER_HASH);
            false
        }
    }
}

pub const MIN_PASSWORD_LENGTH: usize = 6;

pub fn validate_password_strength(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::user::STATUS_ACTIVE;

    fn admin() -> User {
        User {
            id: 1,
            name: "Paulo Admin".into(),
            email: "paulo@ascel.com".into(),
            password: None,
            role: "Administrador".into(),
            status: STATUS_ACTIVE.into(),
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_round_trips_user_identity() {
        let claims = Claims::for_user(&admin());
        let token = issue_token(&claims).unwrap();
        let decoded = validate_token(&token).unwrap();

        assert_eq!(decoded.sub, 1);
        assert_eq!(decoded.role, Role::Administrador);
        assert_eq!(decoded.name, "Paulo Admin");
    }

    #[test]
    fn tokens_expire_after_configured_hours() {
        let claims = Claims::for_user(&admin());
        let hours = config::config().security.jwt_expiry_hours as i64;
        assert_eq!(claims.exp - claims.iat, hours * 3600);
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let mut claims = Claims::for_user(&admin());
        claims.iat -= 10 * 3600;
        claims.exp = claims.iat + 3600;
        let token = issue_token(&claims).unwrap();
        assert!(matches!(validate_token(&token), Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn tampered_tokens_are_rejected() {
        let token = issue_token(&Claims::for_user(&admin())).unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(validate_token(&tampered).is_err());
    }

    #[test]
    fn password_hash_verifies_only_matching_input() {
        let hash = hash_password_with_cost("s3nha-forte", 4).unwrap();
        assert!(verify_password("s3nha-forte", &hash));
        assert!(!verify_password("outra-senha", &hash));
        assert!(!verify_password("s3nha-forte", "not-a-bcrypt-hash"));
    }

    #[test]
    fn placeholder_hash_uses_configured_cost() {
        let cost = format!("{:02}", config::config().security.bcrypt_cost);
        assert_eq!(PLACEHOLDER_HASH.split('$').nth(2), Some(cost.as_str()));
    }

    #[test]
    fn missing_hash_never_verifies_but_costs_a_full_check() {
        let hash = hash_password("s3nha-forte").unwrap();
        Lazy::force(&PLACEHOLDER_HASH);

        let start = std::time::Instant::now();
        assert!(!verify_password_or_placeholder("s3nha-errada", Some(&hash)));
        let wrong_password = start.elapsed();

        let start = std::time::Instant::now();
        assert!(!verify_password_or_placeholder("s3nha-forte", None));
        let unknown_account = start.elapsed();

        assert!(
            unknown_account * 3 >= wrong_password,
            "unknown {:?} vs wrong password {:?}",
            unknown_account,
            wrong_password
        );
    }

    #[test]
    fn short_passwords_are_rejected() {
        assert!(validate_password_strength("abc").is_err());
        assert!(validate_password_strength("abcdef").is_ok());
    }
}
