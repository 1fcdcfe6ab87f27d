use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

use crate::config::Config;
use crate::entity::user;
use crate::error::{AppError, AppResult};
use crate::repositories::UserRepository;
use crate::schemas::CreateUser;

pub const PASSWORD_MIN_LEN: usize = 8;

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // user id
    pub email: String,
    pub exp: i64, // expiration timestamp
    pub iat: i64, // issued at timestamp
}

/// Plain-text registration input; the password is hashed before storage
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub name: Option<String>,
    pub surname: Option<String>,
}

pub struct AuthService;

impl AuthService {
    /// Hash a password using Argon2
    pub fn hash_password(password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AppError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }

    /// Generate a JWT token for a user
    pub fn generate_token(user_id: Uuid, email: &str, config: &Config) -> AppResult<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + Duration::hours(config.jwt_expiration_hours);

        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: exp.unix_timestamp(),
            iat: now.unix_timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
    }

    /// Verify and decode a JWT token
    pub fn verify_token(token: &str, config: &Config) -> AppResult<Claims> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }

    /// Create a user account, rejecting an email that is already taken
    pub async fn register(
        users: &UserRepository<'_>,
        registration: Registration,
    ) -> AppResult<user::Model> {
        if registration.password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                PASSWORD_MIN_LEN
            )));
        }

        let email = registration.email.trim().to_lowercase();
        if users.email_exists(&email).await? {
            return Err(AppError::Conflict("Email".to_string()));
        }

        let input = CreateUser {
            name: registration.name,
            surname: registration.surname,
            email,
            password_hash: Self::hash_password(&registration.password)?,
        };

        let user = users.create(input).await?;
        tracing::info!(user_id = %user.id, "User registered");
        Ok(user)
    }

    /// Look up a user by email and check the password
    pub async fn login(
        users: &UserRepository<'_>,
        email: &str,
        password: &str,
    ) -> AppResult<user::Model> {
        let user = users
            .find_by_email(&email.trim().to_lowercase())
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AppError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, LogFormat};

    fn test_config() -> Config {
        Config {
            database: DatabaseConfig::new("postgres://localhost/notes"),
            jwt_secret: "test-jwt-secret-that-is-at-least-32-characters-long".to_string(),
            jwt_expiration_hours: 24,
            host: "127.0.0.1".to_string(),
            port: 0,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn test_password_round_trip() {
        let hash = AuthService::hash_password("correct horse").unwrap();
        assert!(AuthService::verify_password("correct horse", &hash).unwrap());
        assert!(!AuthService::verify_password("wrong horse", &hash).unwrap());
    }

    #[test]
    fn test_token_round_trip() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = AuthService::generate_token(user_id, "ada@example.com", &config).unwrap();
        let claims = AuthService::verify_token(&token, &config).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "ada@example.com");
    }

    #[test]
    fn test_token_with_wrong_secret() {
        let config = test_config();
        let token = AuthService::generate_token(Uuid::new_v4(), "ada@example.com", &config).unwrap();

        let other = Config {
            jwt_secret: "another-secret-that-is-also-long-enough-to-use".to_string(),
            ..config
        };
        let result = AuthService::verify_token(&token, &other);
        assert!(matches!(result, Err(AppError::AuthorizationFailed)));
    }

    #[test]
    fn test_expired_token() {
        let config = Config {
            jwt_expiration_hours: -2,
            ..test_config()
        };
        let token = AuthService::generate_token(Uuid::new_v4(), "ada@example.com", &config).unwrap();

        let result = AuthService::verify_token(&token, &config);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_garbage_token() {
        let result = AuthService::verify_token("not.a.token", &test_config());
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }
}
