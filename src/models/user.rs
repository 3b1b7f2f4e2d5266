//! User model, session claims and permission checks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::error::AppError;

/// Library account (reader or staff)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Staff accounts may create, edit and delete catalog records from the pages
    pub is_staff: bool,
    /// May see every loan and renew them
    pub can_mark_returned: bool,
    pub crea_date: DateTime<Utc>,
}

/// Session claims carried in the signed session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub is_staff: bool,
    pub can_mark_returned: bool,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Build claims for `user`, valid for `hours`
    pub fn for_user(user: &User, hours: u64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user.username.clone(),
            user_id: user.id,
            is_staff: user.is_staff,
            can_mark_returned: user.can_mark_returned,
            exp: now + (hours as i64 * 3600),
            iat: now,
        }
    }

    /// Create a signed token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a signed token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    // Authorization checks
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff {
            Ok(())
        } else {
            Err(AppError::Authorization("Staff account required".to_string()))
        }
    }

    pub fn require_mark_returned(&self) -> Result<(), AppError> {
        if self.can_mark_returned {
            Ok(())
        } else {
            Err(AppError::Authorization("Insufficient rights to manage loans".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(is_staff: bool, can_mark_returned: bool) -> User {
        User {
            id: 42,
            username: "reader".to_string(),
            password_hash: "hash".to_string(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            is_staff,
            can_mark_returned,
            crea_date: Utc::now(),
        }
    }

    #[test]
    fn test_token_roundtrip() {
        let claims = UserClaims::for_user(&user(true, false), 1);
        let token = claims.create_token("secret").unwrap();
        let parsed = UserClaims::from_token(&token, "secret").unwrap();
        assert_eq!(parsed.user_id, 42);
        assert_eq!(parsed.sub, "reader");
        assert!(parsed.is_staff);
    }

    #[test]
    fn test_token_wrong_secret() {
        let token = UserClaims::for_user(&user(false, false), 1)
            .create_token("secret")
            .unwrap();
        assert!(UserClaims::from_token(&token, "other").is_err());
    }

    #[test]
    fn test_permissions() {
        let reader = UserClaims::for_user(&user(false, false), 1);
        assert!(reader.require_staff().is_err());
        assert!(reader.require_mark_returned().is_err());

        let librarian = UserClaims::for_user(&user(true, true), 1);
        assert!(librarian.require_staff().is_ok());
        assert!(librarian.require_mark_returned().is_ok());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let json = serde_json::to_value(user(false, false)).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
