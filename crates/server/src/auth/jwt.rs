use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shared_types::AuthUser;
use uuid::Uuid;

/// Audience the hosted auth provider stamps on signed-in user tokens.
const DEFAULT_AUDIENCE: &str = "authenticated";

/// Claims carried in an access token issued by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn auth_user(&self) -> AuthUser {
        AuthUser {
            id: self.sub,
            email: self.email.clone(),
            role: if self.role.is_empty() {
                DEFAULT_AUDIENCE.to_string()
            } else {
                self.role.clone()
            },
        }
    }

    /// Seconds until the token expires, never negative.
    pub fn remaining_secs(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

fn jwt_secret() -> Result<String, JwtError> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorKind::InvalidKeyFormat.into())
}

fn jwt_audience() -> String {
    std::env::var("JWT_AUDIENCE").unwrap_or_else(|_| DEFAULT_AUDIENCE.to_string())
}

/// Sign an HS256 access token. Used by the `dev-token` binary for local
/// sessions when the hosted provider is not available.
pub fn issue_access_token(
    user_id: Uuid,
    email: &str,
    ttl_minutes: i64,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role: DEFAULT_AUDIENCE.to_string(),
        aud: Some(jwt_audience()),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

/// Validate an access token's signature, expiry and audience.
pub fn validate_access_token(token: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[jwt_audience()]);
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_test_secret() {
        std::env::set_var("JWT_SECRET", "test-secret-key-for-jwt-unit-tests");
    }

    #[test]
    fn issue_and_validate_access_token() {
        setup_test_secret();
        let id = Uuid::new_v4();
        let token = issue_access_token(id, "owner@example.com", 15).unwrap();
        let claims = validate_access_token(&token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.email, "owner@example.com");
        assert!(claims.remaining_secs() > 0);

        let user = claims.auth_user();
        assert_eq!(user.id, id);
        assert_eq!(user.role, "authenticated");
    }

    #[test]
    fn expired_token_rejected() {
        setup_test_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "expired@test.com".to_string(),
            role: String::new(),
            aud: Some(DEFAULT_AUDIENCE.to_string()),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_secret().unwrap().as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&token).is_err());
    }

    #[test]
    fn wrong_audience_rejected() {
        setup_test_secret();
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: String::new(),
            role: String::new(),
            aud: Some("service_role".to_string()),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(jwt_secret().unwrap().as_bytes()),
        )
        .unwrap();

        assert!(validate_access_token(&token).is_err());
    }

    #[test]
    fn invalid_token_rejected() {
        setup_test_secret();
        assert!(validate_access_token("not.a.valid.jwt").is_err());
        assert!(validate_access_token("").is_err());
    }
}
