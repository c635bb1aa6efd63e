use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::{Principal, Role, User};
use crate::utils::time::now;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

/// Signing material and claim expectations for bearer tokens.
#[derive(Clone)]
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, issuer: &str, audience: &str, ttl_hours: i64) -> Result<Self> {
        let ttl = Duration::try_hours(ttl_hours).ok_or_else(|| {
            Error::Config(format!("TOKEN_TTL_HOURS out of range: {}", ttl_hours))
        })?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            ttl,
        })
    }

    pub fn issue(&self, user: &User) -> Result<String> {
        let issued_at = now();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            iat: issued_at.timestamp() as usize,
            exp: (issued_at + self.ttl).timestamp() as usize,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn decode(&self, token: &str) -> Result<Principal> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let data = decode::<Claims>(token, &self.decoding, &validation)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
        let claims = data.claims;
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;
        let role: Role = claims
            .role
            .parse()
            .map_err(|_| Error::Unauthorized("invalid_token".to_string()))?;

        Ok(Principal {
            user_id,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: "ada@example.com".into(),
            password_hash: String::new(),
            role,
            created_at: now(),
        }
    }

    #[test]
    fn issued_token_decodes_to_principal() {
        let keys = TokenKeys::new("secret", "iss", "aud", 24).unwrap();
        let user = user(Role::Reviewer);
        let token = keys.issue(&user).unwrap();
        let principal = keys.decode(&token).unwrap();
        assert_eq!(principal.user_id, user.id);
        assert_eq!(principal.role, Role::Reviewer);
        assert_eq!(principal.email, "ada@example.com");
    }

    #[test]
    fn rejects_foreign_audience_and_secret() {
        let keys = TokenKeys::new("secret", "iss", "aud", 24).unwrap();
        let token = keys.issue(&user(Role::Hr)).unwrap();

        let other_audience = TokenKeys::new("secret", "iss", "other", 24).unwrap();
        assert!(matches!(
            other_audience.decode(&token),
            Err(Error::Unauthorized(_))
        ));
        let other_secret = TokenKeys::new("nope", "iss", "aud", 24).unwrap();
        assert!(other_secret.decode(&token).is_err());
    }

    #[test]
    fn out_of_range_ttl_is_a_config_error() {
        assert!(matches!(
            TokenKeys::new("secret", "iss", "aud", i64::MAX),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("secret", "iss", "aud", -2).unwrap();
        let token = keys.issue(&user(Role::Recruiter)).unwrap();
        assert!(keys.decode(&token).is_err());
    }
}
