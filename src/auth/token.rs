use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Signing and verification settings, shared across requests via `AppState`.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub secret: Arc<Vec<u8>>,
    pub issuer: String,
    pub audience: String,
    pub exp_hours: i64,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| AppError::configuration("JWT_SECRET not set"))?;
        let issuer = std::env::var("JWT_ISSUER").map_err(|_| AppError::configuration("JWT_ISSUER not set"))?;
        let audience =
            std::env::var("JWT_AUDIENCE").map_err(|_| AppError::configuration("JWT_AUDIENCE not set"))?;
        let exp_hours = std::env::var("JWT_EXP_HOURS")
            .map(|val| val.parse::<i64>())
            .unwrap_or(Ok(24))
            .map_err(|_| AppError::configuration("JWT_EXP_HOURS must be a valid integer"))?;

        Ok(Self {
            secret: Arc::new(secret.into_bytes()),
            issuer,
            audience,
            exp_hours,
        })
    }

    /// Issue a token carrying the given permission tags, valid for the
    /// configured lifetime.
    pub fn encode(&self, permissions: &[String]) -> Result<String, AppError> {
        self.encode_with_lifetime(permissions, self.exp_hours)
    }

    /// Issue a token with an explicit lifetime. A non-positive `hours`
    /// yields an already-expired token.
    pub fn encode_with_lifetime(&self, permissions: &[String], hours: i64) -> Result<String, AppError> {
        use chrono::{Duration, Utc};

        let now = Utc::now();
        let exp = now + Duration::hours(hours);

        let claims = Claims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: None,
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
            permissions: Some(permissions.to_vec()),
        };

        self.sign(&claims)
    }

    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        jsonwebtoken::encode(&Header::default(), claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|err| AppError::internal(format!("failed to sign token: {err}")))
    }

    /// Verify a raw compact JWT: signature, expiry, issuer, audience. Pure,
    /// no key fetching; the secret is pre-configured.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);

        jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &validation)
            .map(|data| data.claims)
            .map_err(map_jwt_error)
    }
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AppError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AppError::ExpiredToken,
        ErrorKind::InvalidSignature => AppError::InvalidSignature,
        ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience | ErrorKind::MissingRequiredClaim(_) => {
            AppError::InvalidClaims
        }
        // Anything else means the token text itself is not a usable JWT.
        _ => AppError::MalformedAuth,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub aud: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub iat: usize,
    pub exp: usize,
    /// Absent on tokens minted without a permissions scope; that absence is a
    /// distinct checker failure, not a verification failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

impl Claims {
    /// Permission checker: membership of `permission` in the token's
    /// permissions claim.
    pub fn require(&self, permission: &str) -> Result<(), AppError> {
        let permissions = self
            .permissions
            .as_ref()
            .ok_or(AppError::MissingPermissionsClaim)?;

        if permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AppError::PermissionDenied(permission.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn config() -> AuthConfig {
        AuthConfig {
            secret: Arc::new(b"unit-test-secret".to_vec()),
            issuer: "casting-agency".to_string(),
            audience: "casting-agency-clients".to_string(),
            exp_hours: 1,
        }
    }

    fn claims_for(config: &AuthConfig, permissions: Option<Vec<String>>) -> Claims {
        let now = Utc::now().timestamp() as usize;
        Claims {
            iss: config.issuer.clone(),
            aud: config.audience.clone(),
            sub: None,
            iat: now,
            exp: now + 3600,
            permissions,
        }
    }

    #[test]
    fn verify_round_trips_permissions() {
        let config = config();
        let token = config.encode(&["get:actors".to_string()]).unwrap();
        let claims = config.verify(&token).unwrap();

        assert_eq!(claims.iss, config.issuer);
        assert_eq!(claims.permissions, Some(vec!["get:actors".to_string()]));
    }

    #[test]
    fn expired_token_is_its_own_failure() {
        let config = config();
        let token = config.encode_with_lifetime(&[], -1).unwrap();

        assert!(matches!(config.verify(&token), Err(AppError::ExpiredToken)));
    }

    #[test]
    fn wrong_secret_fails_signature_check() {
        let config = config();
        let other = AuthConfig {
            secret: Arc::new(b"some-other-secret".to_vec()),
            ..config.clone()
        };
        let token = other.encode(&[]).unwrap();

        assert!(matches!(config.verify(&token), Err(AppError::InvalidSignature)));
    }

    #[test]
    fn wrong_issuer_fails_claims_check() {
        let config = config();
        let other = AuthConfig {
            issuer: "somebody-else".to_string(),
            ..config.clone()
        };
        let token = other.encode(&[]).unwrap();

        assert!(matches!(config.verify(&token), Err(AppError::InvalidClaims)));
    }

    #[test]
    fn wrong_audience_fails_claims_check() {
        let config = config();
        let other = AuthConfig {
            audience: "another-app".to_string(),
            ..config.clone()
        };
        let token = other.encode(&[]).unwrap();

        assert!(matches!(config.verify(&token), Err(AppError::InvalidClaims)));
    }

    #[test]
    fn garbage_token_is_malformed() {
        let config = config();
        assert!(matches!(config.verify("sus"), Err(AppError::MalformedAuth)));
    }

    #[test]
    fn require_checks_membership() {
        let config = config();
        let claims = claims_for(&config, Some(vec!["get:actors".to_string()]));

        assert!(claims.require("get:actors").is_ok());
        assert!(matches!(
            claims.require("post:actors"),
            Err(AppError::PermissionDenied(p)) if p == "post:actors"
        ));
    }

    #[test]
    fn require_distinguishes_missing_claim_from_denial() {
        let config = config();
        let claims = claims_for(&config, None);

        assert!(matches!(
            claims.require("get:actors"),
            Err(AppError::MissingPermissionsClaim)
        ));
    }
}
