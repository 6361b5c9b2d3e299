//! HS256 bearer tokens carrying the numeric user id in `sub`.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use ride_journal_sdk::SecurityContext;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use crate::config::{AuthConfig, ConfigError};
use crate::domain::error::IdentityError;
use crate::domain::ports::IdentityResolver;

const MIN_SECRET_LEN: usize = 32;

/// Payload of a ride-journal bearer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a decimal string.
    pub sub: String,
    pub iat: u64,
    pub exp: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

/// Verifies bearer tokens minted by the identity provider.
#[derive(Clone)]
pub struct JwtIdentityResolver {
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtIdentityResolver {
    /// # Errors
    /// `Invalid` when the secret is shorter than 32 bytes.
    pub fn new(cfg: &AuthConfig) -> Result<Self, ConfigError> {
        let secret = cfg.jwt_secret.expose_secret();
        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt_secret must be at least {MIN_SECRET_LEN} bytes"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = cfg.leeway_secs;
        if let Some(issuer) = &cfg.issuer {
            validation.set_issuer(&[issuer]);
        }

        Ok(Self {
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    fn verify(&self, token: &str) -> Result<Claims, IdentityError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| IdentityError::Invalid(e.to_string()))
    }
}

impl IdentityResolver for JwtIdentityResolver {
    fn resolve(&self, bearer: Option<&str>) -> Result<SecurityContext, IdentityError> {
        let raw = bearer
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(IdentityError::Missing)?;
        let token = raw.strip_prefix("Bearer ").unwrap_or(raw).trim();
        let claims = self.verify(token)?;
        let subject_id = claims
            .sub
            .parse::<i32>()
            .map_err(|_| IdentityError::Invalid("subject is not a user id".to_owned()))?;
        tracing::debug!(subject_id, "resolved caller identity");
        Ok(SecurityContext::for_subject(subject_id))
    }
}
