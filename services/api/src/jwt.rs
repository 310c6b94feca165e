//! Capability tokens: issuing and resolving the bearer credential that
//! proves a prior authentication.
//!
//! Tokens are HS256-signed JWTs carrying the technician id and email with a
//! server-checked expiry. Resolution is stateless; there is no server-side
//! session record to consult.

use anyhow::Result;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Seven days.
const DEFAULT_TOKEN_EXPIRY_SECONDS: u64 = 604_800;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Shared secret for signing and verifying tokens
    pub secret: String,
    /// Token expiration time in seconds (default: 7 days)
    pub token_expiry: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_SECRET`: shared signing secret (required)
    /// - `JWT_TOKEN_EXPIRY`: token expiry in seconds (default: 604800)
    pub fn from_env() -> Result<Self> {
        let secret = std::env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET environment variable not set"))?;

        let token_expiry = std::env::var("JWT_TOKEN_EXPIRY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_EXPIRY_SECONDS);

        Ok(JwtConfig {
            secret,
            token_expiry,
        })
    }
}

/// Claims carried by a capability token
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Technician ID
    pub sub: Uuid,
    /// Technician email
    pub email: String,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
}

/// Issues and resolves capability tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expiry: u64,
}

impl JwtService {
    /// Initialize a new JWT service
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;

        JwtService {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            token_expiry: config.token_expiry,
        }
    }

    /// Issue a capability for a technician
    pub fn issue(&self, technician_id: Uuid, email: &str) -> Result<String> {
        let now = unix_now()?;

        let claims = Claims {
            sub: technician_id,
            email: email.to_string(),
            iat: now,
            exp: now + self.token_expiry,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Resolve a capability back to its claims, rejecting bad signatures and
    /// expired tokens.
    pub fn resolve(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }

    /// Token lifetime in seconds
    pub fn token_expiry(&self) -> u64 {
        self.token_expiry
    }
}

fn unix_now() -> Result<u64> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| anyhow::anyhow!("Failed to get current time: {}", e))?
        .as_secs();
    Ok(now)
}
