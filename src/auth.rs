//! Ed25519-signed bearer tokens for the weather provider.
//!
//! A token is signed on first use and reused until shortly before it expires.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::constants::{ISSUED_AT_SKEW_SECS, TOKEN_EXPIRY_MARGIN_SECS, TOKEN_LIFETIME_SECS};
use crate::error::WeatherError;

/// JWT claims sent to the provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iat: i64,
    pub exp: i64,
    pub sub: String,
}

#[derive(Debug, Clone)]
struct CachedToken {
    token: String,
    expires_at: i64,
}

/// Signs and caches provider tokens
pub struct TokenSigner {
    key: EncodingKey,
    header: Header,
    subject: String,
    cache: Mutex<Option<CachedToken>>,
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("kid", &self.header.kid)
            .field("subject", &self.subject)
            .finish_non_exhaustive()
    }
}

impl TokenSigner {
    /// Parses the configured private key. Fails if it is not a PEM Ed25519 key.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let key = EncodingKey::from_ed_pem(config.private_key.as_bytes())?;

        let mut header = Header::new(Algorithm::EdDSA);
        header.kid = Some(config.kid.clone());

        Ok(Self {
            key,
            header,
            subject: config.sub.clone(),
            cache: Mutex::new(None),
        })
    }

    /// Returns a valid token, signing a new one if the cached token has expired.
    pub fn token(&self) -> Result<String, WeatherError> {
        self.token_at(Utc::now().timestamp())
    }

    /// Same as [`TokenSigner::token`] with an explicit current time (epoch seconds).
    pub fn token_at(&self, now: i64) -> Result<String, WeatherError> {
        let mut cache = self.cache.lock();
        if let Some(cached) = cache.as_ref() {
            if now < cached.expires_at {
                return Ok(cached.token.clone());
            }
        }

        let expires_at = now + TOKEN_LIFETIME_SECS - TOKEN_EXPIRY_MARGIN_SECS;
        let claims = Claims {
            iat: now - ISSUED_AT_SKEW_SECS,
            exp: expires_at,
            sub: self.subject.clone(),
        };

        let token = encode(&self.header, &claims, &self.key).map_err(|e| {
            tracing::error!("Failed to sign provider token: {}", e);
            WeatherError::Signing(e)
        })?;

        tracing::debug!("Signed new provider token, expires at {}", expires_at);
        *cache = Some(CachedToken {
            token: token.clone(),
            expires_at,
        });

        Ok(token)
    }
}
