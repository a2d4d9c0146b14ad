//! Service-account authentication for the Google APIs.
//!
//! A signed JWT assertion is exchanged for a short-lived OAuth bearer token,
//! which is cached until shortly before it expires.

use crate::error::SheetStoreError;
use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Deserialize;
use serde::Serialize;
use std::sync::Mutex;
use thiserror::Error;
use tracing::debug;

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

/// Default token endpoint for service-account assertions.
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Tokens are refreshed this long before their reported expiry.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Lifetime requested for an assertion; Google accepts at most one hour.
const ASSERTION_LIFETIME_SECONDS: i64 = 3600;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Token exchange failed with HTTP {code}: {message}")]
    TokenRejected { code: u16, message: String },

    #[error("Token exchange transport failed: {0}")]
    Transport(String),

    #[error("Token cache lock poisoned")]
    CachePoisoned,
}

/// Source of bearer tokens for backend requests.
pub trait TokenProvider {
    fn access_token(&self) -> Result<String, SheetStoreError>;
}

/// A fixed bearer token, e.g. one minted by `gcloud auth print-access-token`.
#[derive(Clone, Debug)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn access_token(&self) -> Result<String, SheetStoreError> {
        Ok(self.0.to_owned())
    }
}

/// JWT claims of a service-account assertion.
#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Clone, Debug)]
struct CachedToken {
    token: String,
    expires_at: DateTime<Utc>,
}

/// Google service-account credentials.
pub struct ServiceAccount {
    email: String,
    key: EncodingKey,
    token_url: String,
    agent: ureq::Agent,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccount {
    /// Creates credentials from the account email and its RSA private key in PEM form.
    pub fn new(email: &str, private_key_pem: &str, token_url: &str, agent: ureq::Agent) -> Result<Self, SheetStoreError> {
        Ok(ServiceAccount {
            email: email.to_owned(),
            key: EncodingKey::from_rsa_pem(private_key_pem.as_bytes())?,
            token_url: token_url.to_owned(),
            agent,
            cached: Mutex::new(None),
        })
    }

    /// Signs a fresh RS256 assertion valid from `now`.
    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetStoreError> {
        let claims = Claims {
            iss: &self.email,
            scope: SPREADSHEETS_SCOPE,
            aud: &self.token_url,
            iat: now.timestamp(),
            exp: now.timestamp() + ASSERTION_LIFETIME_SECONDS,
        };
        Ok(jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &self.key)?)
    }

    fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, SheetStoreError> {
        let assertion = self.assertion(now)?;
        debug!(token_url = %self.token_url, "exchanging service account assertion");
        let response = self
            .agent
            .post(&self.token_url)
            .send_form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .map_err(|error| match error {
                ureq::Error::Status(code, response) => AuthError::TokenRejected {
                    code,
                    message: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => AuthError::Transport(transport.to_string()),
            })?;
        let body: TokenResponse = serde_json::from_reader(response.into_reader())?;
        Ok(CachedToken {
            token: body.access_token,
            expires_at: now + Duration::seconds(body.expires_in),
        })
    }
}

impl TokenProvider for ServiceAccount {
    fn access_token(&self) -> Result<String, SheetStoreError> {
        let mut cached = self.cached.lock().map_err(|_| AuthError::CachePoisoned)?;
        let now = Utc::now();
        if let Some(token) = cached.as_ref() {
            if now + Duration::seconds(EXPIRY_MARGIN_SECONDS) < token.expires_at {
                return Ok(token.token.to_owned());
            }
        }
        let token = self.exchange(now)?;
        *cached = Some(token.clone());
        Ok(token.token)
    }
}
