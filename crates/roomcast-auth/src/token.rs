//! Legacy signed-string token issuance
//!
//! Wire format:
//! `T1==<base64("partner_id=<key>&sig=<hex signature>:<data string>")>`
//! where the data string joins its fields with `&` in a fixed order and the
//! signature is an HMAC-SHA1 over the data string, keyed with the API
//! secret and rendered as lowercase hex.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::Utc;
use hmac::{Hmac, Mac};
use roomcast_session::{Credential, Role, Session};
use sha1::Sha1;
use thiserror::Error;
use tracing::debug;

use crate::jwt;
use crate::validate::{validate_connection_data, validate_expire_time};

type HmacSha1 = Hmac<Sha1>;

/// Errors raised while issuing a token
#[derive(Debug, Error)]
pub enum TokenError {
    /// Expiration before creation or more than 30 days out
    #[error("invalid expire time {0}: must fall after creation and within 30 days")]
    InvalidExpireTime(i64),

    /// Connection metadata above the 1000-character cap
    #[error("connection data is {0} characters, the limit is 1000")]
    ConnectionDataTooLarge(usize),

    /// Legacy token requested for an application-credential session
    #[error("legacy tokens require an API key credential")]
    CredentialMismatch,

    /// Signing collaborator failure, propagated unchanged
    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

/// Wall clock, injectable for deterministic issuance under test.
pub trait Clock: Send + Sync {
    /// Current Unix timestamp in whole seconds
    fn now(&self) -> i64;
}

/// System wall clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Source of single-use nonce integers.
///
/// Implementations must be safe for concurrent use; there is no ordering
/// requirement between calls.
pub trait NonceSource: Send + Sync {
    fn next_nonce(&self) -> u64;
}

/// Nonce source backed by the thread-local RNG
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn next_nonce(&self) -> u64 {
        rand::random()
    }
}

/// Per-call token parameters.
///
/// Every field has a documented default; build the common case with
/// [`TokenOptions::new`] and override with the `with_*` methods.
#[derive(Debug, Clone, Default)]
pub struct TokenOptions {
    /// Permission level, `Publisher` unless overridden
    pub role: Role,

    /// Absolute expiration as a Unix timestamp; `0` selects the issuer's
    /// default lifetime
    pub expire_time: i64,

    /// Opaque metadata attached to the connection, visible to other session
    /// participants; at most 1000 characters
    pub data: Option<String>,

    /// Layout class names, order preserved. `Some(vec![])` emits an empty
    /// list and is distinct from `None`.
    pub initial_layout_classes: Option<Vec<String>>,
}

impl TokenOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn with_expire_time(mut self, expire_time: i64) -> Self {
        self.expire_time = expire_time;
        self
    }

    pub fn with_data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn with_initial_layout_classes(mut self, classes: Vec<String>) -> Self {
        self.initial_layout_classes = Some(classes);
        self
    }
}

/// Issues session join tokens in both supported formats.
///
/// Reads only the immutable [`Session`] and per-call options; concurrent
/// calls need no synchronization as long as the injected collaborators are
/// thread-safe.
pub struct TokenIssuer {
    clock: Box<dyn Clock>,
    nonces: Box<dyn NonceSource>,
}

impl TokenIssuer {
    /// Issuer wired to the system clock and thread RNG.
    pub fn new() -> Self {
        Self::with_sources(Box::new(SystemClock), Box::new(RandomNonce))
    }

    /// Issuer with injected collaborators.
    pub fn with_sources(clock: Box<dyn Clock>, nonces: Box<dyn NonceSource>) -> Self {
        Self { clock, nonces }
    }

    /// Issue a token in the legacy signed-string format.
    ///
    /// Only sessions holding an API key credential can mint this format;
    /// an application-credential session yields
    /// [`TokenError::CredentialMismatch`].
    pub fn legacy_token(
        &self,
        session: &Session,
        opts: &TokenOptions,
    ) -> Result<String, TokenError> {
        let (key, secret) = match session.credential() {
            Credential::Api { key, secret } => (*key, secret.as_str()),
            Credential::Application { .. } => return Err(TokenError::CredentialMismatch),
        };

        let create_time = self.clock.now();
        let nonce = self.nonces.next_nonce();

        // Validation always runs, even for fields that end up omitted
        let emit_expire = validate_expire_time(opts.expire_time, create_time, create_time)?;
        let emit_data = validate_connection_data(opts.data.as_deref())?;

        let mut data_string = format!(
            "session_id={}&create_time={}&nonce={}&role={}",
            session.id(),
            create_time,
            nonce,
            opts.role,
        );

        if let Some(classes) = &opts.initial_layout_classes {
            data_string.push_str("&initial_layout_class_list=");
            data_string.push_str(&classes.join(" "));
        }

        if emit_expire {
            data_string.push_str("&expire_time=");
            data_string.push_str(&opts.expire_time.to_string());
        }

        if emit_data {
            // emit_data guarantees the payload is present and non-empty
            let encoded = urlencoding::encode(opts.data.as_deref().unwrap_or(""));
            data_string.push_str("&connection_data=");
            data_string.push_str(&encoded);
        }

        let signature = sign_data_string(secret, &data_string);
        let plain = format!("partner_id={}&sig={}:{}", key, signature, data_string);

        debug!("issued legacy token for session {}", session.id());
        Ok(format!("T1=={}", STANDARD.encode(plain.as_bytes())))
    }

    /// Issue a JWT-format token, branching on the credential variant.
    ///
    /// Application credentials produce an RS256 token with implicit full
    /// access and ignore role/metadata options; API key credentials produce
    /// an HS256 token carrying the full claim set.
    pub fn jwt_token(&self, session: &Session, opts: &TokenOptions) -> Result<String, TokenError> {
        match session.credential() {
            Credential::Application { id, private_key } => {
                debug!("issuing application token for session {}", session.id());
                jwt::sign_application_token(id, private_key, session.id(), self.clock.as_ref())
            }
            Credential::Api { key, secret } => {
                debug!("issuing session token for session {}", session.id());
                let data = jwt::TokenData {
                    api_key: *key,
                    api_secret: secret.clone(),
                    role: opts.role,
                    data: opts.data.clone(),
                    session_id: session.id().to_string(),
                    expire_time: opts.expire_time,
                    initial_layout_classes: opts.initial_layout_classes.clone().unwrap_or_default(),
                };
                jwt::sign_legacy_claims(&data, self.clock.as_ref())
            }
        }
    }
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self::new()
    }
}

/// HMAC-SHA1 over the data string, lowercase hex.
fn sign_data_string(secret: &str, data_string: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(secret.as_bytes()).expect("hmac accepts keys of any length");
    mac.update(data_string.as_bytes());
    format!("{:x}", mac.finalize().into_bytes())
}
