//! Token issuance for roomcast sessions
//!
//! Mints the credentials a client presents to join a video session: the
//! legacy signed-string format (HMAC over an ampersand-joined data string)
//! and the JWT format (HS256 for API key credentials, RS256 for application
//! credentials). Issuance is synchronous and pure with respect to process
//! state; the wall clock and nonce source are injectable for deterministic
//! output under test.

pub mod jwt;
pub mod token;
pub mod validate;

pub use jwt::{sign_application_token, sign_legacy_claims, TokenData, DEFAULT_TOKEN_LIFETIME_SECS};
pub use token::{
    Clock, NonceSource, RandomNonce, SystemClock, TokenError, TokenIssuer, TokenOptions,
};
pub use validate::{
    validate_connection_data, validate_expire_time, MAX_CONNECTION_DATA_CHARS,
    MAX_TOKEN_LIFETIME_SECS,
};

// Re-export the data model so callers need a single dependency
pub use roomcast_session::{ArchiveMode, Credential, MediaMode, Role, Session};
