//! Session and Credential Definitions
//!
//! This crate defines the data model shared by the roomcast token issuers:
//! the session identity, the two mutually exclusive credential schemes, and
//! the enums describing session policy and participant permissions.

pub mod role;
pub mod session;

pub use role::Role;
pub use session::{ArchiveMode, Credential, MediaMode, Session};
