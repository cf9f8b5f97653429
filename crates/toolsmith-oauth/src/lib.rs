//! OAuth client-credentials support for toolsmith.
//!
//! # Components
//!
//! - [`client`] — the [`OAuthClient`] profile record (client id, secret,
//!   token URL, scopes, audience)
//! - [`profiles`] — named profiles persisted as JSON blobs in the secrets
//!   provider under the `jwt` namespace
//! - [`exchange`] — the standard client-credentials token exchange against
//!   the profile's token endpoint

pub mod client;
pub mod error;
pub mod exchange;
pub mod profiles;

pub use client::OAuthClient;
pub use error::{OAuthError, Result};
pub use exchange::{exchange, TokenResponse};
pub use profiles::{ProfileStore, PROFILE_NAMESPACE};
