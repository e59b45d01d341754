//! Access to the remote Gateway that owns users and transactions.

mod client;
pub(crate) mod wire;

use std::fmt::Debug;

use serde::Deserialize;

pub use client::{GatewayClient, LogInRequest, SignUpRequest};

/// The bearer credential issued by the Gateway.
///
/// The value is never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wrap a raw token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token for the `Authorization` header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the credential and return the raw token.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(********)")
    }
}
