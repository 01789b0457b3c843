//! Static-token identity provider
//!
//! Stand-in for an external identity provider: a fixed table of opaque bearer
//! tokens, each mapped to an identity subject.

use async_trait::async_trait;
use stage_tracker_core::domain::Identity;
use stage_tracker_core::error::{AppError, Result};
use stage_tracker_core::port::IdentityProvider;
use std::collections::HashMap;
use tracing::debug;

pub struct StaticTokenIdentityProvider {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenIdentityProvider {
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens }
    }

    /// Parse `token=subject` pairs separated by commas.
    ///
    /// Whitespace around entries is ignored; an empty string yields a provider
    /// that never resolves anyone.
    pub fn from_pairs(pairs: &str) -> Result<Self> {
        let mut tokens = HashMap::new();

        for entry in pairs.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (token, subject) = entry.split_once('=').ok_or_else(|| {
                AppError::Config(format!("token entry must be token=subject, got {:?}", entry))
            })?;

            let token = token.trim();
            if token.is_empty() {
                return Err(AppError::Config(format!("empty token in entry {:?}", entry)));
            }

            let identity = Identity::new(subject.trim())
                .map_err(|e| AppError::Config(format!("entry {:?}: {}", entry, e)))?;

            if tokens.insert(token.to_string(), identity).is_some() {
                return Err(AppError::Config(format!("duplicate token in entry {:?}", entry)));
            }
        }

        Ok(Self::new(tokens))
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for StaticTokenIdentityProvider {
    async fn resolve(&self, credential: Option<&str>) -> Result<Option<Identity>> {
        let Some(token) = credential.map(str::trim).filter(|t| !t.is_empty()) else {
            return Ok(None);
        };

        let identity = self.tokens.get(token).cloned();
        if identity.is_none() {
            debug!("Unknown auth token, treating caller as unauthenticated");
        }
        Ok(identity)
    }
}
