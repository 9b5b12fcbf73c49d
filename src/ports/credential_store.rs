use chrono::{DateTime, Utc};
use google_sheets4::oauth2::storage::TokenInfo;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::credential::Credential;

#[derive(Error, Debug)]
pub enum CredentialStoreError {
    #[error("Failed to read stored credential")]
    Read,
    #[error("Stored credential is not valid JSON")]
    Corrupted,
    #[error("Failed to persist credential")]
    Write,
}

/// A token together with the scopes it was granted for.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub scopes: Vec<String>,
    pub token: TokenInfo,
}

impl StoredCredential {
    pub fn new(scopes: &[&str], token: TokenInfo) -> Self {
        StoredCredential {
            scopes: scopes.iter().map(|scope| scope.to_string()).collect(),
            token,
        }
    }

    pub fn covers(&self, requested: &[&str]) -> bool {
        requested
            .iter()
            .all(|scope| self.scopes.iter().any(|granted| granted == scope))
    }

    pub fn credential(&self) -> Credential {
        Credential {
            access_token: self.token.access_token.clone(),
            refresh_token: self.token.refresh_token.clone(),
            expires_at: self
                .token
                .expires_at
                .and_then(|at| DateTime::<Utc>::from_timestamp(at.unix_timestamp(), 0)),
        }
    }
}

/// Where OAuth tokens live between runs.
///
/// Refreshing and interactive login are left to the authenticator; the store only loads what
/// was persisted last and persists whatever the authenticator obtained.
#[async_trait::async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns `Ok(None)` when nothing has been stored yet.
    async fn load(&self) -> error_stack::Result<Option<StoredCredential>, CredentialStoreError>;

    async fn persist(
        &self,
        credential: &StoredCredential,
    ) -> error_stack::Result<(), CredentialStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    const READONLY: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";
    const READWRITE: &str = "https://www.googleapis.com/auth/spreadsheets";

    fn token() -> TokenInfo {
        TokenInfo {
            access_token: Some("ya29.token".to_string()),
            refresh_token: Some("1//refresh".to_string()),
            expires_at: None,
            id_token: None,
        }
    }

    #[test]
    fn test_covers_requested_subset() {
        let stored = StoredCredential::new(&[READONLY, READWRITE], token());
        assert!(stored.covers(&[READWRITE]));
        assert!(stored.covers(&[READWRITE, READONLY]));
    }

    #[test]
    fn test_does_not_cover_extra_scope() {
        let stored = StoredCredential::new(&[READONLY], token());
        assert!(!stored.covers(&[READONLY, READWRITE]));
    }

    #[test]
    fn test_credential_view() {
        let stored = StoredCredential::new(&[READONLY], token());
        let credential = stored.credential();
        assert_eq!(credential.access_token.as_deref(), Some("ya29.token"));
        assert_eq!(credential.refresh_token.as_deref(), Some("1//refresh"));
        assert_eq!(credential.expires_at, None);
    }
}
