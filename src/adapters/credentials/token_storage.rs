use std::sync::Arc;

use google_sheets4::oauth2::storage::{TokenInfo, TokenStorage};
use tracing::warn;

use crate::ports::credential_store::{CredentialStore, StoredCredential};

/// Lets the OAuth authenticator read and write tokens through a [`CredentialStore`].
pub struct CredentialStorage {
    store: Arc<dyn CredentialStore>,
}

impl CredentialStorage {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        CredentialStorage { store }
    }
}

#[async_trait::async_trait]
impl TokenStorage for CredentialStorage {
    async fn set(&self, scopes: &[&str], token: TokenInfo) -> anyhow::Result<()> {
        self.store
            .persist(&StoredCredential::new(scopes, token))
            .await
            .map_err(|report| anyhow::anyhow!("{:?}", report))
    }

    async fn get(&self, scopes: &[&str]) -> Option<TokenInfo> {
        match self.store.load().await {
            Ok(Some(stored)) if stored.covers(scopes) => Some(stored.token),
            Ok(_) => None,
            Err(report) => {
                // An unreadable token only costs a new login.
                warn!("Ignoring stored token: {:?}", report);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::credentials::file_credential_store::FileCredentialStore;

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

    fn storage(dir: &tempfile::TempDir) -> CredentialStorage {
        CredentialStorage::new(Arc::new(FileCredentialStore::new(
            dir.path().join("token.json"),
        )))
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        storage.set(&[READONLY, READWRITE], token()).await.unwrap();

        let token = storage.get(&[READWRITE]).await.unwrap();
        assert_eq!(token.access_token.as_deref(), Some("ya29.token"));
    }

    #[tokio::test]
    async fn test_get_refuses_wider_scopes() {
        let dir = tempfile::tempdir().unwrap();
        let storage = storage(&dir);

        storage.set(&[READONLY], token()).await.unwrap();

        assert!(storage.get(&[READONLY, READWRITE]).await.is_none());
    }

    #[tokio::test]
    async fn test_unreadable_token_means_no_token() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("token.json"), "garbage").unwrap();

        assert!(storage(&dir).get(&[READWRITE]).await.is_none());
    }
}
