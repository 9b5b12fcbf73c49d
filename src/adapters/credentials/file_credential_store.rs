use std::io::ErrorKind;
use std::path::PathBuf;

use error_stack::{report, ResultExt};
use tracing::{debug, info, instrument};

use crate::ports::credential_store::{CredentialStore, CredentialStoreError, StoredCredential};

/// Keeps the token as pretty-printed JSON in a single file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileCredentialStore { path: path.into() }
    }
}

#[async_trait::async_trait]
impl CredentialStore for FileCredentialStore {
    #[instrument]
    async fn load(&self) -> error_stack::Result<Option<StoredCredential>, CredentialStoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No token file at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => {
                return Err(report!(e)
                    .change_context(CredentialStoreError::Read)
                    .attach_printable(format!("Token file {:?}", self.path)));
            }
        };

        let stored = serde_json::from_str::<StoredCredential>(&content)
            .change_context(CredentialStoreError::Corrupted)
            .attach_printable_lazy(|| format!("Delete {:?} to log in again", self.path))?;

        debug!("Loaded token from {:?}", self.path);
        Ok(Some(stored))
    }

    #[instrument(skip(credential))]
    async fn persist(
        &self,
        credential: &StoredCredential,
    ) -> error_stack::Result<(), CredentialStoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .change_context(CredentialStoreError::Write)
                .attach_printable_lazy(|| format!("Token directory {:?}", parent))?;
        }

        let content = serde_json::to_string_pretty(credential)
            .change_context(CredentialStoreError::Write)?;

        // The token file is only ever replaced whole.
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content)
            .await
            .change_context(CredentialStoreError::Write)
            .attach_printable_lazy(|| format!("Token file {:?}", temp_path))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .change_context(CredentialStoreError::Write)
            .attach_printable_lazy(|| format!("Token file {:?}", self.path))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await;
        }

        info!("Saved token to {:?}", self.path);
        Ok(())
    }
}
