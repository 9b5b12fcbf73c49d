use std::sync::Arc;

use chrono::Utc;
use error_stack::{report, ResultExt};
use google_sheets4::hyper;
use google_sheets4::oauth2::{self, authenticator::Authenticator};
use thiserror::Error;
use tracing::{info, instrument};

use crate::adapters::credentials::token_storage::CredentialStorage;
use crate::config::sheets_config::SheetsConfig;
use crate::domain::credential::{Credential, CredentialStatus};
use crate::ports::credential_store::{CredentialStore, StoredCredential};

use super::http_client::HttpsConnector;

/// Read and write access; the read-only scope is kept so older tokens stay valid.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/spreadsheets",
];

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("Could not build the HTTPS client")]
    HttpClient,
    #[error("Failed to read stored credential")]
    Store,
    #[error("Failed to read OAuth client secret")]
    ClientSecret,
    #[error("Could not create an authenticator")]
    Authenticator,
    #[error("Could not obtain an access token")]
    Token,
}

/// Classifies what is currently stored for [`SCOPES`], without touching the network.
pub async fn credential_status(
    store: &dyn CredentialStore,
) -> error_stack::Result<CredentialStatus, CredentialError> {
    let stored = store.load().await.change_context(CredentialError::Store)?;
    let credential = stored
        .filter(|stored| stored.covers(SCOPES))
        .as_ref()
        .map(StoredCredential::credential);

    Ok(Credential::status_at(credential.as_ref(), Utc::now()))
}

/// Builds an installed-app authenticator on top of `store` and obtains a token right away.
///
/// A stored token is reused while valid and refreshed when expired; without one (or without
/// a refresh token) the browser-based login runs and blocks until the user completes it.
#[instrument(skip(client, store))]
pub async fn auth(
    config: &SheetsConfig,
    client: hyper::Client<HttpsConnector>,
    store: Arc<dyn CredentialStore>,
) -> error_stack::Result<Authenticator<HttpsConnector>, CredentialError> {
    let status = credential_status(&*store).await?;
    info!("Credential: {}", status);

    let client_secret: &str = &config.client_secret;
    let secret = oauth2::read_application_secret(client_secret)
        .await
        .map_err(|e| report!(CredentialError::ClientSecret).attach_printable(e.to_string()))
        .attach_printable_lazy(|| {
            format!(
                "Could not read OAuth client secret at '{}'. Download it from the Google Cloud console (OAuth client of type \"Desktop app\").",
                client_secret
            )
        })?;

    let authenticator = oauth2::InstalledFlowAuthenticator::with_client(
        secret,
        oauth2::InstalledFlowReturnMethod::HTTPRedirect,
        client,
    )
    .with_storage(Box::new(CredentialStorage::new(store)))
    .build()
    .await
    .map_err(|e| report!(CredentialError::Authenticator).attach_printable(e.to_string()))?;

    authenticator
        .token(SCOPES)
        .await
        .map_err(|e| report!(CredentialError::Token).attach_printable(e.to_string()))?;
    info!("✅ Authenticated");

    Ok(authenticator)
}
