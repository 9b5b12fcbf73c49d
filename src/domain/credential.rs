use chrono::{DateTime, Duration, Utc};

/// Access tokens this close to expiry are treated as expired.
const EXPIRY_MARGIN_SECS: i64 = 60;

/// What we know about a stored OAuth token, independent of how it is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}

/// Which path the authenticator will take to get a usable token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialStatus {
    /// Nothing stored yet: interactive login.
    Missing,
    /// Stored token can be used as is.
    Valid,
    /// Stored token expired but carries a refresh token.
    Refreshable,
    /// Stored token expired and cannot be refreshed: interactive login.
    NeedsLogin,
}

impl Credential {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        if self.access_token.is_none() {
            return true;
        }
        match self.expires_at {
            Some(expires_at) => now + Duration::seconds(EXPIRY_MARGIN_SECS) >= expires_at,
            None => false,
        }
    }

    pub fn status_at(credential: Option<&Credential>, now: DateTime<Utc>) -> CredentialStatus {
        match credential {
            None => CredentialStatus::Missing,
            Some(credential) if !credential.is_expired_at(now) => CredentialStatus::Valid,
            Some(Credential {
                refresh_token: Some(_),
                ..
            }) => CredentialStatus::Refreshable,
            Some(_) => CredentialStatus::NeedsLogin,
        }
    }
}

impl std::fmt::Display for CredentialStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CredentialStatus::Missing => "no stored token, interactive login required",
            CredentialStatus::Valid => "stored token is valid",
            CredentialStatus::Refreshable => "stored token expired, refreshing",
            CredentialStatus::NeedsLogin => {
                "stored token expired without refresh token, interactive login required"
            }
        };
        f.write_str(text)
    }
}
