use crate::shared::entity::ID;

/// OAuth credentials for one connected Google Calendar account, keyed by
/// the (user, workspace) pair. Created on OAuth consent, refreshed
/// opportunistically, deleted on explicit disconnect. Its absence simply
/// means calendar sync is skipped for that user.
#[derive(Debug, Clone)]
pub struct GoogleAccountConnection {
    pub user_id: ID,
    pub workspace_id: ID,
    pub access_token: String,
    pub access_token_expires_ts: i64,
    pub refresh_token: String,
}

impl GoogleAccountConnection {
    /// Merges a token response into the stored credentials. Refresh
    /// tokens are sticky: Google only issues one on the initial consent,
    /// so a refresh response without one must not clear the stored value.
    pub fn apply_refreshed_tokens(
        &mut self,
        access_token: String,
        expires_in_secs: i64,
        refresh_token: Option<String>,
        now: i64,
    ) {
        self.access_token = access_token;
        self.access_token_expires_ts = now + expires_in_secs * 1000;
        if let Some(refresh_token) = refresh_token {
            self.refresh_token = refresh_token;
        }
    }
}
