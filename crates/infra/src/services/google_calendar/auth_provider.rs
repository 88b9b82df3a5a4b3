use crate::Context;
use plando_domain::GoogleAccountConnection;
use serde::Deserialize;
use std::time::Duration;
use tracing::warn;

// https://developers.google.com/identity/protocols/oauth2/web-server#httprest_3

const TOKEN_REFETCH_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v4/token";
const CODE_TOKEN_EXHANGE_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const REQUIRED_OAUTH_SCOPES: [&str; 1] = ["https://www.googleapis.com/auth/calendar"];
const TOKEN_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

// Access token considered expired when it has less than a minute left
const EXPIRATION_MARGIN_MILLIS: i64 = 1000 * 60;

struct RefreshTokenRequest {
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

#[derive(Debug, Deserialize)]
struct RefreshTokenResponse {
    access_token: String,
    // Access token expiry specified in seconds
    expires_in: i64,
    // Google only issues a refresh token on the initial consent; a
    // refresh response usually omits it
    #[serde(default)]
    refresh_token: Option<String>,
}

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(TOKEN_REQUEST_TIMEOUT)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

async fn refresh_access_token(req: RefreshTokenRequest) -> anyhow::Result<RefreshTokenResponse> {
    let params = [
        ("client_id", req.client_id.as_str()),
        ("client_secret", req.client_secret.as_str()),
        ("refresh_token", req.refresh_token.as_str()),
        ("grant_type", "refresh_token"),
    ];
    let res = http_client()
        .post(TOKEN_REFETCH_ENDPOINT)
        .form(&params)
        .send()
        .await?;

    Ok(res.json::<RefreshTokenResponse>().await?)
}

pub struct CodeTokenRequest {
    pub client_id: String,
    pub client_secret: String,
    pub code: String,
    pub redirect_uri: String,
}

// Google api actually returns snake case response
#[derive(Debug, Deserialize)]
pub struct CodeTokenResponse {
    pub access_token: String,
    pub scope: String,
    pub expires_in: i64,
    pub refresh_token: String,
}

/// Authorization-code exchange performed once when the user consents to
/// the calendar integration. The caller persists the resulting tokens as
/// a new `GoogleAccountConnection`.
pub async fn exchange_code_token(req: CodeTokenRequest) -> anyhow::Result<CodeTokenResponse> {
    let params = [
        ("client_id", req.client_id.as_str()),
        ("client_secret", req.client_secret.as_str()),
        ("redirect_uri", req.redirect_uri.as_str()),
        ("code", req.code.as_str()),
        ("grant_type", "authorization_code"),
    ];
    let res = http_client()
        .post(CODE_TOKEN_EXHANGE_ENDPOINT)
        .form(&params)
        .send()
        .await?;

    let res = res.json::<CodeTokenResponse>().await?;

    let scopes = res.scope.split(' ').collect::<Vec<_>>();
    for required_scope in REQUIRED_OAUTH_SCOPES.iter() {
        if !scopes.contains(required_scope) {
            return Err(anyhow::anyhow!(
                "Missing required oauth scope: {}",
                required_scope
            ));
        }
    }

    Ok(res)
}

/// Returns a usable access token for the connection, refreshing it first
/// when it is about to expire. Newly issued tokens are persisted through
/// the connection repo right away so a crash cannot lose them; the stored
/// refresh token is never overwritten with an absent one.
pub async fn get_access_token(
    connection: &mut GoogleAccountConnection,
    ctx: &Context,
) -> Option<String> {
    let now = ctx.sys.get_timestamp_millis();
    if now + EXPIRATION_MARGIN_MILLIS <= connection.access_token_expires_ts {
        return Some(connection.access_token.clone());
    }

    let oauth_config = match &ctx.config.google_oauth {
        Some(config) => config,
        None => return None,
    };

    let refresh_token_req = RefreshTokenRequest {
        client_id: oauth_config.client_id.clone(),
        client_secret: oauth_config.client_secret.clone(),
        refresh_token: connection.refresh_token.clone(),
    };
    match refresh_access_token(refresh_token_req).await {
        Ok(tokens) => {
            let now = ctx.sys.get_timestamp_millis();
            connection.apply_refreshed_tokens(
                tokens.access_token,
                tokens.expires_in,
                tokens.refresh_token,
                now,
            );
            let access_token = connection.access_token.clone();

            if let Err(e) = ctx.repos.connections.save(connection).await {
                warn!(
                    "Unable to save refreshed google credentials for user: {}. Error: {:?}",
                    connection.user_id, e
                );
            }

            Some(access_token)
        }
        Err(e) => {
            warn!(
                "Unable to refresh access token for user: {}. Error: {:?}",
                connection.user_id, e
            );
            None
        }
    }
}
