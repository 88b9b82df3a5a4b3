use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the reminder scan job ticks. One minute by default, which
    /// is also the precision of reminder delivery: offsets are expressed
    /// in whole minutes and a window narrower than the tick gap can be
    /// missed.
    pub reminder_interval_secs: u64,
    /// How often the calendar sync job reconciles each connected account
    /// against Google. Coarser than the reminder tick on purpose, the
    /// Google API is rate limited.
    pub calendar_sync_interval_secs: u64,
    /// Gateway that performs the actual web push encryption and delivery
    pub push_gateway_url: String,
    /// OAuth client credentials for the Google Calendar integration.
    /// When absent, calendar sync is effectively disabled: token refresh
    /// always fails and every connected account is skipped.
    pub google_oauth: Option<GoogleOAuthConfig>,
}

const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 60;
const DEFAULT_CALENDAR_SYNC_INTERVAL_SECS: u64 = 5 * 60;
const DEFAULT_PUSH_GATEWAY_URL: &str = "http://localhost:8090/api/push";

fn interval_from_env(var: &str, default: u64) -> u64 {
    match std::env::var(var) {
        Ok(value) => match value.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given {}: {} is not a valid interval, falling back to the default: {}s.",
                    var, value, default
                );
                default
            }
        },
        Err(_) => default,
    }
}

impl Config {
    pub fn new() -> Self {
        let push_gateway_url = match std::env::var("PUSH_GATEWAY_URL") {
            Ok(url) => url,
            Err(_) => {
                info!(
                    "Did not find PUSH_GATEWAY_URL environment variable. Using the default: {}",
                    DEFAULT_PUSH_GATEWAY_URL
                );
                DEFAULT_PUSH_GATEWAY_URL.into()
            }
        };

        let google_oauth = match (
            std::env::var("GOOGLE_CLIENT_ID"),
            std::env::var("GOOGLE_CLIENT_SECRET"),
        ) {
            (Ok(client_id), Ok(client_secret)) => Some(GoogleOAuthConfig {
                client_id,
                client_secret,
                redirect_uri: std::env::var("GOOGLE_REDIRECT_URI").unwrap_or_default(),
            }),
            _ => {
                info!("GOOGLE_CLIENT_ID / GOOGLE_CLIENT_SECRET not set. Calendar sync will skip every connected account.");
                None
            }
        };

        Self {
            reminder_interval_secs: interval_from_env(
                "REMINDER_INTERVAL_SECS",
                DEFAULT_REMINDER_INTERVAL_SECS,
            ),
            calendar_sync_interval_secs: interval_from_env(
                "CALENDAR_SYNC_INTERVAL_SECS",
                DEFAULT_CALENDAR_SYNC_INTERVAL_SECS,
            ),
            push_gateway_url,
            google_oauth,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
