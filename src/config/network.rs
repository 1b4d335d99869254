/// Network configuration constants.
///
/// Connection retry policy towards the remote players, timeouts, and the
/// environment variables the server reads at startup.
use std::time::Duration;

/// Number of connection attempts per player before giving up.
pub const CONNECT_ATTEMPTS: u32 = 300;

/// Delay between two connection attempts.
pub const CONNECT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Overall time allowed for one player to connect at startup.
pub const JOIN_TIMEOUT: Duration = Duration::from_secs(60);

/// Added on top of the transport timeouts when the game session waits for a batch of orders.
pub const ORDER_WAIT_GRACE: Duration = Duration::from_secs(1);

/// How long the process stays alive after reporting the result.
pub const IDLE_AFTER_GAME: Duration = Duration::from_secs(10 * 60);

/// Environment variable holding the URL the game result is posted to.
pub const CALLBACK_URL_ENV: &str = "WAR_CALLBACK_URL";

/// Environment variable overriding the status HTTP bind address.
pub const STATUS_BIND_ENV: &str = "TANK_STATUS_BIND";

/// Default bind address for the status HTTP server.
pub const DEFAULT_STATUS_BIND: &str = "127.0.0.1:8080";

/// Resolve the status server bind address.
pub fn status_bind() -> String {
    std::env::var(STATUS_BIND_ENV).unwrap_or_else(|_| DEFAULT_STATUS_BIND.to_string())
}

/// Resolve the result callback URL, if one is configured.
pub fn callback_url() -> Option<String> {
    std::env::var(CALLBACK_URL_ENV).ok().filter(|url| !url.trim().is_empty())
}
