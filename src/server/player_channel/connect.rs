//! Connecting to the two players before the game starts.

use std::time::Duration;

use log::{debug, info, warn};

use super::tcp::TcpTransport;
use crate::config::network::{CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY, JOIN_TIMEOUT};

/// Try `address` up to `attempts` times, sleeping `delay` between tries.
pub async fn connect_with_retry(
    address: &str,
    round_timeout: Duration,
    attempts: u32,
    delay: Duration,
) -> Option<TcpTransport> {
    for attempt in 1..=attempts {
        match TcpTransport::connect(address, round_timeout).await {
            Ok(transport) => {
                info!("[Connect] Connected to {} after {} attempt(s)", address, attempt);
                return Some(transport);
            }
            Err(err) => {
                debug!("[Connect] Attempt {}/{} to {} failed: {}", attempt, attempts, address, err);
                if attempt < attempts {
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }
    warn!("[Connect] Giving up on {} after {} attempts", address, attempts);
    None
}

async fn connect_within_join_timeout(address: &str, round_timeout: Duration) -> Option<TcpTransport> {
    let connecting = connect_with_retry(address, round_timeout, CONNECT_ATTEMPTS, CONNECT_RETRY_DELAY);
    match tokio::time::timeout(JOIN_TIMEOUT, connecting).await {
        Ok(transport) => transport,
        Err(_) => {
            warn!("[Connect] {} did not answer within {:?}", address, JOIN_TIMEOUT);
            None
        }
    }
}

/// Connect to both players concurrently. Either slot is `None` if that player never answered.
pub async fn join_players(
    player_a: &str,
    player_b: &str,
    round_timeout: Duration,
) -> (Option<TcpTransport>, Option<TcpTransport>) {
    tokio::join!(
        connect_within_join_timeout(player_a, round_timeout),
        connect_within_join_timeout(player_b, round_timeout),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn connects_to_listening_player() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        let _accept = tokio::spawn(async move { listener.accept().await });

        let transport = connect_with_retry(&address, Duration::from_secs(1), 3, Duration::from_millis(10)).await;
        assert!(transport.is_some());
    }

    #[tokio::test]
    async fn gives_up_after_the_last_attempt() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap().to_string();
        drop(listener);

        let transport = connect_with_retry(&address, Duration::from_secs(1), 2, Duration::from_millis(10)).await;
        assert!(transport.is_none());
    }
}
