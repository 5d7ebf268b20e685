//! Exponential-backoff reconnection for the push channel.
//!
//! When the subscription drops, the channel task calls [`reconnect_loop`]
//! to keep retrying with increasing delays until either the connection is
//! restored or the [`CancellationToken`] is triggered (surface teardown).

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{PushClient, PushConnection};

/// Tunable parameters for the exponential-backoff strategy.
pub struct ReconnectConfig {
    /// Delay before the first reconnection attempt.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
///
/// The result is clamped to [`ReconnectConfig::max_delay`].
pub fn next_delay(current: Duration, config: &ReconnectConfig) -> Duration {
    let next_ms = (current.as_millis() as f64 * config.multiplier) as u64;
    Duration::from_millis(next_ms).min(config.max_delay)
}

/// Attempt to reconnect to the push channel with exponential backoff.
///
/// Returns `Some(connection)` once a connection succeeds, or `None` if the
/// `cancel` token is triggered before a successful connection.
pub async fn reconnect_loop(
    client: &PushClient,
    config: &ReconnectConfig,
    cancel: &CancellationToken,
) -> Option<PushConnection> {
    let mut delay = config.initial_delay;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        tracing::info!(
            shop_id = %client.shop_id(),
            attempt,
            delay_ms = delay.as_millis() as u64,
            "Reconnecting to push channel",
        );

        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(shop_id = %client.shop_id(), "Reconnect cancelled");
                return None;
            }
            result = client.connect() => {
                match result {
                    Ok(conn) => {
                        tracing::info!(
                            shop_id = %client.shop_id(),
                            attempt,
                            "Reconnected to push channel",
                        );
                        return Some(conn);
                    }
                    Err(e) => {
                        tracing::warn!(
                            shop_id = %client.shop_id(),
                            error = %e,
                            "Reconnect attempt {attempt} failed",
                        );
                    }
                }
            }
        }

        // Wait before the next attempt, respecting cancellation.
        tokio::select! {
            _ = cancel.cancelled() => return None,
            _ = tokio::time::sleep(delay) => {}
        }

        delay = next_delay(delay, config);
    }
}
