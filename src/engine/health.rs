//! Connection checks against the search engine

use super::traits::SearchBackend;
use std::time::Duration;
use tracing::{error, info, warn};

/// Probe `backend` up to `max_attempts` times, sleeping `delay` between
/// failed attempts. Returns true on the first successful probe and false once
/// every attempt has failed.
pub async fn check_connection(
    backend: &dyn SearchBackend,
    max_attempts: u32,
    delay: Duration,
) -> bool {
    for attempt in 1..=max_attempts {
        match backend.probe().await {
            Ok(info) => {
                info!("Search engine connected successfully");
                info!("Search engine version: {}", info.version.number);
                return true;
            }
            Err(e) => {
                warn!(
                    "Search engine connection attempt {}/{} failed: {}",
                    attempt, max_attempts, e
                );

                if attempt == max_attempts {
                    error!("Max connection attempts reached");
                    return false;
                }

                info!("Retrying in {:?}...", delay);
                tokio::time::sleep(delay).await;
            }
        }
    }
    false
}
