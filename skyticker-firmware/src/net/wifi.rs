//! WPA2 association

use cyw43::{Control, JoinOptions};
use defmt::*;
use embassy_time::Timer;

use skyticker_core::config::NetworkConfig;

/// Join attempts before giving up
pub const JOIN_ATTEMPTS: u8 = 5;

/// Pause between join attempts (ms)
const JOIN_RETRY_MS: u64 = 2_000;

/// Association failed on every attempt
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JoinError;

/// Join the configured network with bounded retries
pub async fn join(control: &mut Control<'_>, network: &NetworkConfig) -> Result<(), JoinError> {
    for attempt in 1..=JOIN_ATTEMPTS {
        info!(
            "Joining {} (attempt {}/{})",
            network.ssid.as_str(),
            attempt,
            JOIN_ATTEMPTS
        );
        match control
            .join(network.ssid.as_str(), JoinOptions::new(network.password.as_bytes()))
            .await
        {
            Ok(()) => {
                info!("Joined {}", network.ssid.as_str());
                return Ok(());
            }
            Err(e) => {
                warn!("Join failed: {:?}", Debug2Format(&e));
                Timer::after_millis(JOIN_RETRY_MS).await;
            }
        }
    }
    Err(JoinError)
}
