//! Boot-time configuration resolution
//!
//! Order: TOML text in flash, postcard binary in flash, then the
//! `device.toml` compiled into the image. The first candidate that parses
//! and validates wins.

use core::str;
use defmt::*;

use skyticker_core::config::{parse_config, DeviceConfig, InvalidConfig, CONFIG_VERSION};
use skyticker_hal_rp2040::flash::{FlashError, FlashStorage, StorageKey, MAX_ITEM_SIZE};
use skyticker_hal_rp2040::FlashStorageTrait;

/// Why a candidate configuration was skipped
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Partition read failed (includes "no such item")
    Flash(FlashError),
    /// Binary item is not a postcard `DeviceConfig`
    Deserialize,
    /// TOML text did not parse
    TomlParse,
    /// TOML item is not UTF-8
    InvalidUtf8,
    /// Binary item was written by an incompatible firmware
    VersionMismatch,
    /// Parsed, but rejected by validation
    Invalid(InvalidConfig),
}

impl From<FlashError> for ConfigError {
    fn from(e: FlashError) -> Self {
        ConfigError::Flash(e)
    }
}

impl From<InvalidConfig> for ConfigError {
    fn from(e: InvalidConfig) -> Self {
        ConfigError::Invalid(e)
    }
}

/// Where the running configuration came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigSource {
    FlashToml,
    FlashBinary,
    Embedded,
}

pub struct ConfigPersistence<'d> {
    storage: FlashStorage<'d>,
    buffer: [u8; MAX_ITEM_SIZE],
}

impl<'d> ConfigPersistence<'d> {
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self {
            storage,
            buffer: [0; MAX_ITEM_SIZE],
        }
    }

    /// Resolve the configuration, falling back to `embedded`
    ///
    /// The embedded text is checked at build time, so the last resort of
    /// `DeviceConfig::default()` is only reached on a parser mismatch.
    pub async fn resolve(&mut self, embedded: &str) -> (DeviceConfig, ConfigSource) {
        for key in StorageKey::ALL {
            match self.load(key).await {
                Ok(config) => {
                    let source = match key {
                        StorageKey::DeviceConfigToml => ConfigSource::FlashToml,
                        StorageKey::DeviceConfig => ConfigSource::FlashBinary,
                    };
                    return (config, source);
                }
                Err(ConfigError::Flash(FlashError::NotFound)) => debug!("No {} in flash", key),
                Err(e) => warn!("Skipping {} from flash: {}", key, e),
            }
        }

        let config = match parse_config(embedded) {
            Ok(config) => config,
            Err(e) => {
                error!("Embedded device.toml rejected: {}", e);
                DeviceConfig::default()
            }
        };
        (config, ConfigSource::Embedded)
    }

    async fn load(&mut self, key: StorageKey) -> Result<DeviceConfig, ConfigError> {
        let len = self.storage.read(key, &mut self.buffer).await?;
        let bytes = &self.buffer[..len];
        debug!("Read {} bytes for {}", len, key);

        let config = match key {
            StorageKey::DeviceConfigToml => {
                let text = str::from_utf8(bytes).map_err(|_| ConfigError::InvalidUtf8)?;
                parse_config(text).map_err(|e| {
                    warn!("TOML parse error: {}", e);
                    ConfigError::TomlParse
                })?
            }
            StorageKey::DeviceConfig => {
                let config: DeviceConfig =
                    postcard::from_bytes(bytes).map_err(|_| ConfigError::Deserialize)?;
                if config.version != CONFIG_VERSION {
                    warn!(
                        "Binary config is version {}, firmware expects {}",
                        config.version, CONFIG_VERSION
                    );
                    return Err(ConfigError::VersionMismatch);
                }
                config
            }
        };

        config.validate()?;
        Ok(config)
    }
}

/// Log the settings most useful when reading a boot log
pub fn log_config_summary(config: &DeviceConfig, source: ConfigSource) {
    info!("Configuration from {}", source);
    info!(
        "  {} ({}), network {}",
        config.weather.location.as_str(),
        config.weather.units,
        config.network.ssid.as_str()
    );
    debug!(
        "  refresh {} ms, {} attempts, {} ms backoff, resync every {}",
        config.refresh.interval_ms,
        config.refresh.max_attempts,
        config.refresh.backoff_ms,
        config.refresh.resync_every
    );
    debug!(
        "  timeouts: fetch {} ms, clock sync {} ms x {}",
        config.refresh.fetch_timeout_ms,
        config.refresh.sync_timeout_ms,
        config.refresh.resync_attempts
    );
    debug!(
        "  ticker {} px / {} ms, spacing {}, brightness {}",
        config.ticker.step, config.ticker.tick_ms, config.ticker.spacing, config.display.brightness
    );
}
