//! Config partition access
//!
//! The device only reads from flash. Items are written by the provisioning
//! tool, one per [`StorageKey`], each encoded as a one-byte key followed by
//! the raw value.

/// Item stored in the config partition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// `DeviceConfig` serialized with postcard
    DeviceConfig = 0,
    /// `device.toml` text
    DeviceConfigToml = 1,
}

impl StorageKey {
    /// Every key, in lookup order for the config loader
    pub const ALL: [StorageKey; 2] = [StorageKey::DeviceConfigToml, StorageKey::DeviceConfig];
}

impl From<StorageKey> for u8 {
    fn from(key: StorageKey) -> u8 {
        key as u8
    }
}

impl TryFrom<u8> for StorageKey {
    type Error = ();

    fn try_from(byte: u8) -> Result<Self, ()> {
        StorageKey::ALL
            .into_iter()
            .find(|key| u8::from(*key) == byte)
            .ok_or(())
    }
}

/// Config partition read errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FlashError {
    /// The flash peripheral reported an error
    Flash,
    /// Partition contents are corrupt or unreadable
    Storage,
    /// No item stored under the key
    NotFound,
    /// Item is larger than the caller's buffer
    BufferTooSmall,
}

/// Read-only view of the config partition
pub trait FlashStorage {
    /// Copy the item stored under `key` into `buffer`, returning its length
    fn read(
        &mut self,
        key: StorageKey,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<usize, FlashError>>;
}

#[cfg(feature = "sequential-storage")]
mod map_key {
    use sequential_storage::map::{Key, SerializationError};

    use super::StorageKey;

    impl Key for StorageKey {
        fn serialize_into(&self, buffer: &mut [u8]) -> Result<usize, SerializationError> {
            let [first, ..] = buffer else {
                return Err(SerializationError::BufferTooSmall);
            };
            *first = u8::from(*self);
            Ok(1)
        }

        fn deserialize_from(buffer: &[u8]) -> Result<(Self, usize), SerializationError> {
            let [first, ..] = buffer else {
                return Err(SerializationError::BufferTooSmall);
            };
            let key = StorageKey::try_from(*first).map_err(|_| SerializationError::InvalidFormat)?;
            Ok((key, 1))
        }
    }
}
