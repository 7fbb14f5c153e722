//! Config partition on the Pico W's QSPI flash
//!
//! The last 64 KB of the 2 MB chip hold a sequential-storage map. The CYW43
//! blobs and the application image sit below it (see the firmware's
//! `memory.x`).

use core::ops::Range;

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

pub use skyticker_hal::flash::{FlashError, StorageKey};

pub const FLASH_SIZE: usize = 2 * 1024 * 1024;

/// Partition bounds as offsets into flash
pub const CONFIG_PARTITION: Range<u32> = (FLASH_SIZE - 64 * 1024) as u32..FLASH_SIZE as u32;

/// Largest item the partition holds, key byte included
pub const MAX_ITEM_SIZE: usize = 4096;

pub struct Rp2040FlashStorage<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    scratch: [u8; MAX_ITEM_SIZE],
}

impl<'d> Rp2040FlashStorage<'d> {
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            scratch: [0; MAX_ITEM_SIZE],
        }
    }
}

impl skyticker_hal::FlashStorage for Rp2040FlashStorage<'_> {
    async fn read(&mut self, key: StorageKey, buffer: &mut [u8]) -> Result<usize, FlashError> {
        let item = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            CONFIG_PARTITION,
            &mut NoCache::new(),
            &mut self.scratch,
            &key,
        )
        .await
        .map_err(|_| FlashError::Storage)?
        .ok_or(FlashError::NotFound)?;

        buffer
            .get_mut(..item.len())
            .ok_or(FlashError::BufferTooSmall)?
            .copy_from_slice(item);
        Ok(item.len())
    }
}

pub type FlashStorage<'d> = Rp2040FlashStorage<'d>;
