//! Emulated EEPROM on RP2040 flash
//!
//! The RP2040 has no EEPROM, so the byte-addressable store is kept as a RAM
//! image that is persisted as a single sequential-storage item in the last
//! 64KB of flash. Every write stores the whole image; sequential-storage
//! spreads those writes across the partition. The RAM image only takes a
//! write after flash has accepted it.

use embassy_rp::dma::Channel;
use embassy_rp::flash::{Async, Flash, ERASE_SIZE};
use embassy_rp::peripherals::FLASH;
use embassy_rp::Peri;
use sequential_storage::cache::NoCache;
use sequential_storage::map;

use placard_hal::{MemoryImage, NvMemory, StorageError, StorageKey};

/// Flash storage configuration
pub const FLASH_SIZE: usize = 2 * 1024 * 1024; // 2MB flash on the Pico
pub const STORE_PARTITION_SIZE: usize = 64 * 1024;
pub const STORE_PARTITION_START: usize = FLASH_SIZE - STORE_PARTITION_SIZE;

/// Flash erase size for RP2040
pub const FLASH_ERASE_SIZE: usize = ERASE_SIZE;

// The partition must be whole erase sectors
const _: () = assert!(STORE_PARTITION_SIZE % FLASH_ERASE_SIZE == 0);

/// Flash range for the store partition
pub const STORE_RANGE: core::ops::Range<u32> =
    (STORE_PARTITION_START as u32)..(FLASH_SIZE as u32);

/// Size of the emulated EEPROM
pub const IMAGE_SIZE: usize = 512;

/// Scratch space for one map item (key byte + image + headers)
const ITEM_BUFFER_SIZE: usize = 1024;

/// Byte-addressable memory emulated on flash
pub struct EepromEmulation<'d> {
    flash: Flash<'d, FLASH, Async, FLASH_SIZE>,
    image: MemoryImage<IMAGE_SIZE>,
    loaded: bool,
}

impl<'d> EepromEmulation<'d> {
    /// Create a new instance; the image is loaded on first access
    pub fn new(flash: Peri<'d, FLASH>, dma: Peri<'d, impl Channel>) -> Self {
        Self {
            flash: Flash::new(flash, dma),
            image: MemoryImage::new(),
            loaded: false,
        }
    }

    /// Load the image from flash
    ///
    /// A missing item leaves the image erased (`0xFF`), which the store reads
    /// as blank memory.
    async fn load(&mut self) -> Result<(), StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        let result = map::fetch_item::<StorageKey, &[u8], _>(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &StorageKey::EepromImage,
        )
        .await;

        match result {
            Ok(Some(data)) if data.len() == IMAGE_SIZE => {
                let mut bytes = [0u8; IMAGE_SIZE];
                bytes.copy_from_slice(data);
                self.image.load(&bytes);
                #[cfg(feature = "defmt")]
                defmt::debug!("eeprom image loaded from flash");
            }
            Ok(Some(_)) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("eeprom image has wrong size, starting blank");
                self.image.erase();
            }
            Ok(None) => {
                #[cfg(feature = "defmt")]
                defmt::info!("no eeprom image in flash, starting blank");
                self.image.erase();
            }
            Err(_) => return Err(StorageError::Storage),
        }

        self.loaded = true;
        Ok(())
    }

    async fn ensure_loaded(&mut self) -> Result<(), StorageError> {
        if !self.loaded {
            self.load().await?;
        }
        Ok(())
    }

    /// Persist a whole image
    async fn commit(&mut self, staged: &[u8; IMAGE_SIZE]) -> Result<(), StorageError> {
        let mut buffer = [0u8; ITEM_BUFFER_SIZE];
        let image: &[u8] = staged;
        map::store_item(
            &mut self.flash,
            STORE_RANGE,
            &mut NoCache::new(),
            &mut buffer,
            &StorageKey::EepromImage,
            &image,
        )
        .await
        .map_err(|_| StorageError::Storage)
    }
}

impl<'d> NvMemory for EepromEmulation<'d> {
    fn capacity(&self) -> usize {
        IMAGE_SIZE
    }

    async fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.ensure_loaded().await?;
        self.image.read(offset, buffer)
    }

    async fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        self.ensure_loaded().await?;
        let Some(staged) = self.image.stage(offset, data)? else {
            return Ok(());
        };
        self.commit(&staged).await?;
        self.image.accept(staged);
        Ok(())
    }
}
