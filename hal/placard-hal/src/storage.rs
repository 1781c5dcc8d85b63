//! Non-volatile storage abstractions
//!
//! The firmware addresses persistent memory the way an EEPROM is addressed:
//! a flat range of bytes at fixed offsets. Chip HALs decide how that range
//! is actually kept (real EEPROM, or an image stored in flash).

/// Storage keys for items kept in a flash key-value map
///
/// Only used by HALs that emulate byte-addressable memory on top of a
/// wear-leveled flash map.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum StorageKey {
    /// Complete byte image of the emulated EEPROM
    EepromImage = 0,
}

impl StorageKey {
    /// Get the key as a byte value
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create a key from a byte value
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(StorageKey::EepromImage),
            _ => None,
        }
    }
}

/// Errors from non-volatile storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access extends past the end of the memory
    OutOfBounds,
    /// Flash operation failed
    Flash,
    /// Key-value layer failed
    Storage,
    /// Stored data could not be decoded
    Corrupted,
}

/// Byte-addressable non-volatile memory
///
/// Writes are not acknowledged by the medium beyond the returned `Result`;
/// a power loss during a write leaves the affected range undefined.
pub trait NvMemory {
    /// Total addressable size in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(
        &mut self,
        offset: usize,
        buffer: &mut [u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;

    /// Write `data` starting at `offset`
    fn write(
        &mut self,
        offset: usize,
        data: &[u8],
    ) -> impl core::future::Future<Output = Result<(), StorageError>>;
}

/// Check that `len` bytes at `offset` fit inside `capacity`
pub fn check_bounds(capacity: usize, offset: usize, len: usize) -> Result<(), StorageError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(StorageError::OutOfBounds),
    }
}

/// RAM-backed memory
///
/// Starts out erased (all `0xFF`). Contents are lost on reset, which makes it
/// suitable for boards without persistent storage and for host tests.
#[derive(Debug, Clone)]
pub struct RamMemory<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for RamMemory<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamMemory<N> {
    /// Create an erased memory
    pub const fn new() -> Self {
        Self { bytes: [0xFF; N] }
    }

    /// Raw contents
    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }
}

impl<const N: usize> NvMemory for RamMemory<N> {
    fn capacity(&self) -> usize {
        N
    }

    async fn read(&mut self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[offset..offset + buffer.len()]);
        Ok(())
    }

    async fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, data.len())?;
        self.bytes[offset..offset + data.len()].copy_from_slice(data);
        Ok(())
    }
}

/// RAM copy of a memory that is persisted as a whole
///
/// Writes are staged on a copy first. The image only changes once the caller
/// has persisted the staged copy and hands it back through
/// [`accept`](Self::accept), so the image never holds bytes the medium lacks.
#[derive(Debug, Clone)]
pub struct MemoryImage<const N: usize> {
    bytes: [u8; N],
}

impl<const N: usize> Default for MemoryImage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> MemoryImage<N> {
    /// Create an erased image
    pub const fn new() -> Self {
        Self { bytes: [0xFF; N] }
    }

    /// Replace the image with bytes loaded from the medium
    pub fn load(&mut self, bytes: &[u8; N]) {
        self.bytes = *bytes;
    }

    /// Reset to erased
    pub fn erase(&mut self) {
        self.bytes = [0xFF; N];
    }

    pub fn as_bytes(&self) -> &[u8; N] {
        &self.bytes
    }

    pub fn read(&self, offset: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        check_bounds(N, offset, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[offset..offset + buffer.len()]);
        Ok(())
    }

    /// Image as it would be after writing `data` at `offset`
    ///
    /// Returns `None` when the write changes nothing.
    pub fn stage(&self, offset: usize, data: &[u8]) -> Result<Option<[u8; N]>, StorageError> {
        check_bounds(N, offset, data.len())?;
        if self.bytes[offset..offset + data.len()] == *data {
            return Ok(None);
        }
        let mut staged = self.bytes;
        staged[offset..offset + data.len()].copy_from_slice(data);
        Ok(Some(staged))
    }

    /// Adopt a staged image once it has been persisted
    pub fn accept(&mut self, staged: [u8; N]) {
        self.bytes = staged;
    }
}

// Implement the sequential-storage Key trait when the feature is enabled
#[cfg(feature = "sequential-storage")]
impl sequential_storage::map::Key for StorageKey {
    fn serialize_into(
        &self,
        buffer: &mut [u8],
    ) -> Result<usize, sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        buffer[0] = self.as_u8();
        Ok(1)
    }

    fn deserialize_from(
        buffer: &[u8],
    ) -> Result<(Self, usize), sequential_storage::map::SerializationError> {
        if buffer.is_empty() {
            return Err(sequential_storage::map::SerializationError::BufferTooSmall);
        }
        match StorageKey::from_u8(buffer[0]) {
            Some(key) => Ok((key, 1)),
            None => Err(sequential_storage::map::SerializationError::InvalidFormat),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    #[test]
    fn test_ram_memory_starts_erased() {
        let mut mem = RamMemory::<16>::new();
        let mut buf = [0u8; 4];
        block_on(mem.read(12, &mut buf)).unwrap();
        assert_eq!(buf, [0xFF; 4]);
    }

    #[test]
    fn test_ram_memory_write_read() {
        let mut mem = RamMemory::<16>::new();
        block_on(mem.write(3, b"abc")).unwrap();

        let mut buf = [0u8; 3];
        block_on(mem.read(3, &mut buf)).unwrap();
        assert_eq!(&buf, b"abc");
        assert_eq!(mem.as_bytes()[2], 0xFF);
    }

    #[test]
    fn test_out_of_bounds_rejected() {
        let mut mem = RamMemory::<8>::new();
        assert_eq!(
            block_on(mem.write(6, b"abc")),
            Err(StorageError::OutOfBounds)
        );

        let mut buf = [0u8; 1];
        assert_eq!(block_on(mem.read(8, &mut buf)), Err(StorageError::OutOfBounds));
        assert_eq!(check_bounds(8, usize::MAX, 2), Err(StorageError::OutOfBounds));
    }

    #[test]
    fn test_storage_key_roundtrip_byte() {
        assert_eq!(StorageKey::from_u8(0), Some(StorageKey::EepromImage));
        assert_eq!(StorageKey::EepromImage.as_u8(), 0);
        assert_eq!(StorageKey::from_u8(1), None);
        assert_eq!(StorageKey::from_u8(9), None);
    }

    #[test]
    fn test_image_unchanged_until_accepted() {
        let mut image = MemoryImage::<16>::new();
        let staged = image.stage(2, b"abc").unwrap().unwrap();
        assert_eq!(&staged[2..5], b"abc");

        // Persisting failed, so the staged copy is dropped
        let mut buf = [0u8; 3];
        image.read(2, &mut buf).unwrap();
        assert_eq!(buf, [0xFF; 3]);

        // The retry still has something to persist
        let staged = image.stage(2, b"abc").unwrap().unwrap();
        image.accept(staged);
        image.read(2, &mut buf).unwrap();
        assert_eq!(&buf, b"abc");
    }

    #[test]
    fn test_image_stage_skips_identical_write() {
        let mut image = MemoryImage::<8>::new();
        let mut loaded = [0u8; 8];
        loaded[..2].copy_from_slice(b"ok");
        image.load(&loaded);

        assert_eq!(image.stage(0, b"ok"), Ok(None));
        assert_eq!(image.stage(6, b"abc"), Err(StorageError::OutOfBounds));

        image.erase();
        assert_eq!(image.as_bytes(), &[0xFF; 8]);
    }
}
