//! Persistent store for messages and the schedule
//!
//! Every record lives at a fixed offset (see [`layout`]). Writes replace a
//! whole record; there is no journaling, so a power loss mid-write leaves
//! that record undefined.

pub mod layout;

use heapless::String;
use placard_hal::{NvMemory, StorageError};

pub use layout::{
    default_schedule, Schedule, ScheduleEntry, Slot, DEFAULT_GREETING, MAX_MESSAGE_LEN,
    SLOT_COUNT,
};
use layout::{
    MESSAGE_BLOCK_LEN, SCHEDULE_DURATION_OFFSET, SCHEDULE_INDEX_OFFSET, SENTINEL,
    SENTINEL_OFFSET, STORE_LEN,
};

/// A stored message
pub type Message = String<MAX_MESSAGE_LEN>;

/// Typed access to the persisted layout on top of byte memory
pub struct Store<M> {
    memory: M,
}

impl<M: NvMemory> Store<M> {
    pub fn new(memory: M) -> Self {
        Self { memory }
    }

    /// Give back the underlying memory
    pub fn into_memory(self) -> M {
        self.memory
    }

    /// Read a message; an erased or empty slot reads as `""`
    pub async fn read_message(&mut self, slot: Slot) -> Result<Message, StorageError> {
        let mut block = [0u8; MESSAGE_BLOCK_LEN];
        self.memory.read(slot.message_offset(), &mut block).await?;
        Ok(decode_message(&block))
    }

    /// Write a message, truncated to [`MAX_MESSAGE_LEN`] bytes on a character
    /// boundary
    pub async fn write_message(&mut self, slot: Slot, text: &str) -> Result<(), StorageError> {
        let text = truncate(text, MAX_MESSAGE_LEN);
        let mut block = [0u8; MESSAGE_BLOCK_LEN];
        block[..text.len()].copy_from_slice(text.as_bytes());
        self.memory.write(slot.message_offset(), &block).await
    }

    /// Read all schedule entries in order
    pub async fn read_schedule(&mut self) -> Result<Schedule, StorageError> {
        let mut indices = [0u8; SLOT_COUNT];
        let mut durations = [0u8; SLOT_COUNT];
        self.memory.read(SCHEDULE_INDEX_OFFSET, &mut indices).await?;
        self.memory
            .read(SCHEDULE_DURATION_OFFSET, &mut durations)
            .await?;

        let mut schedule = [ScheduleEntry::default(); SLOT_COUNT];
        for (i, entry) in schedule.iter_mut().enumerate() {
            *entry = ScheduleEntry::new(indices[i], durations[i]);
        }
        Ok(schedule)
    }

    /// Replace the whole schedule
    pub async fn write_schedule(&mut self, schedule: &Schedule) -> Result<(), StorageError> {
        let indices = schedule.map(|entry| entry.message);
        let durations = schedule.map(|entry| entry.duration_s);
        self.memory.write(SCHEDULE_INDEX_OFFSET, &indices).await?;
        self.memory.write(SCHEDULE_DURATION_OFFSET, &durations).await
    }

    /// Whether the validity sentinel is present
    pub async fn is_initialized(&mut self) -> Result<bool, StorageError> {
        let mut marker = [0u8; SENTINEL.len()];
        self.memory.read(SENTINEL_OFFSET, &mut marker).await?;
        Ok(marker == SENTINEL)
    }

    /// Write the greeting, empty slots and default schedule
    ///
    /// The sentinel goes last, so an interrupted run is repeated on the next
    /// boot.
    pub async fn initialize_defaults(&mut self) -> Result<(), StorageError> {
        for slot in Slot::all() {
            let text = if slot.index() == 0 { DEFAULT_GREETING } else { "" };
            self.write_message(slot, text).await?;
        }
        self.write_schedule(&default_schedule()).await?;
        self.memory.write(SENTINEL_OFFSET, &SENTINEL).await
    }

    /// Initialize if the sentinel is missing
    ///
    /// Returns `true` if defaults were written. Fails with
    /// [`StorageError::OutOfBounds`] if the memory cannot hold the layout.
    pub async fn ensure_initialized(&mut self) -> Result<bool, StorageError> {
        if self.memory.capacity() < STORE_LEN {
            return Err(StorageError::OutOfBounds);
        }
        if self.is_initialized().await? {
            return Ok(false);
        }
        self.initialize_defaults().await?;
        Ok(true)
    }
}

/// Longest prefix of `text` that fits in `max` bytes
fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

fn decode_message(block: &[u8; MESSAGE_BLOCK_LEN]) -> Message {
    let bytes = &block[..MAX_MESSAGE_LEN];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(MAX_MESSAGE_LEN);
    let text = match core::str::from_utf8(&bytes[..end]) {
        Ok(text) => text,
        Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or_default(),
    };

    let mut message = Message::new();
    // Cannot overflow: text is at most MAX_MESSAGE_LEN bytes
    let _ = message.push_str(text);
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use placard_hal::RamMemory;
    use proptest::prelude::*;

    type TestStore = Store<RamMemory<512>>;

    fn slot(i: usize) -> Slot {
        Slot::new(i).unwrap()
    }

    #[test]
    fn test_blank_memory_is_uninitialized() {
        let mut store = TestStore::new(RamMemory::new());
        assert!(!block_on(store.is_initialized()).unwrap());
        // Erased bytes are not valid text
        assert_eq!(block_on(store.read_message(slot(3))).unwrap(), "");
    }

    #[test]
    fn test_initialize_defaults() {
        let mut store = TestStore::new(RamMemory::new());
        block_on(store.initialize_defaults()).unwrap();

        assert!(block_on(store.is_initialized()).unwrap());
        assert_eq!(block_on(store.read_message(slot(0))).unwrap(), "Hello, World!");
        for i in 1..SLOT_COUNT {
            assert_eq!(block_on(store.read_message(slot(i))).unwrap(), "");
        }

        let schedule = block_on(store.read_schedule()).unwrap();
        assert_eq!(schedule[0].duration_s, 5);
        assert!(schedule[1..].iter().all(|e| e.duration_s == 0));
    }

    #[test]
    fn test_ensure_initialized_runs_once() {
        let mut store = TestStore::new(RamMemory::new());
        assert!(block_on(store.ensure_initialized()).unwrap());

        block_on(store.write_message(slot(0), "kept")).unwrap();
        assert!(!block_on(store.ensure_initialized()).unwrap());
        assert_eq!(block_on(store.read_message(slot(0))).unwrap(), "kept");
    }

    #[test]
    fn test_small_memory_rejected() {
        let mut store = Store::new(RamMemory::<256>::new());
        assert_eq!(
            block_on(store.ensure_initialized()),
            Err(StorageError::OutOfBounds)
        );
    }

    #[test]
    fn test_sentinel_bytes_on_media() {
        let mut store = TestStore::new(RamMemory::new());
        block_on(store.initialize_defaults()).unwrap();
        let memory = store.into_memory();
        assert_eq!(&memory.as_bytes()[498..500], &[0x5A, 0xA5]);
        assert_eq!(memory.as_bytes()[500], 0xFF);
    }

    #[test]
    fn test_message_block_is_padded() {
        let mut store = TestStore::new(RamMemory::new());
        block_on(store.write_message(slot(1), "abc")).unwrap();
        let memory = store.into_memory();
        let block = &memory.as_bytes()[81..162];
        assert_eq!(&block[..3], b"abc");
        assert!(block[3..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_overwrite_shorter_message() {
        let mut store = TestStore::new(RamMemory::new());
        block_on(store.write_message(slot(2), "a much longer message")).unwrap();
        block_on(store.write_message(slot(2), "short")).unwrap();
        assert_eq!(block_on(store.read_message(slot(2))).unwrap(), "short");
    }

    #[test]
    fn test_truncates_on_char_boundary() {
        let mut store = TestStore::new(RamMemory::new());
        let text = "é".repeat(50);
        block_on(store.write_message(slot(4), &text)).unwrap();
        let read = block_on(store.read_message(slot(4))).unwrap();
        assert_eq!(read.chars().count(), 40);
        assert_eq!(read.len(), 80);
    }

    #[test]
    fn test_schedule_write_read() {
        let mut store = TestStore::new(RamMemory::new());
        let mut schedule = default_schedule();
        schedule[3] = ScheduleEntry::new(9, 255);
        block_on(store.write_schedule(&schedule)).unwrap();
        assert_eq!(block_on(store.read_schedule()).unwrap(), schedule);
    }

    #[test]
    fn test_messages_do_not_overlap_schedule() {
        let mut store = TestStore::new(RamMemory::new());
        block_on(store.initialize_defaults()).unwrap();
        block_on(store.write_message(slot(5), &"z".repeat(200))).unwrap();
        assert_eq!(block_on(store.read_schedule()).unwrap(), default_schedule());
        assert!(block_on(store.is_initialized()).unwrap());
    }

    proptest! {
        #[test]
        fn prop_write_then_read_truncates(index in 0usize..SLOT_COUNT, text in "[ -~]{0,200}") {
            let mut store = TestStore::new(RamMemory::new());
            block_on(store.write_message(slot(index), &text)).unwrap();
            let read = block_on(store.read_message(slot(index))).unwrap();
            let expected = &text[..text.len().min(MAX_MESSAGE_LEN)];
            prop_assert_eq!(read.as_str(), expected);
        }
    }
}
