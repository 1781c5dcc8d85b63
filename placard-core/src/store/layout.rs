//! Persisted byte layout
//!
//! ```text
//! 0..486    6 message blocks, 81 bytes each (80 chars + NUL)
//! 486..492  schedule message indices, one byte per entry
//! 492..498  schedule durations in seconds, one byte per entry
//! 498..500  validity sentinel 0x5A 0xA5
//! ```

/// Number of message slots and schedule entries
pub const SLOT_COUNT: usize = 6;

/// Maximum characters in a stored message
pub const MAX_MESSAGE_LEN: usize = 80;

/// Size of one message block including the terminator
pub const MESSAGE_BLOCK_LEN: usize = MAX_MESSAGE_LEN + 1;

/// Start of the message blocks
pub const MESSAGES_OFFSET: usize = 0;

/// Start of the schedule message-index array
pub const SCHEDULE_INDEX_OFFSET: usize = MESSAGES_OFFSET + SLOT_COUNT * MESSAGE_BLOCK_LEN;

/// Start of the schedule duration array
pub const SCHEDULE_DURATION_OFFSET: usize = SCHEDULE_INDEX_OFFSET + SLOT_COUNT;

/// Start of the validity sentinel
pub const SENTINEL_OFFSET: usize = SCHEDULE_DURATION_OFFSET + SLOT_COUNT;

/// Sentinel marking initialized storage
pub const SENTINEL: [u8; 2] = [0x5A, 0xA5];

/// Total bytes used
pub const STORE_LEN: usize = SENTINEL_OFFSET + SENTINEL.len();

/// Message written to slot 0 on first boot
pub const DEFAULT_GREETING: &str = "Hello, World!";

/// Duration of schedule entry 0 on first boot
pub const DEFAULT_DURATION_S: u8 = 5;

/// A message slot / schedule position (0..6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Slot(u8);

impl Slot {
    /// Create a slot from an index, `None` if out of range
    pub const fn new(index: usize) -> Option<Self> {
        if index < SLOT_COUNT {
            Some(Slot(index as u8))
        } else {
            None
        }
    }

    /// Slot index
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// All slots in order
    pub fn all() -> impl Iterator<Item = Slot> {
        (0..SLOT_COUNT as u8).map(Slot)
    }

    /// Byte offset of this slot's message block
    pub const fn message_offset(self) -> usize {
        MESSAGES_OFFSET + self.index() * MESSAGE_BLOCK_LEN
    }
}

impl core::fmt::Display for Slot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One step of the display cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleEntry {
    /// Message slot to show; not validated on write
    pub message: u8,
    /// Seconds to hold the message, 0 skips the entry
    pub duration_s: u8,
}

impl ScheduleEntry {
    pub const fn new(message: u8, duration_s: u8) -> Self {
        Self {
            message,
            duration_s,
        }
    }

    /// Whether the player skips this entry
    pub const fn is_skipped(&self) -> bool {
        self.duration_s == 0
    }

    /// Referenced slot, `None` if the index is out of range
    pub fn slot(&self) -> Option<Slot> {
        Slot::new(usize::from(self.message))
    }
}

/// The complete display cycle
pub type Schedule = [ScheduleEntry; SLOT_COUNT];

/// Schedule written on first boot: entry `i` shows message `i`, only entry 0
/// has a duration
pub fn default_schedule() -> Schedule {
    let mut schedule = [ScheduleEntry::default(); SLOT_COUNT];
    for (i, entry) in schedule.iter_mut().enumerate() {
        entry.message = i as u8;
    }
    schedule[0].duration_s = DEFAULT_DURATION_S;
    schedule
}
