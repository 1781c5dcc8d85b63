//! Main menu selection keys

/// Main menu entries, selected by a single key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuChoice {
    /// List all stored messages
    ViewMessages,
    /// Replace the text of one message slot
    EditMessage,
    /// Show an ad-hoc message right away
    InstantMessage,
    /// Change one schedule entry
    EditSchedule,
    /// List the schedule
    ViewSchedule,
    /// Blank the display and suspend playback, or undo that
    TogglePowerSave,
}

impl MenuChoice {
    /// All entries in menu order
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::ViewMessages,
        MenuChoice::EditMessage,
        MenuChoice::InstantMessage,
        MenuChoice::EditSchedule,
        MenuChoice::ViewSchedule,
        MenuChoice::TogglePowerSave,
    ];

    /// Decode a menu key
    pub fn from_key(key: u8) -> Option<Self> {
        match key {
            b'1' => Some(MenuChoice::ViewMessages),
            b'2' => Some(MenuChoice::EditMessage),
            b'3' => Some(MenuChoice::InstantMessage),
            b'4' => Some(MenuChoice::EditSchedule),
            b'5' => Some(MenuChoice::ViewSchedule),
            b'6' => Some(MenuChoice::TogglePowerSave),
            _ => None,
        }
    }

    /// Key that selects this entry
    pub fn key(self) -> u8 {
        match self {
            MenuChoice::ViewMessages => b'1',
            MenuChoice::EditMessage => b'2',
            MenuChoice::InstantMessage => b'3',
            MenuChoice::EditSchedule => b'4',
            MenuChoice::ViewSchedule => b'5',
            MenuChoice::TogglePowerSave => b'6',
        }
    }

    /// Banner label
    pub fn label(self) -> &'static str {
        match self {
            MenuChoice::ViewMessages => "View messages",
            MenuChoice::EditMessage => "Edit a message",
            MenuChoice::InstantMessage => "Instant message",
            MenuChoice::EditSchedule => "Edit schedule",
            MenuChoice::ViewSchedule => "View schedule",
            MenuChoice::TogglePowerSave => "Toggle power save",
        }
    }
}
