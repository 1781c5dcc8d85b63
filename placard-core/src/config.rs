//! Timing and brightness tunables
//!
//! Defaults match the stock board; the firmware overrides them from its
//! build-time board configuration.

/// Timing parameters for rendering, playback and the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tunables {
    /// Pause between scroll steps (one column per step)
    pub scroll_step_ms: u32,
    /// Pause after each rendered schedule entry
    pub inter_slot_pause_ms: u32,
    /// How long an instant message stays up
    pub instant_timeout_s: u16,
    /// Idle wait when there is nothing to play
    pub idle_poll_ms: u32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            scroll_step_ms: 200,
            inter_slot_pause_ms: 500,
            instant_timeout_s: 60,
            idle_poll_ms: 1000,
        }
    }
}

/// Ambient light thresholds on a 10-bit sensor scale
///
/// A reading above `dimmest_above` selects the dimmest tier, above
/// `dim_above` the next, above `bright_above` the next, and anything at or
/// below `bright_above` the brightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BrightnessThresholds {
    pub dimmest_above: u16,
    pub dim_above: u16,
    pub bright_above: u16,
}

impl Default for BrightnessThresholds {
    fn default() -> Self {
        Self {
            dimmest_above: 800,
            dim_above: 450,
            bright_above: 200,
        }
    }
}

impl BrightnessThresholds {
    /// Whether the thresholds are strictly descending
    pub fn is_ordered(&self) -> bool {
        self.dimmest_above > self.dim_above && self.dim_above > self.bright_above
    }
}
