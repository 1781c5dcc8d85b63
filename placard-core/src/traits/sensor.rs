//! Ambient light sensor trait

/// Ambient light reading source
///
/// Readings use a 10-bit scale (0..=1023). Higher readings select dimmer
/// display levels.
pub trait LightSensor {
    /// Take one reading
    fn read(&mut self) -> u16;
}
