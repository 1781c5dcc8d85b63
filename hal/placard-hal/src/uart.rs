//! Serial line configuration
//!
//! Describes the framing of the menu console. Chip HALs translate this into
//! their own UART configuration.

/// Default console baud rate
pub const DEFAULT_BAUDRATE: u32 = 9600;

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for SerialConfig {
    fn default() -> Self {
        Self {
            baudrate: DEFAULT_BAUDRATE,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl SerialConfig {
    /// 8N1 at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Approximate time on the wire for one byte, in microseconds
    pub fn byte_time_us(&self) -> u32 {
        let bits = 1 + self.data_bits.count()
            + u32::from(self.parity != Parity::None)
            + self.stop_bits.count();
        (bits * 1_000_000).div_ceil(self.baudrate.max(1))
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

impl DataBits {
    fn count(self) -> u32 {
        match self {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    fn count(self) -> u32 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_9600_8n1() {
        let config = SerialConfig::default();
        assert_eq!(config.baudrate, 9600);
        assert_eq!(config.data_bits, DataBits::Eight);
        assert_eq!(config.parity, Parity::None);
        assert_eq!(config.stop_bits, StopBits::One);
    }

    #[test]
    fn test_byte_time() {
        // 10 bits at 9600 baud
        assert_eq!(SerialConfig::default().byte_time_us(), 1042);
        assert_eq!(SerialConfig::with_baudrate(115_200).byte_time_us(), 87);
    }
}
