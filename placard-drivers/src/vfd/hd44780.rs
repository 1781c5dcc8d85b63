//! HD44780-compatible VFD module on a 4-bit bus
//!
//! Write-only wiring: RS, E and D4..D7, with R/W tied low, so every command
//! is followed by a fixed delay instead of a busy-flag poll.
//!
//! # Brightness
//!
//! Noritake-style VFD modules take a brightness byte as a data write
//! immediately after a function-set command:
//! - `0x00`: 100%
//! - `0x01`: 75%
//! - `0x02`: 50%
//! - `0x03`: 25%

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use placard_core::traits::{Brightness, CharacterDisplay, DisplayError};

/// Instruction set
pub mod cmd {
    /// Clear display and home cursor
    pub const CLEAR: u8 = 0x01;
    /// Home cursor
    pub const HOME: u8 = 0x02;
    /// Entry mode: increment, no shift
    pub const ENTRY_INCREMENT: u8 = 0x06;
    /// Display off
    pub const DISPLAY_OFF: u8 = 0x08;
    /// Display on, cursor and blink off
    pub const DISPLAY_ON: u8 = 0x0C;
    /// Function set: 4-bit bus, two lines
    pub const FUNCTION_SET: u8 = 0x28;
    /// Set DDRAM address (OR with address)
    pub const SET_DDRAM: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

/// Longest DDRAM line
const MAX_COLS: u8 = 40;

/// Execution time of ordinary instructions
const COMMAND_DELAY_US: u32 = 50;

/// Execution time of clear and home
const CLEAR_DELAY_US: u32 = 2_000;

/// Power-on settle time before the first nibble
const POWER_ON_DELAY_MS: u32 = 50;

/// Bus pins
pub struct VfdPins<P> {
    /// Register select (low = instruction, high = data)
    pub rs: P,
    /// Enable strobe, latched on the falling edge
    pub en: P,
    /// D4..D7, least significant first
    pub data: [P; 4],
}

/// VFD character display driver
pub struct Vfd<P, D> {
    pins: VfdPins<P>,
    delay: D,
    cols: u8,
    rows: u8,
    display_on: bool,
}

impl<P: OutputPin, D: DelayNs> Vfd<P, D> {
    /// Create a driver for a `cols` x `rows` module
    ///
    /// Geometry is clamped to what the controller can address. Call
    /// [`init`](Self::init) before use.
    pub fn new(pins: VfdPins<P>, delay: D, cols: u8, rows: u8) -> Self {
        Self {
            pins,
            delay,
            cols: cols.min(MAX_COLS),
            rows: rows.min(ROW_OFFSETS.len() as u8),
            display_on: false,
        }
    }

    /// Run the 4-bit initialization sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.delay.delay_ms(POWER_ON_DELAY_MS);
        self.set_rs(false)?;

        // Three 8-bit function sets force a known state, then switch to 4-bit
        self.write_nibble(0x3)?;
        self.delay.delay_us(4_100);
        self.write_nibble(0x3)?;
        self.delay.delay_us(100);
        self.write_nibble(0x3)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        self.write_nibble(0x2)?;
        self.delay.delay_us(COMMAND_DELAY_US);

        self.command(cmd::FUNCTION_SET)?;
        self.command(cmd::DISPLAY_OFF)?;
        self.clear()?;
        self.command(cmd::ENTRY_INCREMENT)?;
        self.set_power(true)
    }

    /// Whether the display is switched on
    pub fn is_on(&self) -> bool {
        self.display_on
    }

    /// Release the pins and delay
    pub fn release(self) -> (VfdPins<P>, D) {
        (self.pins, self.delay)
    }

    fn set_rs(&mut self, high: bool) -> Result<(), DisplayError> {
        let result = if high {
            self.pins.rs.set_high()
        } else {
            self.pins.rs.set_low()
        };
        result.map_err(|_| DisplayError::Bus)
    }

    fn write_nibble(&mut self, nibble: u8) -> Result<(), DisplayError> {
        for (bit, pin) in self.pins.data.iter_mut().enumerate() {
            let result = if nibble & (1 << bit) != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            result.map_err(|_| DisplayError::Bus)?;
        }

        self.pins.en.set_high().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(1);
        self.pins.en.set_low().map_err(|_| DisplayError::Bus)?;
        self.delay.delay_us(1);
        Ok(())
    }

    fn write_byte(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        self.set_rs(data)?;
        self.write_nibble(byte >> 4)?;
        self.write_nibble(byte & 0x0F)?;
        self.delay.delay_us(COMMAND_DELAY_US);
        Ok(())
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.write_byte(command, false)
    }

    fn data(&mut self, byte: u8) -> Result<(), DisplayError> {
        self.write_byte(byte, true)
    }
}

/// Brightness byte sent after a function set
fn brightness_code(level: Brightness) -> u8 {
    match level {
        Brightness::Full => 0x00,
        Brightness::ThreeQuarters => 0x01,
        Brightness::Half => 0x02,
        Brightness::Quarter => 0x03,
    }
}

impl<P: OutputPin, D: DelayNs> CharacterDisplay for Vfd<P, D> {
    fn dimensions(&self) -> (u8, u8) {
        (self.cols, self.rows)
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::CLEAR)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        Ok(())
    }

    fn home(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::HOME)?;
        self.delay.delay_us(CLEAR_DELAY_US);
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows {
            return Err(DisplayError::InvalidPosition);
        }
        self.command(cmd::SET_DDRAM | (ROW_OFFSETS[usize::from(row)] + col))
    }

    fn write_str(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.data(byte)?;
        }
        Ok(())
    }

    fn set_brightness(&mut self, level: Brightness) -> Result<(), DisplayError> {
        self.command(cmd::FUNCTION_SET)?;
        self.data(brightness_code(level))
    }

    fn set_power(&mut self, on: bool) -> Result<(), DisplayError> {
        self.command(if on { cmd::DISPLAY_ON } else { cmd::DISPLAY_OFF })?;
        self.display_on = on;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    const RS: usize = 4;
    const EN: usize = 5;

    /// Bus state shared by all mock pins
    #[derive(Default)]
    struct Bus {
        levels: [bool; 6],
        /// Latched `(rs, nibble)` pairs, in order
        nibbles: Vec<(bool, u8)>,
        fail: bool,
    }

    impl Bus {
        /// Latched traffic after the init nibbles, paired into bytes
        fn bytes(&self, skip: usize) -> Vec<(bool, u8)> {
            self.nibbles[skip..]
                .chunks(2)
                .map(|pair| (pair[0].0, (pair[0].1 << 4) | pair[1].1))
                .collect()
        }
    }

    struct MockPin {
        id: usize,
        bus: Rc<RefCell<Bus>>,
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            let mut bus = self.bus.borrow_mut();
            if bus.fail {
                return Err(ErrorKind::Other);
            }
            if self.id == EN && bus.levels[EN] {
                let nibble = (0..4).fold(0u8, |acc, bit| acc | (u8::from(bus.levels[bit]) << bit));
                let rs = bus.levels[RS];
                bus.nibbles.push((rs, nibble));
            }
            bus.levels[self.id] = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            let mut bus = self.bus.borrow_mut();
            if bus.fail {
                return Err(ErrorKind::Other);
            }
            bus.levels[self.id] = true;
            Ok(())
        }
    }

    struct MockDelay;

    impl DelayNs for MockDelay {
        fn delay_ns(&mut self, _ns: u32) {}
    }

    /// Nibbles sent by `init` before the first full byte
    const INIT_NIBBLES: usize = 4;

    fn vfd() -> (Vfd<MockPin, MockDelay>, Rc<RefCell<Bus>>) {
        vfd_sized(20, 2)
    }

    fn vfd_sized(cols: u8, rows: u8) -> (Vfd<MockPin, MockDelay>, Rc<RefCell<Bus>>) {
        let bus = Rc::new(RefCell::new(Bus::default()));
        let pin = |id| MockPin {
            id,
            bus: bus.clone(),
        };
        let pins = VfdPins {
            rs: pin(RS),
            en: pin(EN),
            data: [pin(0), pin(1), pin(2), pin(3)],
        };
        (Vfd::new(pins, MockDelay, cols, rows), bus)
    }

    #[test]
    fn test_init_sequence() {
        let (mut vfd, bus) = vfd();
        vfd.init().unwrap();

        let bus = bus.borrow();
        let init: Vec<u8> = bus.nibbles[..INIT_NIBBLES].iter().map(|n| n.1).collect();
        assert_eq!(init, [0x3, 0x3, 0x3, 0x2]);
        assert_eq!(
            bus.bytes(INIT_NIBBLES),
            [
                (false, cmd::FUNCTION_SET),
                (false, cmd::DISPLAY_OFF),
                (false, cmd::CLEAR),
                (false, cmd::ENTRY_INCREMENT),
                (false, cmd::DISPLAY_ON),
            ]
        );
        assert!(vfd.is_on());
    }

    #[test]
    fn test_cursor_and_text() {
        let (mut vfd, bus) = vfd();
        vfd.set_cursor(3, 1).unwrap();
        vfd.write_str("Hi").unwrap();

        assert_eq!(
            bus.borrow().bytes(0),
            [(false, 0x80 | 0x43), (true, b'H'), (true, b'i')]
        );
    }

    #[test]
    fn test_cursor_out_of_range() {
        let (mut vfd, _bus) = vfd();
        assert_eq!(vfd.set_cursor(20, 0), Err(DisplayError::InvalidPosition));
        assert_eq!(vfd.set_cursor(0, 2), Err(DisplayError::InvalidPosition));
    }

    #[test]
    fn test_oversized_geometry_clamped() {
        let (mut vfd, bus) = vfd_sized(200, 9);
        assert_eq!(vfd.dimensions(), (40, 4));
        vfd.set_cursor(39, 3).unwrap();
        assert_eq!(bus.borrow().bytes(0), [(false, 0x80 | 0x7B)]);
        assert_eq!(vfd.set_cursor(40, 0), Err(DisplayError::InvalidPosition));
    }

    #[test]
    fn test_brightness_levels() {
        let (mut vfd, bus) = vfd();
        vfd.set_brightness(Brightness::Quarter).unwrap();
        vfd.set_brightness(Brightness::Full).unwrap();

        assert_eq!(
            bus.borrow().bytes(0),
            [
                (false, cmd::FUNCTION_SET),
                (true, 0x03),
                (false, cmd::FUNCTION_SET),
                (true, 0x00),
            ]
        );
    }

    #[test]
    fn test_power_toggle() {
        let (mut vfd, bus) = vfd();
        vfd.set_power(false).unwrap();
        assert!(!vfd.is_on());
        vfd.set_power(true).unwrap();
        assert_eq!(
            bus.borrow().bytes(0),
            [(false, cmd::DISPLAY_OFF), (false, cmd::DISPLAY_ON)]
        );
    }

    #[test]
    fn test_pin_failure_maps_to_bus_error() {
        let (mut vfd, bus) = vfd();
        bus.borrow_mut().fail = true;
        assert_eq!(vfd.clear(), Err(DisplayError::Bus));
        assert_eq!(vfd.write_str("x"), Err(DisplayError::Bus));
    }
}
