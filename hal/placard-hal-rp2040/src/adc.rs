//! Ambient light sensor on an ADC channel
//!
//! RP2040 ADC inputs:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29
//!
//! The ADC is 12-bit; readings are scaled down to the 10-bit range the
//! brightness thresholds are written for.

use embassy_rp::adc::{Adc, Blocking, Channel};
use placard_core::traits::LightSensor;

/// Convert a 12-bit sample to the 10-bit scale
pub const fn to_10bit(sample: u16) -> u16 {
    (sample & 0x0FFF) >> 2
}

/// Light-dependent resistor divider on one ADC channel
pub struct AmbientLight<'d> {
    adc: Adc<'d, Blocking>,
    channel: Channel<'d>,
    last: u16,
}

impl<'d> AmbientLight<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channel: Channel<'d>) -> Self {
        Self {
            adc,
            channel,
            last: 0,
        }
    }
}

impl<'d> LightSensor for AmbientLight<'d> {
    /// A failed conversion repeats the previous reading
    fn read(&mut self) -> u16 {
        match self.adc.blocking_read(&mut self.channel) {
            Ok(sample) => self.last = to_10bit(sample),
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("ambient light read failed: {}", _e);
            }
        }
        self.last
    }
}
