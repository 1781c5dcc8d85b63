//! Ambient light to brightness mapping

use crate::config::BrightnessThresholds;
use crate::traits::Brightness;

/// Map a 10-bit ambient reading to a brightness level
///
/// Readings above `dimmest_above` give the dimmest level; readings at or
/// below `bright_above` give full brightness.
pub fn brightness_for(reading: u16, thresholds: &BrightnessThresholds) -> Brightness {
    if reading > thresholds.dimmest_above {
        Brightness::Quarter
    } else if reading > thresholds.dim_above {
        Brightness::Half
    } else if reading > thresholds.bright_above {
        Brightness::ThreeQuarters
    } else {
        Brightness::Full
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tier_boundaries() {
        let t = BrightnessThresholds::default();
        assert_eq!(brightness_for(1023, &t), Brightness::Quarter);
        assert_eq!(brightness_for(801, &t), Brightness::Quarter);
        assert_eq!(brightness_for(800, &t), Brightness::Half);
        assert_eq!(brightness_for(451, &t), Brightness::Half);
        assert_eq!(brightness_for(450, &t), Brightness::ThreeQuarters);
        assert_eq!(brightness_for(201, &t), Brightness::ThreeQuarters);
        assert_eq!(brightness_for(200, &t), Brightness::Full);
        assert_eq!(brightness_for(0, &t), Brightness::Full);
    }

    #[test]
    fn test_custom_thresholds() {
        let t = BrightnessThresholds {
            dimmest_above: 30,
            dim_above: 20,
            bright_above: 10,
        };
        assert!(t.is_ordered());
        assert_eq!(brightness_for(25, &t), Brightness::Half);
        assert_eq!(brightness_for(5, &t), Brightness::Full);
    }
}
