//! Background shading for stat cells.

use serde::Serialize;

/// Magnitude at which a cell reaches full colour.
pub const SATURATION_POINT: f64 = 10.0;

/// An RGBA cell background.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shade {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: f64,
}

impl Shade {
    pub const TRANSPARENT: Shade = Shade {
        red: 255,
        green: 255,
        blue: 255,
        alpha: 0.0,
    };

    /// Green for positive deltas, red for negative, scaled linearly up to
    /// `SATURATION_POINT` and clamped there.
    pub fn for_value(value: f64) -> Self {
        if value > 0.0 {
            Shade {
                red: 0,
                green: 225,
                blue: 0,
                alpha: opacity(value),
            }
        } else if value < 0.0 {
            Shade {
                red: 225,
                green: 0,
                blue: 0,
                alpha: opacity(value),
            }
        } else {
            Shade::TRANSPARENT
        }
    }

    /// CSS `rgba()` value.
    pub fn css(&self) -> String {
        let alpha = (self.alpha * 1000.0).round() / 1000.0;
        format!("rgba({}, {}, {}, {})", self.red, self.green, self.blue, alpha)
    }
}

impl Serialize for Shade {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

/// Opacity in [0, 1] for a delta. NaN maps to 0.
pub fn opacity(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    (value.abs() / SATURATION_POINT).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_endpoints() {
        assert_eq!(opacity(10.0), 1.0);
        assert_eq!(opacity(-10.0), 1.0);
        assert_eq!(opacity(0.0), 0.0);
        assert_eq!(opacity(5.0), 0.5);
    }

    #[test]
    fn test_opacity_is_clamped() {
        assert_eq!(opacity(25.0), 1.0);
        assert_eq!(opacity(-40.0), 1.0);
        assert_eq!(opacity(f64::NAN), 0.0);
    }

    #[test]
    fn test_zero_is_transparent() {
        let shade = Shade::for_value(0.0);
        assert_eq!(shade, Shade::TRANSPARENT);
        assert_eq!(shade.css(), "rgba(255, 255, 255, 0)");
    }

    #[test]
    fn test_positive_is_green() {
        assert_eq!(Shade::for_value(10.0).css(), "rgba(0, 225, 0, 1)");
        assert_eq!(Shade::for_value(2.5).css(), "rgba(0, 225, 0, 0.25)");
    }

    #[test]
    fn test_negative_is_red() {
        assert_eq!(Shade::for_value(-10.0).css(), "rgba(225, 0, 0, 1)");
        assert_eq!(Shade::for_value(-3.5).css(), "rgba(225, 0, 0, 0.35)");
    }

    #[test]
    fn test_nan_is_transparent() {
        assert_eq!(Shade::for_value(f64::NAN), Shade::TRANSPARENT);
    }
}
