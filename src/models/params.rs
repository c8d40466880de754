use std::fmt;

use crate::error::AppError;

/// Defines a newtype that can only hold a value inside `MIN..=MAX`.
macro_rules! ranged {
    ($(#[$meta:meta])* $name:ident($inner:ty), $min:expr, $max:expr, $what:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name($inner);

        impl $name {
            pub const MIN: $inner = $min;
            pub const MAX: $inner = $max;

            pub fn get(self) -> $inner {
                self.0
            }
        }

        impl TryFrom<i64> for $name {
            type Error = AppError;

            fn try_from(value: i64) -> Result<Self, Self::Error> {
                if value < i64::from(Self::MIN) || value > i64::from(Self::MAX) {
                    return Err(AppError::InvalidInput(format!(
                        "Invalid {}: {} (must be between {} and {})",
                        $what,
                        value,
                        Self::MIN,
                        Self::MAX
                    )));
                }
                Ok(Self(value as $inner))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

ranged!(
    /// Brightness in percent.
    Brightness(u8), 1, 100, "brightness"
);
ranged!(
    /// Color temperature in Kelvin.
    ColorTemp(u16), 2500, 6500, "color temperature"
);
ranged!(
    /// Hue in degrees.
    Hue(u16), 0, 360, "hue"
);
ranged!(
    /// Saturation in percent.
    Saturation(u8), 0, 100, "saturation"
);
