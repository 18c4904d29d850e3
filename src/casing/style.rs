use crate::error::{GeometryError, Result};
use crate::paint::Color;

/// Rendering parameters shared by every casing of a set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CasingStyle {
    width: f64,
    gap: f64,
    shadow: f64,
    base_color: Color,
}

impl CasingStyle {
    /// Creates a new casing style.
    ///
    /// `width` is the distance from the centreline to either boundary, `gap`
    /// the length cut from Under sides at a crossing and `shadow` the length
    /// of the projected shadow.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::InvalidParameter` if `width` is not positive,
    /// or `gap`/`shadow` is negative or not finite.
    pub fn new(width: f64, gap: f64, shadow: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(GeometryError::InvalidParameter {
                parameter: "width",
                value: width,
                reason: "must be positive",
            }
            .into());
        }
        for (parameter, value) in [("gap", gap), ("shadow", shadow)] {
            if !value.is_finite() || value < 0.0 {
                return Err(GeometryError::InvalidParameter {
                    parameter,
                    value,
                    reason: "must be finite and non-negative",
                }
                .into());
            }
        }
        Ok(Self {
            width,
            gap,
            shadow,
            base_color: Color::BLACK,
        })
    }

    /// Sets the colour of casings that neither a thread nor an override colours.
    #[must_use]
    pub fn with_base_color(mut self, color: Color) -> Self {
        self.base_color = color;
        self
    }

    /// Returns the ribbon half-width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn gap(&self) -> f64 {
        self.gap
    }

    #[must_use]
    pub fn shadow(&self) -> f64 {
        self.shadow
    }

    #[must_use]
    pub fn base_color(&self) -> Color {
        self.base_color
    }
}

impl Default for CasingStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            gap: 0.0,
            shadow: 0.0,
            base_color: Color::BLACK,
        }
    }
}
