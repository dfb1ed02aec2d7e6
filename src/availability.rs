//! Occupancy to availability-level classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete availability bucket shown on markers and prediction badges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AvailabilityLevel {
    High,
    Medium,
    Low,
}

impl AvailabilityLevel {
    /// Parses the backend's level string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "High" => Some(AvailabilityLevel::High),
            "Medium" => Some(AvailabilityLevel::Medium),
            "Low" => Some(AvailabilityLevel::Low),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AvailabilityLevel::High => "High",
            AvailabilityLevel::Medium => "Medium",
            AvailabilityLevel::Low => "Low",
        }
    }

    /// Legend label, e.g. "High Availability".
    pub fn label(&self) -> &'static str {
        match self {
            AvailabilityLevel::High => "High Availability",
            AvailabilityLevel::Medium => "Medium Availability",
            AvailabilityLevel::Low => "Low Availability",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            AvailabilityLevel::High => Color::HIGH,
            AvailabilityLevel::Medium => Color::MEDIUM,
            AvailabilityLevel::Low => Color::LOW,
        }
    }

    pub const ALL: [AvailabilityLevel; 3] = [
        AvailabilityLevel::High,
        AvailabilityLevel::Medium,
        AvailabilityLevel::Low,
    ];
}

impl fmt::Display for AvailabilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// An sRGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const HIGH: Color = Color::rgb(0x05, 0xA3, 0x57);
    pub const MEDIUM: Color = Color::rgb(0xFF, 0xC0, 0x43);
    pub const LOW: Color = Color::rgb(0xCD, 0x00, 0x00);
    /// Neutral gray for zones without a usable prediction.
    pub const FALLBACK: Color = Color::rgb(0x66, 0x66, 0x66);
    pub const OUTLINE: Color = Color::rgb(0x00, 0x00, 0x00);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#RRGGBB`, upper-case.
    pub fn hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.hex())
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Classification {
    pub level: AvailabilityLevel,
    pub color: Color,
}

/// Maps an occupancy percentage to an availability level.
///
/// | Occupancy      | Level  |
/// |----------------|--------|
/// | < 50           | High   |
/// | 50 ..= 80      | Medium |
/// | > 80           | Low    |
///
/// Input is clamped to `[0, 100]`; NaN counts as 0.
pub fn classify(occupancy_percent: f64) -> Classification {
    let o = if occupancy_percent.is_nan() {
        0.0
    } else {
        occupancy_percent.clamp(0.0, 100.0)
    };

    let level = match o {
        o if o < 50.0 => AvailabilityLevel::High,
        o if o <= 80.0 => AvailabilityLevel::Medium,
        _ => AvailabilityLevel::Low,
    };

    Classification {
        level,
        color: level.color(),
    }
}

/// Color for an optional level, falling back to neutral gray.
pub fn color_for(level: Option<AvailabilityLevel>) -> Color {
    level.map(|l| l.color()).unwrap_or(Color::FALLBACK)
}
