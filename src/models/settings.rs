use serde::{Deserialize, Serialize};

use super::BandCategory;

/// Icon shape used when drawing a marker on the map canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
    Triangle,
}

impl MarkerShape {
    pub const ALL: [Self; 4] = [Self::Circle, Self::Square, Self::Diamond, Self::Triangle];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Circle => "circle",
            Self::Square => "square",
            Self::Diamond => "diamond",
            Self::Triangle => "triangle",
        }
    }

    #[must_use]
    pub fn from_str_opt(token: &str) -> Option<Self> {
        match token {
            "circle" => Some(Self::Circle),
            "square" => Some(Self::Square),
            "diamond" => Some(Self::Diamond),
            "triangle" => Some(Self::Triangle),
            _ => None,
        }
    }
}

/// Display style for one band category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub color: String,
    pub shape: MarkerShape,
    /// Marker half-size in pixels (circle radius; half the side for squares)
    pub size: f64,
}

impl CategoryStyle {
    fn new(color: &str, shape: MarkerShape) -> Self {
        Self {
            color: color.to_string(),
            shape,
            size: 8.0,
        }
    }
}

/// Per-category marker styles, persisted across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyles {
    pub ring: CategoryStyle,
    pub stripe: CategoryStyle,
    pub both: CategoryStyle,
    pub none: CategoryStyle,
}

impl CategoryStyles {
    #[must_use]
    pub const fn get(&self, category: BandCategory) -> &CategoryStyle {
        match category {
            BandCategory::Ring => &self.ring,
            BandCategory::Stripe => &self.stripe,
            BandCategory::Both => &self.both,
            BandCategory::None => &self.none,
        }
    }

    pub fn get_mut(&mut self, category: BandCategory) -> &mut CategoryStyle {
        match category {
            BandCategory::Ring => &mut self.ring,
            BandCategory::Stripe => &mut self.stripe,
            BandCategory::Both => &mut self.both,
            BandCategory::None => &mut self.none,
        }
    }
}

impl Default for CategoryStyles {
    fn default() -> Self {
        Self {
            ring: CategoryStyle::new("#e74c3c", MarkerShape::Circle),
            stripe: CategoryStyle::new("#3498db", MarkerShape::Square),
            both: CategoryStyle::new("#9b59b6", MarkerShape::Diamond),
            none: CategoryStyle::new("#7f8c8d", MarkerShape::Triangle),
        }
    }
}
