//! The four elemental bodies and their fixed physical and visual traits.

use crate::color::Color;
use crate::constants::{HOME_POSITIONS, WATER_MIN_DISTANCE, DEFAULT_MIN_DISTANCE};
use enum_map::Enum;
use glam::Vec3;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the four simulated bodies. The set is closed: every per-element
/// table in the crate is an `EnumMap<Element, _>` so a missing entry is a
/// compile error rather than a runtime lookup miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Enum)]
pub enum Element {
    Air,
    Water,
    Fire,
    Earth,
}

/// Mass, elasticity and friction used by collision response.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalProps {
    pub mass: f32,
    pub elasticity: f32,
    pub friction: f32,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown element `{0}` (expected air, water, fire or earth)")]
pub struct ParseElementError(pub String);

impl Element {
    pub const ALL: [Element; 4] = [Element::Air, Element::Water, Element::Fire, Element::Earth];

    pub fn name(self) -> &'static str {
        match self {
            Element::Air => "air",
            Element::Water => "water",
            Element::Fire => "fire",
            Element::Earth => "earth",
        }
    }

    /// Fixed startup and reset coordinate.
    pub fn home_position(self) -> Vec3 {
        Vec3::from(HOME_POSITIONS[self.into_usize()])
    }

    pub fn physical(self) -> PhysicalProps {
        match self {
            Element::Air => PhysicalProps {
                mass: 0.1,
                elasticity: 0.9,
                friction: 0.05,
            },
            Element::Water => PhysicalProps {
                mass: 0.5,
                elasticity: 0.8,
                friction: 0.9,
            },
            Element::Fire => PhysicalProps {
                mass: 0.3,
                elasticity: 1.0,
                friction: 0.05,
            },
            Element::Earth => PhysicalProps {
                mass: 0.9,
                elasticity: 0.2,
                friction: 0.8,
            },
        }
    }

    /// Separation below which this body starts colliding with a neighbour.
    pub fn min_distance(self) -> f32 {
        match self {
            Element::Water => WATER_MIN_DISTANCE,
            _ => DEFAULT_MIN_DISTANCE,
        }
    }

    /// How strongly air's wind moves this body.
    pub fn wind_susceptibility(self) -> f32 {
        match self {
            Element::Air => 2.0,
            Element::Fire => 1.5,
            Element::Water => 0.3,
            Element::Earth => 0.1,
        }
    }

    /// Elemental color shown when no interaction overrides it.
    pub fn base_color(self) -> Color {
        match self {
            Element::Air => Color::new(0.85, 0.9, 1.0),
            Element::Water => Color::new(0.2, 0.5, 1.0),
            Element::Fire => Color::new(1.0, 0.35, 0.1),
            Element::Earth => Color::new(0.45, 0.3, 0.15),
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for Element {
    type Err = ParseElementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Element::ALL
            .into_iter()
            .find(|e| e.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseElementError(s.to_string()))
    }
}
