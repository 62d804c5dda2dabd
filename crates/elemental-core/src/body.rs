//! Per-element simulation state and the lock/anchor bookkeeping around it.

use crate::color::Color;
use crate::constants::ANCHOR_MAX_STRENGTH;
use crate::controls::ElementParameters;
use crate::element::Element;
use glam::Vec3;

/// Mutable runtime state of one elemental body.
#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub element: Element,
    pub position: Vec3,
    pub velocity: Vec3,
    pub dragged: bool,
    pub interaction_color: Option<Color>,
    /// Force accumulated on the last step; drives the deformation aura.
    pub net_force: Vec3,
}

impl Body {
    pub fn new(element: Element) -> Self {
        Self {
            element,
            position: element.home_position(),
            velocity: Vec3::ZERO,
            dragged: false,
            interaction_color: None,
            net_force: Vec3::ZERO,
        }
    }

    /// Back to the home coordinate with all motion cleared.
    pub fn reset(&mut self) {
        *self = Body::new(self.element);
    }

    /// Color to render: the interaction override if any, else the base color.
    pub fn display_color(&self) -> Color {
        self.interaction_color
            .unwrap_or_else(|| self.element.base_color())
    }

    /// Vertical bobbing layered on top of the simulated position for display.
    /// Purely visual; never fed back into dynamics.
    pub fn float_offset(&self, params: &ElementParameters, elapsed: f32) -> Vec3 {
        let phase = self.element as usize as f32 * 1.7;
        Vec3::Y * (elapsed * params.float_speed + phase).sin() * params.float_amount
    }
}

/// Which regime governs a body this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BodyMotion {
    Free,
    /// Frozen by the fire/water proximity rule.
    Locked,
    /// Positioned directly by the pointer.
    Dragged,
}

/// Elements whose dynamics are frozen by a rule.
///
/// Only the fire/water pair can be locked, and only together, so the set is
/// a two-state type instead of a general collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LockSet {
    #[default]
    Unlocked,
    FireWater,
}

impl LockSet {
    pub fn contains(self, element: Element) -> bool {
        matches!(
            (self, element),
            (LockSet::FireWater, Element::Fire | Element::Water)
        )
    }

    pub fn members(self) -> &'static [Element] {
        match self {
            LockSet::Unlocked => &[],
            LockSet::FireWater => &[Element::Fire, Element::Water],
        }
    }

    pub fn is_empty(self) -> bool {
        self == LockSet::Unlocked
    }
}

/// User-placed attractor. Strength is clamped to \[0, 10\].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GravityAnchor {
    pub position: Vec3,
    strength: f32,
}

impl GravityAnchor {
    pub fn new(position: Vec3, strength: f32) -> Self {
        let strength = if strength.is_nan() {
            0.0
        } else {
            strength.clamp(0.0, ANCHOR_MAX_STRENGTH)
        };
        Self { position, strength }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn is_active(&self) -> bool {
        self.strength > 0.0
    }
}
