//! Interaction engine: per-frame forces, collision response, lock rules and
//! interaction colors for the four bodies.
//!
//! Everything here reads an immutable snapshot of the bodies and writes into
//! a separate [`Proposal`] per element, so the result of a frame does not
//! depend on which body happens to be evaluated first.

use crate::audio::AudioEnvelope;
use crate::body::{Body, GravityAnchor, LockSet};
use crate::color::{self, Color};
use crate::constants::*;
use crate::controls::{EffectiveControl, ParameterSet};
use crate::element::Element;
use enum_map::EnumMap;
use glam::Vec3;

pub type Bodies = EnumMap<Element, Body>;

/// Pending change for one body, applied by the integrator in the commit phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Proposal {
    pub force: Vec3,
    /// Collision impulses, added to velocity alongside the force.
    pub velocity_delta: Vec3,
    /// Product of friction damping and air's velocity boost.
    pub velocity_scale: f32,
    /// Earth only: lerp toward this point instead of integrating forces.
    pub anchor_target: Option<Vec3>,
}

impl Default for Proposal {
    fn default() -> Self {
        Self {
            force: Vec3::ZERO,
            velocity_delta: Vec3::ZERO,
            velocity_scale: 1.0,
            anchor_target: None,
        }
    }
}

/// Read-only inputs shared by every body's force computation.
#[derive(Clone, Copy, Debug)]
pub struct FrameInputs<'a> {
    pub params: &'a ParameterSet,
    /// `None` when audio reactivity is disabled.
    pub audio: Option<&'a AudioEnvelope>,
    pub anchor: Option<GravityAnchor>,
    pub elapsed: f32,
    pub interaction_range: f32,
}

/// Lock state change produced by [`apply_lock_rules`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockTransition {
    Locked,
    Unlocked,
}

/// Evaluate the fire/water lock and the air unlock against the snapshot.
///
/// `armed` is cleared by an unlock and set again once fire and water have
/// separated to at least the lock distance, so bodies that were frozen
/// touching each other do not re-lock the moment they are released.
pub fn apply_lock_rules(
    bodies: &Bodies,
    locks: &mut LockSet,
    armed: &mut bool,
) -> Option<LockTransition> {
    let fire = bodies[Element::Fire].position;
    let water = bodies[Element::Water].position;
    let air = bodies[Element::Air].position;
    let fire_water = fire.distance(water);

    if *locks == LockSet::FireWater {
        if air.distance(fire) < UNLOCK_DISTANCE || air.distance(water) < UNLOCK_DISTANCE {
            *locks = LockSet::Unlocked;
            *armed = false;
            return Some(LockTransition::Unlocked);
        }
        return None;
    }

    if !*armed {
        if fire_water >= LOCK_DISTANCE {
            *armed = true;
        }
        return None;
    }

    if fire_water < LOCK_DISTANCE {
        *locks = LockSet::FireWater;
        return Some(LockTransition::Locked);
    }
    None
}

/// Compute proposals for every free body. Locked and dragged bodies get the
/// default (empty) proposal; the integrator freezes them anyway.
pub fn propose_all(bodies: &Bodies, locks: LockSet, inputs: &FrameInputs) -> EnumMap<Element, Proposal> {
    EnumMap::from_fn(|e| {
        let body = &bodies[e];
        if body.dragged || locks.contains(e) {
            Proposal::default()
        } else {
            propose(body, bodies, inputs)
        }
    })
}

/// Accumulate every force acting on `target` this frame.
pub fn propose(target: &Body, bodies: &Bodies, inputs: &FrameInputs) -> Proposal {
    let mut p = Proposal::default();

    if let Some(anchor) = inputs.anchor.filter(GravityAnchor::is_active) {
        if target.element == Element::Earth {
            p.anchor_target = Some(anchor.position);
            return p;
        }
        let to_anchor = anchor.position - target.position;
        let dist = to_anchor.length();
        let audio_mult = inputs.audio.map_or(1.0, AudioEnvelope::gravity_multiplier);
        p.force += to_anchor.normalize_or_zero()
            * anchor.strength()
            * (-ANCHOR_FALLOFF * dist).exp()
            * audio_mult
            * ANCHOR_FORCE_GAIN;
    }

    if let Some(wind) = inputs.params[Element::Air].wind {
        if wind.strength > 0.0 {
            p.force += wind.direction
                * wind.strength
                * target.element.wind_susceptibility()
                * WIND_GAIN;
        }
    }

    for (element, source) in bodies.iter() {
        if element == target.element {
            continue;
        }
        let dist = target.position.distance(source.position);
        if dist >= inputs.interaction_range {
            continue;
        }
        collide(target, source, dist, &mut p);
        source_effect(target, source, dist, bodies, inputs, &mut p);
    }

    p.force += boundary_force(target.position);
    p
}

/// Mass- and elasticity-weighted separation push plus friction damping.
fn collide(target: &Body, other: &Body, dist: f32, p: &mut Proposal) {
    let min_dist = target.element.min_distance();
    if dist >= min_dist {
        return;
    }
    let me = target.element.physical();
    let them = other.element.physical();
    let normal = (target.position - other.position)
        .try_normalize()
        .unwrap_or(Vec3::Y);
    let share = them.mass / (me.mass + them.mass);
    let overlap = min_dist - dist;

    p.force += normal * overlap * COLLISION_PUSH * share * me.elasticity;

    let approach = (target.velocity - other.velocity).dot(normal);
    if approach < 0.0 {
        p.velocity_delta -= normal * approach * (1.0 + me.elasticity) * share * COLLISION_IMPULSE;
    }
    p.velocity_scale *= 1.0 - me.friction * FRICTION_DAMPING;
}

/// Directional effect of `source` on `target`, keyed by the element pair.
fn source_effect(
    target: &Body,
    source: &Body,
    dist: f32,
    bodies: &Bodies,
    inputs: &FrameInputs,
    p: &mut Proposal,
) {
    let params = &inputs.params[source.element];
    let away = (target.position - source.position).normalize_or_zero();
    let linear = dist.max(MIN_LINEAR_DISTANCE);
    let squared = (dist * dist).max(MIN_SQUARED_DISTANCE);

    match (source.element, target.element) {
        (Element::Fire, Element::Earth | Element::Water) => {
            let strength = params.repel_strength * fire_quench(bodies);
            if strength > 0.0 {
                let alignment = away.dot(fire_push_axis()).max(0.0);
                p.force += away * strength * FIRE_PUSH_GAIN * (1.0 + alignment) / linear;
            }
        }
        (Element::Fire, Element::Air) => {
            let strength = params.repel_strength * fire_quench(bodies);
            if strength > 0.0 {
                let rel = target.position - source.position;
                let lateral = Vec3::new(rel.x, 0.0, rel.z).length();
                if rel.y > lateral {
                    p.force.y += strength * FIRE_UPDRAFT_GAIN / linear;
                } else {
                    p.force -= away * strength * FIRE_SUCTION_GAIN / linear;
                }
            }
        }
        (Element::Water, Element::Air | Element::Earth) if params.attract_strength > 0.0 => {
            let toward = -away;
            let flow = water_flow_dir();
            let alignment = toward.dot(flow).max(0.0);
            let dir = (toward * (1.0 - WATER_FLOW_BLEND) + flow * WATER_FLOW_BLEND).normalize_or_zero();
            p.force += dir * params.attract_strength * WATER_ATTRACT_GAIN * (1.0 + alignment);
        }
        (Element::Earth, Element::Fire | Element::Water | Element::Air)
            if params.attract_strength > 0.0 =>
        {
            let mut pull = source.position - target.position;
            pull.y -= EARTH_DOWN_BIAS;
            p.force += pull.normalize_or_zero() * params.attract_strength * EARTH_ATTRACT_GAIN / squared;
        }
        (Element::Air, _) if params.repel_strength > 0.0 => {
            let t = inputs.elapsed;
            let pos = target.position;
            let turbulence = Vec3::new(
                (t * AIR_TURBULENCE_FREQ.x + pos.x).sin(),
                (t * AIR_TURBULENCE_FREQ.y + pos.y).sin(),
                (t * AIR_TURBULENCE_FREQ.z + pos.z).sin(),
            ) * AIR_TURBULENCE_AMOUNT;
            p.force += (away + turbulence) * params.repel_strength * AIR_REPEL_GAIN / linear;
            p.force.y += params.repel_strength * AIR_LIFT;
            p.velocity_scale *= 1.0 + params.repel_strength * AIR_VELOCITY_BOOST;
        }
        _ => {}
    }

    // water and earth below the midpoint push everything away radially
    if matches!(source.element, Element::Water | Element::Earth) && params.repel_strength > 0.0 {
        p.force += away * params.repel_strength * RADIAL_REPEL_GAIN / squared;
    }
}

/// Fraction of fire's strength left given its distance to water: zero
/// inside the fade start, one beyond the fade end, linear in between.
pub fn fire_quench(bodies: &Bodies) -> f32 {
    let d = bodies[Element::Fire]
        .position
        .distance(bodies[Element::Water].position);
    ((d - FIRE_FADE_START) / (FIRE_FADE_END - FIRE_FADE_START)).clamp(0.0, 1.0)
}

/// Inward containment: steep beyond the outer radius, gentle beyond the
/// inner one. The two terms add.
pub fn boundary_force(position: Vec3) -> Vec3 {
    let dist = position.length();
    let inward = -position.normalize_or_zero();
    let mut force = Vec3::ZERO;
    if dist > BOUNDARY_OUTER_RADIUS {
        let excess = dist - BOUNDARY_OUTER_RADIUS;
        force += inward * excess.powf(BOUNDARY_OUTER_EXPONENT) * BOUNDARY_OUTER_GAIN;
    }
    if dist > BOUNDARY_INNER_RADIUS {
        force += inward * (dist - BOUNDARY_INNER_RADIUS) * BOUNDARY_INNER_GAIN;
    }
    force
}

/// Proximity-driven color override for `element`, or `None` for its base color.
pub fn interaction_color(
    element: Element,
    bodies: &Bodies,
    params: &ParameterSet,
    effective: &EffectiveControl,
) -> Option<Color> {
    let near = |other: Element| {
        bodies[element].position.distance(bodies[other].position) < COLOR_DISTANCE
    };
    match element {
        Element::Fire if near(Element::Water) => {
            let t = effective.get(Element::Water);
            Some(if t < 0.5 {
                color::FIRE_RED.lerp(color::FIRE_YELLOW, t * 2.0)
            } else {
                color::FIRE_YELLOW.lerp(color::FIRE_LIGHT_GREEN, (t - 0.5) * 2.0)
            })
        }
        Element::Water if near(Element::Air) => {
            let t = params[Element::Air].repel_strength;
            Some(color::WATER_AQUA.lerp(color::WATER_DEEP_BLUE, t))
        }
        Element::Earth if near(Element::Fire) => Some(color::EARTH_GOLD),
        Element::Earth if near(Element::Air) => Some(color::EARTH_GREEN),
        Element::Earth if near(Element::Water) => Some(color::EARTH_NEON_AQUA),
        _ => None,
    }
}
