//! Visual aura: per-vertex displacement driven by a body's net force.
//!
//! The simulation only contributes the force vector; the shape itself is
//! owned by the renderer, which passes in its reference vertices.

use crate::constants::*;
use crate::element::Element;
use enum_map::Enum;
use glam::Vec3;
use noise::{NoiseFn, Perlin};

pub struct Deformer {
    perlin: Perlin,
    magnitude: f32,
    direction: Vec3,
}

impl Deformer {
    pub fn new(element: Element) -> Self {
        // distinct noise field per element
        let seed = 0x5EED_0000 ^ element.into_usize() as u32;
        Self {
            perlin: Perlin::new(seed),
            magnitude: 0.0,
            direction: Vec3::ZERO,
        }
    }

    /// Blend the latest net force into the smoothed drive.
    pub fn update(&mut self, net_force: Vec3) {
        let target = net_force.length();
        self.magnitude =
            (1.0 - DEFORM_SMOOTHING) * self.magnitude + DEFORM_SMOOTHING * target;
        if let Some(dir) = net_force.try_normalize() {
            self.direction = dir;
        }
    }

    pub fn magnitude(&self) -> f32 {
        self.magnitude
    }

    /// Write displaced copies of `original` into `out`, reusing its allocation.
    ///
    /// Vertices facing along the force bulge more; a Perlin ripple whose
    /// amplitude grows with the force keeps an idle body gently alive.
    pub fn displace(&self, original: &[Vec3], elapsed: f32, out: &mut Vec<Vec3>) {
        out.clear();
        out.reserve(original.len());
        let drive = self.magnitude * DEFORM_GAIN;
        let t = elapsed as f64 * DEFORM_NOISE_SPEED;
        for &v in original {
            let n = v.normalize_or_zero();
            let facing = n.dot(self.direction).max(0.0);
            let bulge = drive * (0.6 + 0.4 * facing);
            let sample = self.perlin.get([
                v.x as f64 * DEFORM_NOISE_SCALE + t,
                v.y as f64 * DEFORM_NOISE_SCALE,
                v.z as f64 * DEFORM_NOISE_SCALE - t,
            ]) as f32;
            let ripple = sample.clamp(-1.0, 1.0) * (DEFORM_NOISE_BASE + drive * 0.5);
            out.push(v + n * (bulge + ripple));
        }
    }
}
