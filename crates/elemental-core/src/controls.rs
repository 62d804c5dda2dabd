//! Control resolver: merges manual sliders with the audio envelope into
//! effective per-element intensities, then expands those into the
//! parameter sets that drive every force in the interaction engine.

use crate::audio::{clamp01, AudioEnvelope};
use crate::constants::*;
use crate::element::Element;
use enum_map::EnumMap;
use glam::Vec3;

/// User-set slider values, one per element, each in \[0, 1\].
///
/// Defaults to the neutral midpoint, where every derived strength is zero.
#[derive(Clone, Debug, PartialEq)]
pub struct ManualControl {
    values: EnumMap<Element, f32>,
}

impl Default for ManualControl {
    fn default() -> Self {
        Self::uniform(NEUTRAL)
    }
}

impl ManualControl {
    pub fn uniform(value: f32) -> Self {
        let v = clamp01(value);
        Self {
            values: EnumMap::from_fn(|_| v),
        }
    }

    pub fn get(&self, element: Element) -> f32 {
        self.values[element]
    }

    /// Out-of-range input is a normal transient while a slider is dragged,
    /// so it is clamped rather than rejected.
    pub fn set(&mut self, element: Element, value: f32) {
        self.values[element] = clamp01(value);
    }

    pub fn values(&self) -> &EnumMap<Element, f32> {
        &self.values
    }
}

/// Per-frame intensity after audio is folded in, each in \[0, 1\].
#[derive(Clone, Debug, PartialEq)]
pub struct EffectiveControl {
    values: EnumMap<Element, f32>,
}

impl EffectiveControl {
    pub fn from_manual(manual: &ManualControl) -> Self {
        Self {
            values: manual.values.clone(),
        }
    }

    pub fn get(&self, element: Element) -> f32 {
        self.values[element]
    }

    pub fn values(&self) -> &EnumMap<Element, f32> {
        &self.values
    }
}

/// Audio band feeding an element and the gain applied to it.
fn band_for(element: Element, audio: &AudioEnvelope) -> (f32, f32) {
    match element {
        Element::Earth => (audio.bass, EARTH_BASS_GAIN),
        Element::Water => (audio.mid, WATER_MID_GAIN),
        Element::Fire => (audio.treble, FIRE_TREBLE_GAIN),
        Element::Air => (audio.treble + AIR_OVERALL_BLEND * audio.overall, AIR_BAND_GAIN),
    }
}

/// Resolve this frame's effective control.
///
/// `audio` is `None` when audio reactivity is disabled, in which case the
/// result is exactly `manual`. With live audio the band energy is added as
/// an offset on top of the manual baseline; with quiet audio the previous
/// effective value decays geometrically but never below the baseline.
pub fn resolve(
    manual: &ManualControl,
    audio: Option<&AudioEnvelope>,
    previous: &EffectiveControl,
) -> EffectiveControl {
    let Some(audio) = audio else {
        return EffectiveControl::from_manual(manual);
    };
    let values = if audio.overall > AUDIO_ACTIVE_THRESHOLD {
        EnumMap::from_fn(|e| {
            let (band, gain) = band_for(e, audio);
            clamp01(manual.get(e) + band * gain)
        })
    } else {
        EnumMap::from_fn(|e| {
            let baseline = manual.get(e);
            (previous.get(e) * QUIET_DECAY).max(baseline)
        })
    };
    EffectiveControl { values }
}

/// Air's wind: a unit direction plus a non-negative magnitude.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wind {
    pub strength: f32,
    pub direction: Vec3,
}

/// Everything the interaction engine needs to know about one element this
/// frame. Repel and attract are mutually exclusive: at most one is non-zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ElementParameters {
    pub repel_strength: f32,
    pub attract_strength: f32,
    pub float_speed: f32,
    pub float_amount: f32,
    pub brightness: f32,
    /// Present for air only.
    pub wind: Option<Wind>,
}

impl ElementParameters {
    pub fn derive(element: Element, effective: f32) -> Self {
        let e = clamp01(effective);
        let below = (NEUTRAL - e).max(0.0) * 2.0;
        let above = (e - NEUTRAL).max(0.0) * 2.0;
        let k = below + above;

        let (repel_strength, attract_strength) = match element {
            Element::Air | Element::Fire => (k, 0.0),
            Element::Water | Element::Earth => (below, above),
        };
        let wind = match element {
            Element::Air => {
                let side = if e >= NEUTRAL { 1.0 } else { -1.0 };
                Some(Wind {
                    strength: k * WIND_STRENGTH_SCALE,
                    direction: Vec3::new(side, WIND_TILT, 0.0).normalize(),
                })
            }
            _ => None,
        };

        Self {
            repel_strength,
            attract_strength,
            float_speed: FLOAT_SPEED_BASE + FLOAT_SPEED_SPAN * k,
            float_amount: FLOAT_AMOUNT_BASE + FLOAT_AMOUNT_SPAN * k,
            brightness: BRIGHTNESS_BASE + BRIGHTNESS_SPAN * k,
            wind,
        }
    }

    /// Wind strength, zero for every element but air.
    pub fn wind_strength(&self) -> f32 {
        self.wind.map_or(0.0, |w| w.strength)
    }
}

pub type ParameterSet = EnumMap<Element, ElementParameters>;

pub fn derive_all(effective: &EffectiveControl) -> ParameterSet {
    EnumMap::from_fn(|e| ElementParameters::derive(e, effective.get(e)))
}

/// Global slow-motion factor keyed off earth's effective value.
///
/// 1.0 at or above the midpoint, falling to `0.1^0.8 ≈ 0.158` at zero, not
/// to 0.1: the 0.8 exponent keeps the floor above the nominal 0.1 bound.
pub fn time_dilation(earth_effective: f32) -> f32 {
    let e = clamp01(earth_effective);
    if e >= NEUTRAL {
        return 1.0;
    }
    let depth = (NEUTRAL - e) * 2.0;
    TIME_DILATION_BASE.powf(depth * TIME_DILATION_EXPONENT)
}
