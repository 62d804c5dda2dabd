//! Four-band audio envelope contract and a tear-free shared snapshot cell.
//!
//! The analyser that produces the envelope (FFT, WebAudio `AnalyserNode`,
//! a synthetic LFO) lives outside this crate. It publishes into an
//! [`EnvelopeCell`] on its own timer; the frame loop reads the latest value.

use crate::constants::AUDIO_GRAVITY_GAIN;
use std::sync::{Arc, Mutex};

/// Latest analyser output. All fields are in \[0, 1\].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AudioEnvelope {
    pub bass: f32,
    pub mid: f32,
    pub treble: f32,
    pub overall: f32,
}

impl AudioEnvelope {
    pub fn new(bass: f32, mid: f32, treble: f32, overall: f32) -> Self {
        Self {
            bass: clamp01(bass),
            mid: clamp01(mid),
            treble: clamp01(treble),
            overall: clamp01(overall),
        }
    }

    pub const SILENT: AudioEnvelope = AudioEnvelope {
        bass: 0.0,
        mid: 0.0,
        treble: 0.0,
        overall: 0.0,
    };

    /// Fold analyser magnitude bins (decibels, roughly -100..0) into bands.
    ///
    /// Bins are split into low/mid/high thirds; each band is the mean of
    /// `(db + 100) / 100` clamped to \[0, 1\]. `overall` averages every bin.
    pub fn from_spectrum(db_bins: &[f32]) -> Self {
        if db_bins.is_empty() {
            return Self::SILENT;
        }
        let lin = |v: &f32| ((v + 100.0) / 100.0).clamp(0.0, 1.0);
        let mean = |bins: &[f32]| {
            if bins.is_empty() {
                0.0
            } else {
                bins.iter().map(lin).sum::<f32>() / bins.len() as f32
            }
        };
        let third = db_bins.len().div_ceil(3);
        let (low, rest) = db_bins.split_at(third.min(db_bins.len()));
        let (mid, high) = rest.split_at(third.min(rest.len()));
        Self::new(mean(low), mean(mid), mean(high), mean(db_bins))
    }

    /// Gravity boost applied to anchor pull while audio is live.
    pub fn gravity_multiplier(&self) -> f32 {
        1.0 + (self.treble + self.overall) * AUDIO_GRAVITY_GAIN
    }
}

/// Cloneable handle to the most recent envelope.
///
/// `publish` replaces the whole struct under the lock and `snapshot` copies
/// it out, so readers never observe bands from two different analyser runs.
#[derive(Clone, Debug, Default)]
pub struct EnvelopeCell {
    inner: Arc<Mutex<AudioEnvelope>>,
}

impl EnvelopeCell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn publish(&self, envelope: AudioEnvelope) {
        match self.inner.lock() {
            Ok(mut guard) => *guard = envelope,
            Err(poisoned) => *poisoned.into_inner() = envelope,
        }
    }

    pub fn snapshot(&self) -> AudioEnvelope {
        match self.inner.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

#[inline]
pub fn clamp01(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
