//! Synthetic audio envelope published on its own timer thread, standing in
//! for a live analyser.

use elemental_core::{AudioEnvelope, EnvelopeCell};
use rand::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

pub const ENVELOPE_PERIOD: Duration = Duration::from_millis(50);

/// Slow LFOs per band plus a seeded random walk, so runs are repeatable.
pub struct SyntheticEnvelope {
    rng: StdRng,
    walk: [f32; 3],
    phase: f32,
}

impl SyntheticEnvelope {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            walk: [0.3; 3],
            phase: 0.0,
        }
    }

    pub fn next(&mut self, dt: Duration) -> AudioEnvelope {
        self.phase += dt.as_secs_f32();
        for w in &mut self.walk {
            *w = (*w + self.rng.gen_range(-0.08..0.08)).clamp(0.0, 1.0);
        }
        let lfo = |rate: f32, offset: f32| 0.5 + 0.5 * (self.phase * rate + offset).sin();
        let bass = self.walk[0] * lfo(0.7, 0.0);
        let mid = self.walk[1] * lfo(1.3, 1.0);
        let treble = self.walk[2] * lfo(2.1, 2.0);
        // periodic near-silence
        let gate = if lfo(0.15, 0.0) < 0.1 { 0.0 } else { 1.0 };
        let overall = (bass + mid + treble) / 3.0 * gate;
        AudioEnvelope::new(bass * gate, mid * gate, treble * gate, overall)
    }
}

/// Spawn the publisher. It stops once `stop` is set.
pub fn spawn(
    cell: EnvelopeCell,
    seed: u64,
    stop: Arc<AtomicBool>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("envelope".into())
        .spawn(move || {
            let mut source = SyntheticEnvelope::new(seed);
            while !stop.load(Ordering::Relaxed) {
                cell.publish(source.next(ENVELOPE_PERIOD));
                thread::sleep(ENVELOPE_PERIOD);
            }
            log::debug!("[audio] envelope thread exiting");
        })
}
