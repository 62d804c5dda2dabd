use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use elemental_core::{Deformer, Element, EnvelopeCell, SimConfig, SimEvent, Simulation};
use instant::Instant;

mod cli;
mod envelope;

const FRAME_PERIOD: Duration = Duration::from_micros(16_667);

fn load_config(args: &cli::Args) -> anyhow::Result<SimConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => SimConfig::default(),
    };
    if args.audio {
        cfg.audio_enabled = true;
    }
    Ok(cfg)
}

fn build_simulation(args: &cli::Args, cfg: SimConfig) -> Simulation {
    let mut sim = Simulation::new(cfg);
    for (element, value) in [
        (Element::Air, args.air),
        (Element::Water, args.water),
        (Element::Fire, args.fire),
        (Element::Earth, args.earth),
    ] {
        sim.set_manual(element, value);
    }
    if let Some(anchor) = args.anchor {
        sim.set_anchor(anchor, args.anchor_strength);
        log::info!(
            "[anchor] ({:.2},{:.2},{:.2}) strength={:.2}",
            anchor.x,
            anchor.y,
            anchor.z,
            args.anchor_strength
        );
    }
    sim
}

fn report(sim: &Simulation, auras: &[Deformer; 4]) {
    for (aura, (element, body)) in auras.iter().zip(sim.bodies().iter()) {
        log::info!(
            "[{:>5}] pos=({:6.2},{:6.2},{:6.2}) |v|={:.3} |f|={:.4} aura={:.4} eff={:.2} {:?}",
            element,
            body.position.x,
            body.position.y,
            body.position.z,
            body.velocity.length(),
            body.net_force.length(),
            aura.magnitude(),
            sim.effective().get(element),
            sim.motion(element),
        );
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = cli::Args::parse();
    let cfg = load_config(&args)?;
    let mut sim = build_simulation(&args, cfg);
    log::info!(
        "elemental-native starting: frames={} audio={} step={:.1}Hz",
        args.frames,
        sim.audio_enabled(),
        sim.config.fixed_step_hz
    );

    let cell = EnvelopeCell::new();
    let stop = Arc::new(AtomicBool::new(false));
    let envelope_thread = if sim.audio_enabled() {
        Some(envelope::spawn(cell.clone(), args.seed, stop.clone()).context("spawning envelope thread")?)
    } else {
        None
    };

    let mut auras = Element::ALL.map(Deformer::new);
    let mut events = Vec::new();
    let mut last = Instant::now();
    let mut frame: u64 = 0;
    while args.frames == 0 || frame < args.frames {
        let now = Instant::now();
        let dt = now - last;
        last = now;

        sim.set_audio(cell.snapshot());
        sim.tick(dt, &mut events);
        for (aura, element) in auras.iter_mut().zip(Element::ALL) {
            aura.update(sim.body(element).net_force);
        }
        for ev in events.drain(..) {
            match ev {
                SimEvent::Locked | SimEvent::Unlocked => {
                    log::info!("[event] {:?} at frame {}", ev, sim.frames())
                }
                other => log::debug!("[event] {:?}", other),
            }
        }

        frame += 1;
        if args.report_every > 0 && frame % args.report_every == 0 {
            report(&sim, &auras);
        }

        let spent = now.elapsed();
        if spent < FRAME_PERIOD {
            thread::sleep(FRAME_PERIOD - spent);
        }
    }

    stop.store(true, Ordering::Relaxed);
    if let Some(handle) = envelope_thread {
        if handle.join().is_err() {
            log::error!("envelope thread panicked");
        }
    }
    report(&sim, &auras);
    log::info!("elemental-native done after {} simulation steps", sim.frames());
    Ok(())
}
