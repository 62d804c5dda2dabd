use crate::audio::AudioEnvelope;
use crate::body::{Body, BodyMotion, GravityAnchor, LockSet};
use crate::config::SimConfig;
use crate::controls::{self, EffectiveControl, ManualControl, ParameterSet};
use crate::element::Element;
use crate::input::ray_sphere;
use crate::integrator;
use crate::interaction::{self, Bodies, FrameInputs, LockTransition};
use bytemuck::{Pod, Zeroable};
use enum_map::EnumMap;
use glam::Vec3;
use std::time::Duration;

/// State-change notification for layers that react on their own schedule
/// (decorative animation, sound cues). Emitted into the caller's buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    Locked,
    Unlocked,
    Reset,
    DragStarted(Element),
    DragEnded(Element),
}

pub const FLAG_LOCKED: u32 = 1;
pub const FLAG_DRAGGED: u32 = 1 << 1;

/// Per-body render record, laid out for direct upload as instance data.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct BodyInstance {
    /// Simulated position plus the float bobbing offset.
    pub position: [f32; 3],
    pub brightness: f32,
    pub color: [f32; 4],
    pub force: [f32; 3],
    pub flags: u32,
}

/// The four-body simulation and the inputs that drive it.
///
/// Typical usage:
/// - Construct with `Simulation::new(config)`
/// - Feed sliders with `set_manual`, audio with `set_audio_enabled` and
///   `set_audio`, and the pointer with `begin_drag` / `drag_to` / `end_drag`
/// - Call `tick(dt, &mut events)` every rendered frame
/// - Read `bodies()` or `instances()` for rendering
pub struct Simulation {
    pub config: SimConfig,
    manual: ManualControl,
    effective: EffectiveControl,
    params: ParameterSet,
    audio_enabled: bool,
    audio: AudioEnvelope,
    bodies: Bodies,
    locks: LockSet,
    lock_armed: bool,
    anchor: Option<GravityAnchor>,
    elapsed: f32,
    step_accum: f64,
    frames: u64,
}

impl Simulation {
    pub fn new(config: SimConfig) -> Self {
        let manual = ManualControl::default();
        let effective = EffectiveControl::from_manual(&manual);
        let params = controls::derive_all(&effective);
        let audio_enabled = config.audio_enabled;
        Self {
            config,
            manual,
            effective,
            params,
            audio_enabled,
            audio: AudioEnvelope::SILENT,
            bodies: EnumMap::from_fn(Body::new),
            locks: LockSet::Unlocked,
            lock_armed: true,
            anchor: None,
            elapsed: 0.0,
            step_accum: 0.0,
            frames: 0,
        }
    }

    // ---------------- Inputs ----------------

    pub fn set_manual(&mut self, element: Element, value: f32) {
        self.manual.set(element, value);
        if !self.audio_enabled {
            self.effective = EffectiveControl::from_manual(&self.manual);
            self.params = controls::derive_all(&self.effective);
        }
    }

    pub fn set_audio_enabled(&mut self, enabled: bool) {
        if self.audio_enabled != enabled {
            log::info!("[audio] reactivity {}", if enabled { "on" } else { "off" });
        }
        self.audio_enabled = enabled;
    }

    /// Latest analyser snapshot; read on the next step.
    pub fn set_audio(&mut self, envelope: AudioEnvelope) {
        self.audio = envelope;
    }

    pub fn set_anchor(&mut self, position: Vec3, strength: f32) {
        self.anchor = Some(GravityAnchor::new(position, strength));
    }

    pub fn clear_anchor(&mut self) {
        self.anchor = None;
    }

    /// Teleport a body without touching its velocity.
    pub fn set_position(&mut self, element: Element, position: Vec3) {
        self.bodies[element].position = position;
    }

    /// Nearest body whose pick sphere, centred where the body is drawn, the
    /// ray hits.
    pub fn pick(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<Element> {
        let dir = ray_dir.try_normalize()?;
        let mut best = None::<(Element, f32)>;
        for element in Element::ALL {
            let center = self.display_position(element);
            if let Some(t) = ray_sphere(ray_origin, dir, center, self.config.pick_radius) {
                match best {
                    Some((_, bt)) if t >= bt => {}
                    _ => best = Some((element, t)),
                }
            }
        }
        best.map(|(e, _)| e)
    }

    /// Start direct manipulation; any body already being dragged is released.
    pub fn begin_drag(&mut self, element: Element, out_events: &mut Vec<SimEvent>) {
        if self.bodies[element].dragged {
            return;
        }
        self.end_drag(out_events);
        let body = &mut self.bodies[element];
        body.dragged = true;
        integrator::freeze(body);
        log::info!("[drag] begin {}", element);
        out_events.push(SimEvent::DragStarted(element));
    }

    /// Move the dragged body, if any, to a pointer-plane hit point.
    pub fn drag_to(&mut self, position: Vec3) {
        if let Some(body) = self.bodies.values_mut().find(|b| b.dragged) {
            body.position = position;
        }
    }

    pub fn end_drag(&mut self, out_events: &mut Vec<SimEvent>) {
        for (element, body) in self.bodies.iter_mut() {
            if body.dragged {
                body.dragged = false;
                log::info!("[drag] end {}", element);
                out_events.push(SimEvent::DragEnded(element));
            }
        }
    }

    /// Snap every body home, clear locks and re-seed effective controls from
    /// the sliders. A body held by the pointer goes home too but stays
    /// dragged; only `end_drag` releases it.
    pub fn reset(&mut self, out_events: &mut Vec<SimEvent>) {
        for body in self.bodies.values_mut() {
            let dragged = body.dragged;
            body.reset();
            body.dragged = dragged;
        }
        self.locks = LockSet::Unlocked;
        self.lock_armed = true;
        self.effective = EffectiveControl::from_manual(&self.manual);
        self.params = controls::derive_all(&self.effective);
        log::info!("[sim] reset");
        out_events.push(SimEvent::Reset);
    }

    // ---------------- Stepping ----------------

    /// Advance by wall-clock `dt`, running as many fixed steps as have come
    /// due (at most `max_catchup_steps`). Returns the number of steps run.
    pub fn tick(&mut self, dt: Duration, out_events: &mut Vec<SimEvent>) -> u32 {
        let step = self.config.step_seconds();
        self.step_accum += dt.as_secs_f64();
        let mut steps = 0;
        while self.step_accum >= step && steps < self.config.max_catchup_steps {
            self.step_accum -= step;
            self.step(out_events);
            steps += 1;
        }
        if self.step_accum >= step {
            log::debug!("[sim] dropping {:.3}s of backlog", self.step_accum);
            self.step_accum = 0.0;
        }
        steps
    }

    /// One frame: resolve controls, evaluate lock rules and forces against a
    /// snapshot of every body, then commit all bodies together.
    pub fn step(&mut self, out_events: &mut Vec<SimEvent>) {
        let audio = self.audio_enabled.then_some(self.audio);
        self.effective = controls::resolve(&self.manual, audio.as_ref(), &self.effective);
        self.params = controls::derive_all(&self.effective);

        let snapshot = self.bodies.clone();
        match interaction::apply_lock_rules(&snapshot, &mut self.locks, &mut self.lock_armed) {
            Some(LockTransition::Locked) => {
                log::info!("[lock] fire and water locked");
                out_events.push(SimEvent::Locked);
            }
            Some(LockTransition::Unlocked) => {
                log::info!("[lock] air released fire and water");
                out_events.push(SimEvent::Unlocked);
            }
            None => {}
        }

        let inputs = FrameInputs {
            params: &self.params,
            audio: audio.as_ref(),
            anchor: self.anchor,
            elapsed: self.elapsed,
            interaction_range: self.config.interaction_range,
        };
        let proposals = interaction::propose_all(&snapshot, self.locks, &inputs);
        let dilation = controls::time_dilation(self.effective.get(Element::Earth));

        for (element, body) in self.bodies.iter_mut() {
            if body.dragged || self.locks.contains(element) {
                integrator::freeze(body);
            } else {
                integrator::integrate(body, &proposals[element], dilation, self.config.damping);
            }
            body.interaction_color =
                interaction::interaction_color(element, &snapshot, &self.params, &self.effective);
        }

        self.elapsed += self.config.step_seconds() as f32;
        self.frames += 1;
        if self.frames % 600 == 0 {
            log::debug!(
                "[sim] frame={} dilation={:.3} locks={:?}",
                self.frames,
                dilation,
                self.locks
            );
        }
    }

    // ---------------- Outputs ----------------

    pub fn body(&self, element: Element) -> &Body {
        &self.bodies[element]
    }

    pub fn bodies(&self) -> &Bodies {
        &self.bodies
    }

    pub fn manual(&self) -> &ManualControl {
        &self.manual
    }

    pub fn effective(&self) -> &EffectiveControl {
        &self.effective
    }

    pub fn parameters(&self) -> &ParameterSet {
        &self.params
    }

    pub fn lock_set(&self) -> LockSet {
        self.locks
    }

    pub fn is_locked(&self, element: Element) -> bool {
        self.locks.contains(element)
    }

    pub fn motion(&self, element: Element) -> BodyMotion {
        if self.bodies[element].dragged {
            BodyMotion::Dragged
        } else if self.locks.contains(element) {
            BodyMotion::Locked
        } else {
            BodyMotion::Free
        }
    }

    pub fn anchor(&self) -> Option<GravityAnchor> {
        self.anchor
    }

    pub fn audio_enabled(&self) -> bool {
        self.audio_enabled
    }

    /// Current global slow-motion factor.
    pub fn time_dilation(&self) -> f32 {
        controls::time_dilation(self.effective.get(Element::Earth))
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Simulated position plus the float bobbing offset.
    pub fn display_position(&self, element: Element) -> Vec3 {
        let body = &self.bodies[element];
        body.position + body.float_offset(&self.params[element], self.elapsed)
    }

    /// Render records in `Element` order.
    pub fn instances(&self) -> [BodyInstance; 4] {
        Element::ALL.map(|element| {
            let body = &self.bodies[element];
            let params = &self.params[element];
            let shown = self.display_position(element);
            let mut flags = 0;
            if self.locks.contains(element) {
                flags |= FLAG_LOCKED;
            }
            if body.dragged {
                flags |= FLAG_DRAGGED;
            }
            BodyInstance {
                position: shown.to_array(),
                brightness: params.brightness,
                color: body.display_color().to_rgba(1.0),
                force: body.net_force.to_array(),
                flags,
            }
        })
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}
