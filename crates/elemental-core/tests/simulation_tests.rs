// Frame-level behaviour of the full simulation: locks, reset, drag,
// containment, anchor and the fixed-step clock.

use elemental_core::{
    AudioEnvelope, BodyMotion, Element, LockSet, SimConfig, SimEvent, Simulation,
};
use elemental_core::input::ray_sphere;
use glam::Vec3;
use std::time::Duration;

fn make_sim() -> Simulation {
    Simulation::new(SimConfig::default())
}

/// Vertices of a tetrahedron with every edge longer than the interaction
/// range while staying inside the inner boundary radius.
fn spread_out(sim: &mut Simulation) {
    let r = 9.5 / 3.0_f32.sqrt();
    sim.set_position(Element::Air, Vec3::new(r, r, r));
    sim.set_position(Element::Water, Vec3::new(r, -r, -r));
    sim.set_position(Element::Fire, Vec3::new(-r, r, -r));
    sim.set_position(Element::Earth, Vec3::new(-r, -r, r));
}

fn place_fire_next_to_water(sim: &mut Simulation) {
    let water = sim.body(Element::Water).position;
    sim.set_position(Element::Fire, water + Vec3::new(-1.0, 0.0, 0.0));
}

#[test]
fn bodies_start_at_home() {
    let sim = make_sim();
    for e in Element::ALL {
        let b = sim.body(e);
        assert_eq!(b.position, e.home_position());
        assert_eq!(b.velocity, Vec3::ZERO);
        assert_eq!(sim.motion(e), BodyMotion::Free);
    }
    assert!(sim.lock_set().is_empty());
}

#[test]
fn neutral_sliders_leave_bodies_at_rest() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.step(&mut events);
    for e in Element::ALL {
        let b = sim.body(e);
        assert_eq!(b.velocity, Vec3::ZERO, "{e} moved");
        assert_eq!(b.position, e.home_position(), "{e} moved");
        assert_eq!(b.net_force, Vec3::ZERO);
    }
    assert!(events.is_empty());
}

#[test]
fn fire_near_water_locks_both() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    assert_eq!(sim.lock_set(), LockSet::FireWater);
    assert!(sim.is_locked(Element::Fire) && sim.is_locked(Element::Water));
    assert!(!sim.is_locked(Element::Air) && !sim.is_locked(Element::Earth));
    assert_eq!(events, vec![SimEvent::Locked]);
    assert_eq!(sim.body(Element::Fire).velocity, Vec3::ZERO);
    assert_eq!(sim.body(Element::Water).net_force, Vec3::ZERO);
}

#[test]
fn lock_is_idempotent() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    for _ in 0..5 {
        place_fire_next_to_water(&mut sim);
        sim.step(&mut events);
        assert_eq!(sim.lock_set().members(), &[Element::Fire, Element::Water]);
    }
    assert_eq!(events, vec![SimEvent::Locked]);
}

#[test]
fn locked_bodies_keep_their_position() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_manual(Element::Earth, 1.0);
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    let fire = sim.body(Element::Fire).position;
    let water = sim.body(Element::Water).position;
    for _ in 0..30 {
        sim.step(&mut events);
    }
    assert_eq!(sim.body(Element::Fire).position, fire);
    assert_eq!(sim.body(Element::Water).position, water);
}

#[test]
fn air_near_lock_releases_and_does_not_relock() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    assert_eq!(sim.lock_set(), LockSet::FireWater);

    let fire = sim.body(Element::Fire).position;
    sim.set_position(Element::Air, fire + Vec3::new(0.0, 2.5, 0.0));
    sim.step(&mut events);
    assert!(sim.lock_set().is_empty());
    assert_eq!(events.last(), Some(&SimEvent::Unlocked));

    sim.set_position(Element::Air, Vec3::new(-8.0, 6.0, 0.0));
    for _ in 0..60 {
        sim.step(&mut events);
        assert!(sim.lock_set().is_empty());
    }
}

#[test]
fn fresh_approach_relocks_after_release() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    let fire = sim.body(Element::Fire).position;
    sim.set_position(Element::Air, fire + Vec3::new(0.0, 2.5, 0.0));
    sim.step(&mut events);
    sim.set_position(Element::Air, Vec3::new(-8.0, 6.0, 0.0));

    // separate, then approach again
    sim.set_position(Element::Fire, Vec3::new(-4.0, -1.0, -2.0));
    sim.step(&mut events);
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    assert_eq!(sim.lock_set(), LockSet::FireWater);
}

#[test]
fn reset_restores_home_and_clears_locks() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_manual(Element::Air, 0.9);
    place_fire_next_to_water(&mut sim);
    for _ in 0..20 {
        sim.step(&mut events);
    }
    assert_eq!(sim.lock_set(), LockSet::FireWater);
    assert_ne!(sim.body(Element::Air).position, Element::Air.home_position());

    sim.reset(&mut events);
    assert!(sim.lock_set().is_empty());
    for e in Element::ALL {
        assert_eq!(sim.body(e).position, e.home_position());
        assert_eq!(sim.body(e).velocity, Vec3::ZERO);
    }
    assert_eq!(events.last(), Some(&SimEvent::Reset));
}

#[test]
fn far_body_is_pulled_toward_origin() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_position(Element::Fire, Vec3::new(30.0, 0.0, 0.0));
    sim.step(&mut events);
    let p = sim.body(Element::Fire).position;
    assert!(p.length() < 30.0);
    assert!(p.x < 30.0);
    assert!(sim.body(Element::Fire).net_force.x < 0.0);
}

#[test]
fn body_between_radii_gets_gentle_inward_force() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_position(Element::Earth, Vec3::new(0.0, -15.0, 0.0));
    sim.step(&mut events);
    let f = sim.body(Element::Earth).net_force;
    assert!((f.y - 5.0 * 0.001).abs() < 1e-6, "unexpected force {f:?}");
}

#[test]
fn dragged_body_follows_pointer_with_no_dynamics() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_manual(Element::Air, 1.0);
    sim.begin_drag(Element::Fire, &mut events);
    assert_eq!(sim.motion(Element::Fire), BodyMotion::Dragged);
    let target = Vec3::new(1.0, 2.0, 3.0);
    sim.drag_to(target);
    for _ in 0..5 {
        sim.step(&mut events);
    }
    let fire = sim.body(Element::Fire);
    assert_eq!(fire.position, target);
    assert_eq!(fire.velocity, Vec3::ZERO);
    assert_eq!(fire.net_force, Vec3::ZERO);

    sim.end_drag(&mut events);
    assert_eq!(sim.motion(Element::Fire), BodyMotion::Free);
    assert_eq!(
        events,
        vec![SimEvent::DragStarted(Element::Fire), SimEvent::DragEnded(Element::Fire)]
    );
}

#[test]
fn reset_mid_drag_sends_body_home_but_keeps_it_held() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.begin_drag(Element::Fire, &mut events);
    sim.drag_to(Vec3::new(1.0, 1.0, 1.0));
    events.clear();

    sim.reset(&mut events);
    assert_eq!(events, vec![SimEvent::Reset]);
    assert_eq!(sim.motion(Element::Fire), BodyMotion::Dragged);
    assert_eq!(sim.body(Element::Fire).position, Element::Fire.home_position());

    sim.step(&mut events);
    assert_eq!(sim.body(Element::Fire).position, Element::Fire.home_position());

    let target = Vec3::new(-2.0, 0.5, 1.0);
    sim.drag_to(target);
    assert_eq!(sim.body(Element::Fire).position, target);

    sim.end_drag(&mut events);
    assert_eq!(
        events,
        vec![SimEvent::Reset, SimEvent::DragEnded(Element::Fire)]
    );
    assert_eq!(sim.motion(Element::Fire), BodyMotion::Free);
}

#[test]
fn new_drag_releases_previous_one() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.begin_drag(Element::Air, &mut events);
    sim.begin_drag(Element::Earth, &mut events);
    assert_eq!(sim.motion(Element::Air), BodyMotion::Free);
    assert_eq!(sim.motion(Element::Earth), BodyMotion::Dragged);
}

#[test]
fn pick_returns_nearest_hit() {
    let sim = make_sim();
    let water = Element::Water.home_position();
    let origin = Vec3::new(water.x, water.y, 20.0);
    assert_eq!(sim.pick(origin, Vec3::new(0.0, 0.0, -1.0)), Some(Element::Water));
    assert_eq!(sim.pick(Vec3::new(0.0, 50.0, 20.0), Vec3::new(0.0, 0.0, -1.0)), None);
}

#[test]
fn pick_follows_the_drawn_bobbing_position() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    for _ in 0..30 {
        sim.step(&mut events);
    }
    // full air slider: bob amplitude 0.5, applied without stepping so
    // nothing moves
    sim.set_manual(Element::Air, 1.0);
    let body = sim.body(Element::Air).position;
    let shown = sim.display_position(Element::Air);
    assert_eq!(Vec3::from(sim.instances()[0].position), shown);
    let bob = shown.y - body.y;
    assert!(bob.abs() > 0.3, "bob too small: {bob}");

    let origin = Vec3::new(shown.x, shown.y + 0.9 * bob.signum(), 20.0);
    let dir = Vec3::new(0.0, 0.0, -1.0);
    assert!(ray_sphere(origin, dir, body, 1.0).is_none());
    assert_eq!(sim.pick(origin, dir), Some(Element::Air));
}

#[test]
fn earth_lerps_toward_active_anchor() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    let anchor = Vec3::new(0.0, 0.0, 0.0);
    sim.set_anchor(anchor, 5.0);
    let before = sim.body(Element::Earth).position;
    sim.step(&mut events);
    let expected = before + (anchor - before) * 0.02;
    assert!(sim.body(Element::Earth).position.distance(expected) < 1e-5);
    assert_eq!(sim.body(Element::Earth).net_force, Vec3::ZERO);
}

#[test]
fn anchor_pulls_other_bodies() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    spread_out(&mut sim);
    let anchor = Vec3::ZERO;
    sim.set_anchor(anchor, 10.0);
    let before = sim.body(Element::Fire).position;
    sim.step(&mut events);
    let after = sim.body(Element::Fire).position;
    assert!(after.distance(anchor) < before.distance(anchor));
}

#[test]
fn anchor_strength_is_clamped_and_zero_is_inert() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_anchor(Vec3::ZERO, 50.0);
    assert_eq!(sim.anchor().map(|a| a.strength()), Some(10.0));
    sim.set_anchor(Vec3::ZERO, 0.0);
    sim.step(&mut events);
    assert_eq!(sim.body(Element::Earth).position, Element::Earth.home_position());
}

#[test]
fn audio_boosts_anchor_pull() {
    let mut quiet = make_sim();
    let mut loud = make_sim();
    let mut events = Vec::new();
    for sim in [&mut quiet, &mut loud] {
        spread_out(sim);
        sim.set_anchor(Vec3::ZERO, 10.0);
    }
    loud.set_audio_enabled(true);
    // the boost only reads treble/overall; keep sliders neutral via zero bands
    loud.set_audio(AudioEnvelope::new(0.0, 0.0, 0.0, 0.01));
    quiet.step(&mut events);
    loud.step(&mut events);
    let fq = quiet.body(Element::Water).net_force.length();
    let fl = loud.body(Element::Water).net_force.length();
    assert!((fl / fq - (1.0 + 0.01 * 0.8)).abs() < 1e-3);
}

#[test]
fn wind_moves_bodies_by_susceptibility() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    spread_out(&mut sim);
    sim.set_manual(Element::Air, 1.0);
    sim.step(&mut events);
    let force = |e: Element| sim.body(e).net_force.length();
    assert!(force(Element::Air) > force(Element::Fire));
    assert!(force(Element::Fire) > force(Element::Water));
    assert!(force(Element::Water) > force(Element::Earth));
    assert!(sim.body(Element::Earth).net_force.x > 0.0);
}

#[test]
fn low_earth_slows_everything_down() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_manual(Element::Earth, 0.0);
    assert!((sim.time_dilation() - 0.1_f32.powf(0.8)).abs() < 1e-6);
    sim.set_manual(Element::Earth, 0.5);
    sim.step(&mut events);
    assert_eq!(sim.time_dilation(), 1.0);
}

#[test]
fn audio_disabled_effective_tracks_manual() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    sim.set_audio(AudioEnvelope::new(1.0, 1.0, 1.0, 1.0));
    sim.set_manual(Element::Water, 0.7);
    sim.set_manual(Element::Fire, 0.1);
    for _ in 0..3 {
        sim.step(&mut events);
        assert_eq!(sim.effective().values(), sim.manual().values());
    }
}

#[test]
fn tick_runs_fixed_steps_and_caps_backlog() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    assert_eq!(sim.tick(Duration::from_millis(5), &mut events), 0);
    assert_eq!(sim.tick(Duration::from_millis(20), &mut events), 1);
    let cap = sim.config.max_catchup_steps;
    assert_eq!(sim.tick(Duration::from_secs(2), &mut events), cap);
    // backlog was dropped, so a short tick does not burst again
    assert_eq!(sim.tick(Duration::from_millis(5), &mut events), 0);
    assert_eq!(sim.frames(), 1 + cap as u64);
}

#[test]
fn instances_report_flags_and_colors() {
    let mut sim = make_sim();
    let mut events = Vec::new();
    place_fire_next_to_water(&mut sim);
    sim.step(&mut events);
    sim.begin_drag(Element::Earth, &mut events);
    let inst = sim.instances();
    assert_eq!(inst[2].flags & elemental_core::simulation::FLAG_LOCKED, 1);
    assert_eq!(inst[1].flags & elemental_core::simulation::FLAG_LOCKED, 1);
    assert_eq!(inst[3].flags, elemental_core::simulation::FLAG_DRAGGED);
    assert_eq!(inst[0].flags, 0);
    // fire sits next to water, so it carries an interaction color
    assert_eq!(inst[2].color[3], 1.0);
    assert_ne!(&inst[2].color[..3], &Element::Fire.base_color().to_rgba(1.0)[..3]);
    let bytes: &[u8] = bytemuck::cast_slice(&inst);
    assert_eq!(bytes.len(), 4 * std::mem::size_of::<elemental_core::BodyInstance>());
}
