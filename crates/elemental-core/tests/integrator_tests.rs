// Commit phase: force integration, the speed guard and freezing.

use elemental_core::constants::MAX_SPEED;
use elemental_core::integrator::{freeze, integrate};
use elemental_core::{Body, Element, Proposal};
use glam::Vec3;

#[test]
fn force_and_carried_velocity_are_damped() {
    let mut body = Body::new(Element::Water);
    body.velocity = Vec3::new(0.1, 0.0, 0.0);
    let proposal = Proposal {
        force: Vec3::new(0.0, 0.05, 0.0),
        ..Proposal::default()
    };
    let start = body.position;
    integrate(&mut body, &proposal, 0.5, 0.9);
    let expected = Vec3::new(0.05, 0.05, 0.0) * 0.9;
    assert!((body.velocity - expected).length() < 1e-6);
    assert!((body.position - (start + expected)).length() < 1e-6);
    assert_eq!(body.net_force, proposal.force);
}

#[test]
fn compounding_boost_is_held_at_max_speed() {
    let mut body = Body::new(Element::Fire);
    body.velocity = Vec3::new(1.5, 0.0, 0.0);
    let proposal = Proposal {
        velocity_scale: 1.1,
        ..Proposal::default()
    };
    for _ in 0..200 {
        integrate(&mut body, &proposal, 1.0, 1.0);
        assert!(body.velocity.length() <= MAX_SPEED + 1e-5);
    }
    assert!((body.velocity.length() - MAX_SPEED).abs() < 1e-4);
}

#[test]
fn freeze_keeps_position() {
    let mut body = Body::new(Element::Air);
    body.velocity = Vec3::ONE;
    body.net_force = Vec3::ONE;
    let at = body.position;
    freeze(&mut body);
    assert_eq!(body.position, at);
    assert_eq!(body.velocity, Vec3::ZERO);
    assert_eq!(body.net_force, Vec3::ZERO);
}
