//! Commit phase: turns a body's [`Proposal`] into new velocity and position.

use crate::body::Body;
use crate::constants::{ANCHOR_EARTH_LERP, MAX_SPEED};
use crate::interaction::Proposal;
use glam::Vec3;

/// Advance one free body by one frame.
///
/// Time dilation scales the carried-over velocity before the new force is
/// added, so slow motion affects momentum but not the frame's own impulse.
pub fn integrate(body: &mut Body, proposal: &Proposal, time_dilation: f32, damping: f32) {
    if let Some(target) = proposal.anchor_target {
        body.velocity *= damping;
        body.position = body.position.lerp(target, ANCHOR_EARTH_LERP);
        body.net_force = Vec3::ZERO;
        return;
    }
    let carried = body.velocity * time_dilation * proposal.velocity_scale;
    // guard only: air's `1 + repel * 0.1` boost compounds frame over frame
    body.velocity = ((carried + proposal.velocity_delta + proposal.force) * damping)
        .clamp_length_max(MAX_SPEED);
    body.position += body.velocity;
    body.net_force = proposal.force;
}

/// Locked or dragged: no dynamics, position left exactly as it is.
pub fn freeze(body: &mut Body) {
    body.velocity = Vec3::ZERO;
    body.net_force = Vec3::ZERO;
}
