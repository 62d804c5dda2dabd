//! Force-and-interaction simulation for four elemental bodies (air, water,
//! fire, earth) driven by sliders and a four-band audio envelope.
//!
//! Rendering, audio analysis and UI are external; this crate consumes slider
//! values, envelope snapshots and pointer input, and produces body
//! positions, net forces, colors and lock/drag status.

pub mod audio;
pub mod body;
pub mod color;
pub mod config;
pub mod constants;
pub mod controls;
pub mod deform;
pub mod element;
pub mod input;
pub mod integrator;
pub mod interaction;
pub mod simulation;

pub use audio::{AudioEnvelope, EnvelopeCell};
pub use body::{Body, BodyMotion, GravityAnchor, LockSet};
pub use color::Color;
pub use config::{ConfigError, SimConfig};
pub use controls::{EffectiveControl, ElementParameters, ManualControl, ParameterSet, Wind};
pub use deform::Deformer;
pub use element::{Element, ParseElementError, PhysicalProps};
pub use interaction::{Bodies, Proposal};
pub use simulation::{BodyInstance, SimEvent, Simulation};
