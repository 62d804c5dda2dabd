use glam::Vec3;

// Shared tuning constants for the elemental simulation.

// Scene layout, indexed in `Element` declaration order (air, water, fire, earth)
pub const HOME_POSITIONS: [[f32; 3]; 4] = [
    [-4.0, 3.0, 0.0],  // air, upper left
    [4.0, 0.0, 2.0],   // water, right
    [-4.0, -1.0, -2.0], // fire, lower left
    [4.0, -3.0, 0.0],  // earth, low right
];

// Control resolver
pub const NEUTRAL: f32 = 0.5; // slider midpoint where every strength is zero
pub const AUDIO_ACTIVE_THRESHOLD: f32 = 0.02; // overall level below which audio counts as quiet
pub const QUIET_DECAY: f32 = 0.98; // per-frame decay of effective toward manual
pub const EARTH_BASS_GAIN: f32 = 0.6;
pub const WATER_MID_GAIN: f32 = 0.55;
pub const FIRE_TREBLE_GAIN: f32 = 0.65;
pub const AIR_BAND_GAIN: f32 = 0.5;
pub const AIR_OVERALL_BLEND: f32 = 0.5; // air band = treble + blend * overall

// Derived parameter shaping
pub const FLOAT_SPEED_BASE: f32 = 0.5;
pub const FLOAT_SPEED_SPAN: f32 = 1.5;
pub const FLOAT_AMOUNT_BASE: f32 = 0.1;
pub const FLOAT_AMOUNT_SPAN: f32 = 0.4;
pub const BRIGHTNESS_BASE: f32 = 1.0;
pub const BRIGHTNESS_SPAN: f32 = 1.5;
pub const WIND_STRENGTH_SCALE: f32 = 0.5;
pub const WIND_TILT: f32 = 0.2; // upward component of the wind direction

// Integrator
pub const DAMPING: f32 = 0.92;
pub const TIME_DILATION_BASE: f32 = 0.1;
pub const TIME_DILATION_EXPONENT: f32 = 0.8;
pub const MAX_SPEED: f32 = 2.0; // world units per frame

// Ranges
pub const INTERACTION_RANGE: f32 = 15.0;
pub const LOCK_DISTANCE: f32 = 1.5;
pub const UNLOCK_DISTANCE: f32 = 3.0;
pub const COLOR_DISTANCE: f32 = 6.0;

// Collision
pub const DEFAULT_MIN_DISTANCE: f32 = 1.0;
pub const WATER_MIN_DISTANCE: f32 = 1.2;
pub const COLLISION_PUSH: f32 = 0.08;
pub const COLLISION_IMPULSE: f32 = 0.5;
pub const FRICTION_DAMPING: f32 = 0.05;

// Fire as source
pub const FIRE_FADE_START: f32 = 1.5; // fire is fully quenched closer than this to water
pub const FIRE_FADE_END: f32 = 8.0; // and unaffected beyond this
pub const FIRE_PUSH_AXIS: Vec3 = Vec3::new(1.0, 0.2, 0.0);
pub const FIRE_PUSH_GAIN: f32 = 0.03;
pub const FIRE_UPDRAFT_GAIN: f32 = 0.04;
pub const FIRE_SUCTION_GAIN: f32 = 0.02;

// Water as source
pub const WATER_FLOW: Vec3 = Vec3::new(0.0, -0.3, 0.7);
pub const WATER_FLOW_BLEND: f32 = 0.3;
pub const WATER_ATTRACT_GAIN: f32 = 0.02;

// Earth as source
pub const EARTH_DOWN_BIAS: f32 = 0.4;
pub const EARTH_ATTRACT_GAIN: f32 = 0.03;

// Air as source
pub const AIR_REPEL_GAIN: f32 = 0.03;
pub const AIR_TURBULENCE_FREQ: Vec3 = Vec3::new(2.0, 1.5, 1.8);
pub const AIR_TURBULENCE_AMOUNT: f32 = 0.3;
pub const AIR_LIFT: f32 = 0.01;
pub const AIR_VELOCITY_BOOST: f32 = 0.1;

// Below-midpoint radial repel for water and earth
pub const RADIAL_REPEL_GAIN: f32 = 0.02;

// Wind
pub const WIND_GAIN: f32 = 0.01;

// Gravity anchor
pub const ANCHOR_MAX_STRENGTH: f32 = 10.0;
pub const ANCHOR_FORCE_GAIN: f32 = 0.001;
pub const ANCHOR_FALLOFF: f32 = 0.1; // exp(-falloff * distance)
pub const ANCHOR_EARTH_LERP: f32 = 0.02;
pub const AUDIO_GRAVITY_GAIN: f32 = 0.8;

// Boundary containment
pub const BOUNDARY_OUTER_RADIUS: f32 = 20.0;
pub const BOUNDARY_OUTER_GAIN: f32 = 0.01;
pub const BOUNDARY_OUTER_EXPONENT: f32 = 1.5;
pub const BOUNDARY_INNER_RADIUS: f32 = 10.0;
pub const BOUNDARY_INNER_GAIN: f32 = 0.001;

// Inverse-distance guards
pub const MIN_LINEAR_DISTANCE: f32 = 0.5;
pub const MIN_SQUARED_DISTANCE: f32 = 0.1;

// Deformation aura
pub const DEFORM_GAIN: f32 = 6.0;
pub const DEFORM_SMOOTHING: f32 = 0.15; // new = (1-α)*old + α*target
pub const DEFORM_NOISE_SCALE: f64 = 1.5;
pub const DEFORM_NOISE_SPEED: f64 = 0.5;
pub const DEFORM_NOISE_BASE: f32 = 0.02;

// Interaction
pub const PICK_SPHERE_RADIUS: f32 = 1.0; // ray-sphere radius for picking

// Frame clock
pub const FIXED_STEP_HZ: f32 = 60.0;
pub const MAX_CATCHUP_STEPS: u32 = 4;

#[inline]
pub fn fire_push_axis() -> Vec3 {
    FIRE_PUSH_AXIS.normalize()
}

#[inline]
pub fn water_flow_dir() -> Vec3 {
    WATER_FLOW.normalize()
}
