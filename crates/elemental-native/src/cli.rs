use clap::Parser;
use glam::Vec3;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Run the elemental simulation headless")]
pub struct Args {
    /// Path to a TOML file overriding simulation settings
    #[arg(long)]
    pub config: Option<String>,

    /// Frames to run before exiting (0 runs until interrupted)
    #[arg(long, default_value_t = 600)]
    pub frames: u64,

    /// Drive the sliders with a synthetic audio envelope
    #[arg(long, default_value_t = false)]
    pub audio: bool,

    /// Seed for the synthetic envelope
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Air slider, 0..1
    #[arg(long, default_value_t = 0.5)]
    pub air: f32,

    /// Water slider, 0..1
    #[arg(long, default_value_t = 0.5)]
    pub water: f32,

    /// Fire slider, 0..1
    #[arg(long, default_value_t = 0.5)]
    pub fire: f32,

    /// Earth slider, 0..1
    #[arg(long, default_value_t = 0.5)]
    pub earth: f32,

    /// Gravity anchor position as x,y,z
    #[arg(long, value_parser = parse_vec3)]
    pub anchor: Option<Vec3>,

    /// Gravity anchor strength, 0..10
    #[arg(long, default_value_t = 0.0)]
    pub anchor_strength: f32,

    /// Log body state every N frames
    #[arg(long, default_value_t = 60)]
    pub report_every: u64,
}

/// Parse a comma-separated triple like "0,2.5,-1"
pub fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<f32> = s
        .split(',')
        .map(|p| p.trim().parse::<f32>().map_err(|e| format!("`{p}`: {e}")))
        .collect::<Result<_, _>>()?;
    match parts.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z but got {} values", parts.len())),
    }
}
