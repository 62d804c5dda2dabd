/// Linear RGB color in \[0, 1\] per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn lerp(self, other: Color, t: f32) -> Color {
        let t = t.clamp(0.0, 1.0);
        Color::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }

    pub fn to_rgba(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

// Interaction palette
pub const FIRE_RED: Color = Color::new(1.0, 0.1, 0.0);
pub const FIRE_YELLOW: Color = Color::new(1.0, 0.9, 0.1);
pub const FIRE_LIGHT_GREEN: Color = Color::new(0.6, 1.0, 0.4);
pub const WATER_AQUA: Color = Color::new(0.2, 0.9, 0.9);
pub const WATER_DEEP_BLUE: Color = Color::new(0.05, 0.15, 0.6);
pub const EARTH_GOLD: Color = Color::new(1.0, 0.8, 0.2);
pub const EARTH_GREEN: Color = Color::new(0.3, 0.9, 0.3);
pub const EARTH_NEON_AQUA: Color = Color::new(0.2, 1.0, 0.9);
