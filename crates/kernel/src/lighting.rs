use glam::Vec3;
use voxscene_common::LightingConfig;

/// Point light. Also drives ambient/diffuse/specular in the shading stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
    pub enabled: bool,
}

/// Downward-facing cone light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotLight {
    pub position: Vec3,
    pub direction: Vec3,
    pub cutoff_degrees: f32,
    pub exponent: f32,
    pub enabled: bool,
}

impl SpotLight {
    /// Cosine of the cone half-angle, as consumed by the shading stage.
    pub fn cos_cutoff(&self) -> f32 {
        self.cutoff_degrees.to_radians().cos()
    }
}

/// Process-wide lighting and debug-view parameters. Mutated by input, read by
/// the composer.
#[derive(Debug, Clone, PartialEq)]
pub struct Lighting {
    pub point: PointLight,
    pub spot: SpotLight,
    /// Force every drawable to the normal-as-color material.
    pub normal_debug: bool,
    /// Orbit the point light over time.
    pub animated: bool,
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_config(&LightingConfig::default())
    }
}

impl Lighting {
    pub fn from_config(config: &LightingConfig) -> Self {
        Self {
            point: PointLight {
                position: config.light_position,
                color: config.light_color,
                enabled: true,
            },
            spot: SpotLight {
                position: config.spotlight_position,
                direction: Vec3::NEG_Y,
                cutoff_degrees: 30.0,
                exponent: 90.0,
                enabled: true,
            },
            normal_debug: false,
            animated: false,
        }
    }

    /// Apply time-driven changes for `seconds` since startup. No-op unless
    /// animation is enabled.
    pub fn advance(&mut self, seconds: f64) {
        if self.animated {
            self.point.position = orbit_position(seconds);
        }
    }

    pub fn set_point_enabled(&mut self, enabled: bool) {
        self.point.enabled = enabled;
    }

    /// Switching the spotlight on also switches the point light on, since the
    /// shading stage ignores the spotlight while the point light is off.
    pub fn set_spot_enabled(&mut self, enabled: bool) {
        self.spot.enabled = enabled;
        if enabled {
            self.point.enabled = true;
        }
    }
}

/// Point-light orbit: radius 3 about (5, 4, 5), one revolution every 4π seconds.
pub fn orbit_position(seconds: f64) -> Vec3 {
    let half = seconds / 2.0;
    Vec3::new(
        (3.0 * half.cos() + 5.0) as f32,
        4.0,
        (3.0 * half.sin() + 5.0) as f32,
    )
}
