use glam::{Mat4, Vec3};
use voxscene_kernel::{Camera, Lighting};

/// Per-frame values shared by every drawable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformBundle {
    pub view: Mat4,
    pub projection: Mat4,
    pub camera_position: Vec3,
    pub light_position: Vec3,
    pub light_color: Vec3,
    pub light_on: bool,
    pub spot_position: Vec3,
    pub spot_direction: Vec3,
    /// Cosine of the spotlight cone half-angle.
    pub spot_cos_cutoff: f32,
    pub spot_exponent: f32,
    pub spot_on: bool,
}

impl UniformBundle {
    pub fn from_scene(camera: &Camera, lighting: &Lighting) -> Self {
        Self {
            view: camera.view_matrix(),
            projection: camera.projection_matrix(),
            camera_position: camera.eye(),
            light_position: lighting.point.position,
            light_color: lighting.point.color,
            light_on: lighting.point.enabled,
            spot_position: lighting.spot.position,
            spot_direction: lighting.spot.direction,
            spot_cos_cutoff: lighting.spot.cos_cutoff(),
            spot_exponent: lighting.spot.exponent,
            spot_on: lighting.spot.enabled,
        }
    }
}

impl Default for UniformBundle {
    fn default() -> Self {
        Self::from_scene(&Camera::default(), &Lighting::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundle_mirrors_camera_and_lights() {
        let camera = Camera::default();
        let mut lighting = Lighting::default();
        lighting.set_point_enabled(false);
        let u = UniformBundle::from_scene(&camera, &lighting);
        assert_eq!(u.view, camera.view_matrix());
        assert_eq!(u.projection, camera.projection_matrix());
        assert_eq!(u.camera_position, camera.eye());
        assert!(!u.light_on);
        assert!(u.spot_on);
        assert!((u.spot_cos_cutoff - 0.866_025_4).abs() < 1e-5);
        assert_eq!(u.spot_exponent, 90.0);
    }
}
