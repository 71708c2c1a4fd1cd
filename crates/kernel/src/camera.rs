use glam::{Mat4, Vec3};
use voxscene_common::CameraConfig;

/// Near clipping plane distance.
pub const NEAR_PLANE: f32 = 0.1;
/// Far clipping plane distance.
pub const FAR_PLANE: f32 = 100.0;

/// Tilt never brings the look direction closer than this to straight up/down.
const MAX_PITCH_DEGREES: f32 = 89.0;
const EPSILON: f32 = 1e-6;

/// Errors from constructing a camera.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    #[error("eye and target coincide at {0}")]
    Degenerate(Vec3),
    #[error("look direction {0} is parallel to world up")]
    Vertical(Vec3),
    #[error("field of view {0} must lie strictly between 0 and 180 degrees")]
    InvalidFov(f32),
}

/// First-person look-at camera.
///
/// `at` is a point, not a direction. Every mutator keeps `eye != at` and
/// recomputes the view and projection matrices before returning, so the
/// matrices are never stale.
#[derive(Debug, Clone)]
pub struct Camera {
    eye: Vec3,
    at: Vec3,
    up: Vec3,
    fov_degrees: f32,
    step_size: f32,
    aspect: f32,
    view: Mat4,
    projection: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        let config = CameraConfig::default();
        let mut camera = Self {
            eye: config.eye,
            at: config.at,
            up: Vec3::Y,
            fov_degrees: config.fov_degrees,
            step_size: config.step_size,
            aspect: 16.0 / 9.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_matrices();
        camera
    }
}

impl Camera {
    /// Create a camera with `up = (0, 1, 0)`.
    pub fn new(eye: Vec3, at: Vec3, fov_degrees: f32, step_size: f32) -> Result<Self, CameraError> {
        let offset = at - eye;
        if offset.length_squared() < EPSILON {
            return Err(CameraError::Degenerate(eye));
        }
        if offset.normalize().cross(Vec3::Y).length_squared() < EPSILON {
            return Err(CameraError::Vertical(offset));
        }
        if !(fov_degrees > 0.0 && fov_degrees < 180.0) {
            return Err(CameraError::InvalidFov(fov_degrees));
        }
        let mut camera = Self {
            eye,
            at,
            up: Vec3::Y,
            fov_degrees,
            step_size,
            aspect: 16.0 / 9.0,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.update_matrices();
        Ok(camera)
    }

    pub fn from_config(config: &CameraConfig) -> Result<Self, CameraError> {
        Self::new(config.eye, config.at, config.fov_degrees, config.step_size)
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn at(&self) -> Vec3 {
        self.at
    }

    pub fn up(&self) -> Vec3 {
        self.up
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn step_size(&self) -> f32 {
        self.step_size
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    /// Unit vector from `eye` toward `at`.
    pub fn forward(&self) -> Vec3 {
        (self.at - self.eye).normalize_or_zero()
    }

    /// Update the viewport aspect ratio (width / height).
    pub fn set_aspect(&mut self, aspect: f32) {
        if !(aspect.is_finite() && aspect > 0.0) {
            tracing::warn!(aspect, "ignoring invalid aspect ratio");
            return;
        }
        self.aspect = aspect;
        self.update_matrices();
    }

    /// Replace the up reference. Zero-length vectors are ignored.
    #[cfg(test)]
    fn set_up(&mut self, up: Vec3) {
        if up.length_squared() < EPSILON {
            tracing::warn!(?up, "ignoring zero-length up vector");
            return;
        }
        self.up = up;
        self.update_matrices();
    }

    pub fn move_forward(&mut self) {
        let f = (self.at - self.eye).normalize_or_zero();
        self.translate(f * self.step_size);
    }

    pub fn move_backward(&mut self) {
        let b = (self.eye - self.at).normalize_or_zero();
        self.translate(b * self.step_size);
    }

    /// Strafe using the backward vector as the cross-product basis:
    /// `s = normalize(backward x up)`.
    pub fn strafe_left(&mut self) {
        let b = (self.eye - self.at).normalize_or_zero();
        let s = b.cross(self.up).normalize_or_zero();
        self.translate(s * self.step_size);
    }

    /// `s = normalize(up x backward)`.
    pub fn strafe_right(&mut self) {
        let b = (self.eye - self.at).normalize_or_zero();
        let s = self.up.cross(b).normalize_or_zero();
        self.translate(s * self.step_size);
    }

    /// Rotate the look direction about `up` by `degrees` (counter-clockwise
    /// seen from above for a positive angle). `eye` and `up` are unchanged.
    pub fn pan(&mut self, degrees: f32) {
        let axis = self.up.normalize_or_zero();
        if axis == Vec3::ZERO {
            tracing::warn!("pan skipped: up vector has no length");
            return;
        }
        let offset = self.at - self.eye;
        let distance = offset.length();
        let rotated = rotate_about(offset / distance, axis, degrees);
        self.at = self.eye + rotated * distance;
        self.update_matrices();
    }

    /// Pitch the look direction about the world-up based side axis
    /// `normalize((0,1,0) x forward)`. Positive angles look down.
    ///
    /// The resulting pitch is clamped to ±89°, or to the current pitch if the
    /// camera already starts beyond that, so tilting never pushes the view
    /// further toward a pole and `tilt(0.0)` leaves it unchanged. `up` is reset
    /// to `(0, 1, 0)`.
    pub fn tilt(&mut self, degrees: f32) {
        let offset = self.at - self.eye;
        let distance = offset.length();
        let f = offset / distance;
        let side = Vec3::Y.cross(f);
        if side.length_squared() < EPSILON {
            tracing::warn!(?f, "tilt skipped: looking along world up");
        } else {
            let pitch = f.y.clamp(-1.0, 1.0).asin().to_degrees();
            let limit = MAX_PITCH_DEGREES.max(pitch.abs());
            let target = (pitch - degrees).clamp(-limit, limit);
            let rotated = rotate_about(f, side.normalize(), pitch - target);
            self.at = self.eye + rotated * distance;
        }
        self.up = Vec3::Y;
        self.update_matrices();
    }

    /// Pointer drag: horizontal motion pans, vertical motion tilts.
    pub fn drag(&mut self, dx: f32, dy: f32, sensitivity: f32) {
        self.pan(-dx * sensitivity);
        self.tilt(dy * sensitivity);
    }

    fn translate(&mut self, delta: Vec3) {
        self.eye += delta;
        self.at += delta;
        self.update_matrices();
    }

    fn update_matrices(&mut self) {
        self.projection = Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        self.view = Mat4::look_at_rh(self.eye, self.at, self.up);
    }
}

/// Rodrigues' rotation of `v` about the unit `axis`.
fn rotate_about(v: Vec3, axis: Vec3, degrees: f32) -> Vec3 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    v * cos + axis.cross(v) * sin + axis * axis.dot(v) * (1.0 - cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3, tol: f32) -> bool {
        (a - b).length() <= tol
    }

    #[test]
    fn default_camera_matches_reference_pose() {
        let cam = Camera::default();
        assert_eq!(cam.eye(), Vec3::new(4.0, 2.0, 9.0));
        assert_eq!(cam.at(), Vec3::new(0.0, 0.0, -100.0));
        assert_eq!(cam.up(), Vec3::Y);
        assert_eq!(cam.fov_degrees(), 50.0);
        assert!(!(cam.projection_matrix() * cam.view_matrix()).col(0).x.is_nan());
    }

    #[test]
    fn move_forward_shifts_eye_and_target_along_forward() {
        let mut cam = Camera::default();
        let f = cam.forward();
        let eye0 = cam.eye();
        let at0 = cam.at();
        let dist0 = eye0.distance(at0);

        cam.move_forward();

        assert!(approx(cam.eye(), eye0 + f * 0.1, 1e-5));
        assert!(approx(cam.at(), at0 + f * 0.1, 1e-4));
        assert!((cam.eye().distance(cam.at()) - dist0).abs() < 1e-3);
    }

    #[test]
    fn movement_preserves_eye_target_distance() {
        let mut cam = Camera::default();
        let dist0 = cam.eye().distance(cam.at());
        for i in 0..50 {
            if i % 3 == 0 {
                cam.move_backward();
            } else {
                cam.move_forward();
            }
            assert!((cam.eye().distance(cam.at()) - dist0).abs() < 1e-3);
        }
    }

    #[test]
    fn movement_keeps_facing_direction() {
        let mut cam = Camera::default();
        let f0 = cam.forward();
        cam.move_forward();
        cam.strafe_left();
        cam.move_backward();
        cam.strafe_right();
        assert!(approx(cam.forward(), f0, 1e-5));
    }

    #[test]
    fn strafe_directions_when_looking_down_negative_z() {
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -100.0), 50.0, 1.0)
            .unwrap();
        cam.strafe_left();
        assert!(approx(cam.eye(), Vec3::new(-1.0, 0.0, 5.0), 1e-5));
        cam.strafe_right();
        cam.strafe_right();
        assert!(approx(cam.eye(), Vec3::new(1.0, 0.0, 5.0), 1e-5));
    }

    #[test]
    fn pan_then_inverse_pan_restores_target() {
        let mut cam = Camera::default();
        let at0 = cam.at();
        let eye0 = cam.eye();
        cam.pan(37.0);
        assert!(!approx(cam.at(), at0, 1e-2));
        assert_eq!(cam.eye(), eye0);
        assert_eq!(cam.up(), Vec3::Y);
        cam.pan(-37.0);
        assert!(approx(cam.at(), at0, 1e-3));
    }

    #[test]
    fn positive_pan_turns_left() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 50.0, 0.1).unwrap();
        cam.pan(90.0);
        assert!(approx(cam.forward(), Vec3::new(-1.0, 0.0, 0.0), 1e-5));
    }

    #[test]
    fn pan_normalizes_non_unit_up() {
        let mut a = Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 50.0, 0.1).unwrap();
        let mut b = a.clone();
        b.set_up(Vec3::new(0.0, 3.0, 0.0));
        a.pan(25.0);
        b.pan(25.0);
        assert!(approx(a.at(), b.at(), 1e-5));
    }

    #[test]
    fn tilt_resets_up_to_world_up() {
        let mut cam = Camera::default();
        cam.set_up(Vec3::new(0.3, 0.9, 0.1));
        cam.tilt(4.0);
        assert_eq!(cam.up(), Vec3::Y);
        cam.tilt(-9.0);
        assert_eq!(cam.up(), Vec3::Y);
    }

    #[test]
    fn positive_tilt_looks_down() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 50.0, 0.1).unwrap();
        cam.tilt(30.0);
        let f = cam.forward();
        assert!((f.y - (-30.0_f32).to_radians().sin()).abs() < 1e-5);
        assert!(f.x.abs() < 1e-6);
    }

    #[test]
    fn tilt_clamps_before_the_pole() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 50.0, 0.1).unwrap();
        cam.tilt(500.0);
        let pitch = cam.forward().y.asin().to_degrees();
        assert!((pitch + 89.0).abs() < 1e-2);
        cam.tilt(-500.0);
        let pitch = cam.forward().y.asin().to_degrees();
        assert!((pitch - 89.0).abs() < 1e-2);
        assert!(!cam.view_matrix().col(0).x.is_nan());
    }

    #[test]
    fn near_vertical_camera_keeps_pitch_on_horizontal_drag() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.01, 1.0, 0.0), 50.0, 0.1).unwrap();
        let f0 = cam.forward();
        assert!(f0.y.asin().to_degrees() > MAX_PITCH_DEGREES);

        cam.drag(10.0, 0.0, 0.0);
        assert!(approx(cam.forward(), f0, 1e-6));

        cam.drag(10.0, 0.0, 0.15);
        assert!((cam.forward().y - f0.y).abs() < 1e-6);
    }

    #[test]
    fn beyond_limit_tilt_only_moves_back_toward_horizon() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.01, 1.0, 0.0), 50.0, 0.1).unwrap();
        let pitch0 = cam.forward().y.asin().to_degrees();
        cam.tilt(-5.0);
        assert!((cam.forward().y.asin().to_degrees() - pitch0).abs() < 1e-2);
        cam.tilt(10.0);
        let pitch = cam.forward().y.asin().to_degrees();
        assert!((pitch - (pitch0 - 10.0)).abs() < 1e-2);
    }

    #[test]
    fn tilt_preserves_eye_target_distance() {
        let mut cam = Camera::default();
        let dist0 = cam.eye().distance(cam.at());
        cam.tilt(12.0);
        assert!((cam.eye().distance(cam.at()) - dist0).abs() < 1e-3);
    }

    #[test]
    fn drag_pans_opposite_to_horizontal_motion() {
        let mut cam =
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), 50.0, 0.1).unwrap();
        // dragging right by 600px at 0.15 deg/px is a 90 degree right turn
        cam.drag(600.0, 0.0, 0.15);
        assert!(approx(cam.forward(), Vec3::new(1.0, 0.0, 0.0), 1e-4));
    }

    #[test]
    fn degenerate_construction_is_rejected() {
        assert_eq!(
            Camera::new(Vec3::ONE, Vec3::ONE, 50.0, 0.1).unwrap_err(),
            CameraError::Degenerate(Vec3::ONE)
        );
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::new(0.0, 5.0, 0.0), 50.0, 0.1),
            Err(CameraError::Vertical(_))
        ));
        assert!(matches!(
            Camera::new(Vec3::ZERO, Vec3::X, 0.0, 0.1),
            Err(CameraError::InvalidFov(_))
        ));
    }

    #[test]
    fn matrices_track_mutations() {
        let mut cam = Camera::default();
        let view0 = cam.view_matrix();
        cam.move_forward();
        assert_ne!(cam.view_matrix(), view0);
        assert_eq!(
            cam.view_matrix(),
            Mat4::look_at_rh(cam.eye(), cam.at(), cam.up())
        );

        let proj0 = cam.projection_matrix();
        cam.set_aspect(1.0);
        assert_ne!(cam.projection_matrix(), proj0);
        cam.set_aspect(f32::NAN);
        assert_eq!(cam.aspect(), 1.0);
    }

    #[test]
    fn rodrigues_matches_quaternion_rotation() {
        let axis = Vec3::new(1.0, 2.0, -0.5).normalize();
        let v = Vec3::new(0.3, -1.0, 4.0);
        let expected = glam::Quat::from_axis_angle(axis, 33.0_f32.to_radians()) * v;
        assert!(approx(rotate_about(v, axis, 33.0), expected, 1e-5));
    }
}
