//! Perspective camera: screen <-> world mapping for picking and selection

use serde::{Deserialize, Serialize};

use crate::core::types::{Mat3, Mat4, Quat, Vec2, Vec3};
use crate::math::Ray;

/// Maps world points to screen pixels.
///
/// Screen space has its origin at the top-left corner with y growing down.
pub trait ScreenProjector {
    /// Pixel position of `point`, or `None` when it is behind the viewer
    fn project_to_screen(&self, point: Vec3) -> Option<Vec2>;
}

/// The editor's view of the model. Serializable so scripted sessions can
/// pin the exact view their screen coordinates refer to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    pub position: Vec3,
    /// Camera-to-world rotation; the camera looks down its local -Z
    pub rotation: Quat,
    /// Vertical field of view, radians
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    /// Viewport size in pixels
    pub viewport: Vec2,
}

impl Camera {
    /// Create a new camera looking down -Z
    pub fn new(position: Vec3, fov_y_degrees: f32, viewport: Vec2) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            fov_y: fov_y_degrees.to_radians(),
            near: 0.1,
            far: 1000.0,
            viewport,
        }
    }

    /// Create camera looking at a target
    pub fn look_at(position: Vec3, target: Vec3, fov_y_degrees: f32, viewport: Vec2) -> Self {
        let forward = (target - position).normalize();
        // Looking straight up or down, Y can't serve as the up hint
        let up_hint = if forward.cross(Vec3::Y).length_squared() < 1e-6 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        };
        let right = forward.cross(up_hint).normalize();
        let up = right.cross(forward);

        let rotation = Quat::from_mat3(&Mat3::from_cols(right, up, -forward));

        Self {
            rotation,
            ..Self::new(position, fov_y_degrees, viewport)
        }
    }

    /// Width / height
    pub fn aspect(&self) -> f32 {
        self.viewport.x / self.viewport.y
    }

    /// World to camera space
    pub fn view_matrix(&self) -> Mat4 {
        let rotation_matrix = Mat4::from_quat(self.rotation.conjugate());
        let translation_matrix = Mat4::from_translation(-self.position);
        rotation_matrix * translation_matrix
    }

    /// Right-handed perspective, camera to clip space
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// View direction in world space
    pub fn forward(&self) -> Vec3 {
        self.rotation * -Vec3::Z
    }

    /// Ray from the eye through a screen pixel
    pub fn screen_ray(&self, screen: Vec2) -> Ray {
        let ndc = Vec2::new(
            screen.x / self.viewport.x * 2.0 - 1.0,
            1.0 - screen.y / self.viewport.y * 2.0,
        );
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(ndc.extend(0.0));
        let far = inverse.project_point3(ndc.extend(1.0));
        Ray::new(near, (far - near).normalize())
    }
}

impl ScreenProjector for Camera {
    fn project_to_screen(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection() * point.extend(1.0);
        if clip.w <= 0.0 {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x + 1.0) * 0.5 * self.viewport.x,
            (1.0 - ndc.y) * 0.5 * self.viewport.y,
        ))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::look_at(Vec3::new(8.0, 8.0, 8.0), Vec3::ZERO, 45.0, Vec2::new(1280.0, 720.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_look_straight_down() {
        let camera = Camera::look_at(Vec3::new(0.5, 10.0, 0.5), Vec3::new(0.5, 0.0, 0.5), 60.0, Vec2::new(800.0, 600.0));
        assert!((camera.forward() - Vec3::NEG_Y).length() < 0.001);
        assert!(camera.rotation.is_finite());

        let ray = camera.screen_ray(Vec2::new(400.0, 300.0));
        assert!(ray.direction.is_finite());
        assert!((ray.direction - Vec3::NEG_Y).length() < 0.001);
    }

    #[test]
    fn test_forward() {
        let camera = Camera::new(Vec3::ZERO, 60.0, Vec2::new(800.0, 600.0));
        assert!((camera.forward() - Vec3::NEG_Z).length() < 0.001);

        let camera = Camera::default();
        let expected = (Vec3::ZERO - Vec3::splat(8.0)).normalize();
        assert!((camera.forward() - expected).length() < 0.001);
    }

    #[test]
    fn test_view_matrix_translation() {
        let mut camera = Camera::new(Vec3::ZERO, 60.0, Vec2::new(800.0, 600.0));
        camera.position = Vec3::new(10.0, 0.0, 0.0);

        let view = camera.view_matrix();
        let origin_in_camera = view.transform_point3(Vec3::ZERO);
        assert!((origin_in_camera.x - (-10.0)).abs() < 0.001);
    }

    #[test]
    fn test_target_projects_to_center() {
        let camera = Camera::default();
        let screen = camera.project_to_screen(Vec3::ZERO).unwrap();
        assert!((screen - Vec2::new(640.0, 360.0)).length() < 0.01);
    }

    #[test]
    fn test_behind_camera_is_none() {
        let camera = Camera::new(Vec3::ZERO, 60.0, Vec2::new(800.0, 600.0));
        assert!(camera.project_to_screen(Vec3::new(0.0, 0.0, 5.0)).is_none());
    }

    #[test]
    fn test_screen_axes() {
        let camera = Camera::new(Vec3::new(0.0, 0.0, 10.0), 60.0, Vec2::new(800.0, 600.0));
        let right = camera.project_to_screen(Vec3::new(1.0, 0.0, 0.0)).unwrap();
        let up = camera.project_to_screen(Vec3::new(0.0, 1.0, 0.0)).unwrap();
        assert!(right.x > 400.0);
        // World up is screen up (smaller y)
        assert!(up.y < 300.0);
    }

    #[test]
    fn test_screen_ray_roundtrip() {
        let camera = Camera::default();
        let point = Vec3::new(1.5, 0.5, -2.0);
        let screen = camera.project_to_screen(point).unwrap();
        let ray = camera.screen_ray(screen);

        // The ray passes through the original point
        let to_point = point - ray.origin;
        let along = to_point.dot(ray.direction);
        let closest = ray.at(along);
        assert!((closest - point).length() < 0.01);
    }
}
