//! Camera description and screen-to-world rays.

use macroquad::camera::Camera3D;
use macroquad::math::{Vec2, Vec3, vec3};

/// Vertical field of view macroquad's `Camera3D` uses by default.
pub const DEFAULT_FOVY: f32 = std::f32::consts::FRAC_PI_4;

/// A half-line in world space. `direction` is always unit length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray {
            origin,
            direction: direction.try_normalize().unwrap_or(Vec3::Z),
        }
    }

    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// The player's camera for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewpoint {
    pub position: Vec3,
    /// Unit vector the camera looks along.
    pub forward: Vec3,
    pub up: Vec3,
    /// Vertical field of view, radians.
    pub fovy: f32,
    /// Width over height.
    pub aspect: f32,
}

impl Viewpoint {
    /// First-person camera from yaw and pitch in radians.
    ///
    /// Yaw 0 looks down +Z, positive yaw turns towards +X and positive pitch
    /// looks up, matching how the player controller steers.
    pub fn look(position: Vec3, yaw: f32, pitch: f32, fovy: f32, aspect: f32) -> Self {
        let forward = vec3(
            yaw.sin() * pitch.cos(),
            pitch.sin(),
            yaw.cos() * pitch.cos(),
        );
        Viewpoint {
            position,
            forward,
            up: Vec3::Y,
            fovy,
            aspect,
        }
    }

    /// Camera-space right vector in world coordinates.
    pub fn right(&self) -> Vec3 {
        self.forward.cross(self.up).try_normalize().unwrap_or(Vec3::X)
    }

    /// Where an inspected object sits: straight ahead at `distance`.
    pub fn inspection_point(&self, distance: f32) -> Vec3 {
        self.position + self.forward * distance
    }

    /// Ray from the camera through a pixel of the screen.
    ///
    /// The pixel origin is the top-left corner with y growing downwards, the
    /// same convention as `mouse_position()`.
    pub fn screen_point_to_ray(&self, pointer: Vec2, screen_size: Vec2) -> Ray {
        // Map the pixel to -1..1 on both axes, flipping y so up is positive.
        let ndc_x = 2.0 * pointer.x / screen_size.x.max(1.0) - 1.0;
        let ndc_y = 1.0 - 2.0 * pointer.y / screen_size.y.max(1.0);

        // Half the size of the image plane one unit in front of the camera.
        let half_height = (self.fovy * 0.5).tan();
        let half_width = half_height * self.aspect;

        // Camera-space axes, then step across the image plane from its centre.
        let right = self.right();
        let up = right.cross(self.forward);
        let direction = self.forward + right * (ndc_x * half_width) + up * (ndc_y * half_height);

        Ray::new(self.position, direction)
    }

    pub fn to_camera3d(&self) -> Camera3D {
        Camera3D {
            position: self.position,
            target: self.position + self.forward,
            up: self.up,
            fovy: self.fovy,
            ..Default::default()
        }
    }
}
