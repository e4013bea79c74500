use foundation::math::{Mat4, Vec3};

use crate::transform::Transform;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CameraMode {
    /// Movement is applied along the camera's current facing.
    Fly,
    /// Orbit: rotation pivots around the target; movement pans the
    /// target in world axes.
    Rotate,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CameraConfig {
    pub move_speed: f32,
    pub rotate_speed: f32,
    pub fov_y_rad: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            move_speed: 0.05,
            rotate_speed: 0.004,
            fov_y_rad: 45f32.to_radians(),
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Per-frame movement/rotation delta produced by input capture.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct CameraInput {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    /// Accumulated pointer drag in pixels (x, y).
    pub rotate_delta: [f32; 2],
}

/// Two independent camera transforms (fly and orbit) plus the derived
/// view matrices. Switching mode swaps the active transform without
/// copying state between the two.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraRig {
    pub mode: CameraMode,
    pub config: CameraConfig,
    fly: Transform,
    orbit: Transform,
    projection: Mat4,
    camera_to_world: Mat4,
    world_to_camera: Mat4,
}

impl CameraRig {
    pub fn new(aspect_ratio: f32, config: CameraConfig) -> Self {
        let start = Transform::at(Vec3::new(0.0, 0.0, 3.0));
        let mut rig = Self {
            mode: CameraMode::Rotate,
            config,
            fly: start,
            orbit: start,
            projection: Mat4::perspective(config.fov_y_rad, aspect_ratio, config.near, config.far),
            camera_to_world: Mat4::IDENTITY,
            world_to_camera: Mat4::IDENTITY,
        };
        rig.update_matrices();
        rig
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.projection = Mat4::perspective(
            self.config.fov_y_rad,
            aspect_ratio,
            self.config.near,
            self.config.far,
        );
    }

    pub fn active(&self) -> &Transform {
        match self.mode {
            CameraMode::Fly => &self.fly,
            CameraMode::Rotate => &self.orbit,
        }
    }

    fn active_mut(&mut self) -> &mut Transform {
        match self.mode {
            CameraMode::Fly => &mut self.fly,
            CameraMode::Rotate => &mut self.orbit,
        }
    }

    /// Writes both mode transforms so the camera lands at the same place
    /// whichever mode is active next (mirrored setter contract).
    pub fn set_position(&mut self, position: Vec3) {
        self.fly.position = position;
        self.orbit.position = position;
    }

    /// Mirrored, like [`CameraRig::set_position`].
    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.fly.rotation = rotation;
        self.orbit.rotation = rotation;
    }

    /// Applies one frame's input at the configured speeds.
    pub fn apply_input(&mut self, input: CameraInput) {
        let rotate_speed = self.config.rotate_speed;
        let speed = self.config.move_speed;
        let mode = self.mode;

        let transform = self.active_mut();
        transform.rotation.x -= input.rotate_delta[1] * rotate_speed;
        transform.rotation.y -= input.rotate_delta[0] * rotate_speed;
        transform.update();

        let mut forward = Vec3::new(0.0, 0.0, -speed);
        let mut right = Vec3::new(speed, 0.0, 0.0);
        let up = Vec3::new(0.0, speed, 0.0);
        if mode == CameraMode::Fly {
            forward = transform.rotation_matrix.transform_dir(forward);
            right = transform.rotation_matrix.transform_dir(right);
        }

        if input.forward {
            transform.position = transform.position + forward;
        }
        if input.back {
            transform.position = transform.position - forward;
        }
        if input.left {
            transform.position = transform.position - right;
        }
        if input.right {
            transform.position = transform.position + right;
        }
        if input.up {
            transform.position = transform.position + up;
        }
        if input.down {
            transform.position = transform.position - up;
        }
    }

    /// Recomputes camera-to-world and world-to-camera from the active
    /// transform. Called once per frame before any matrix is read.
    pub fn update_matrices(&mut self) {
        let mode = self.mode;
        let transform = self.active_mut();
        transform.update();

        self.camera_to_world = match mode {
            CameraMode::Fly => transform.position_matrix.mul(transform.rotation_matrix),
            CameraMode::Rotate => transform.rotation_matrix.mul(transform.position_matrix),
        };
        self.world_to_camera = self
            .camera_to_world
            .inverted()
            .unwrap_or(Mat4::IDENTITY);
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn view(&self) -> Mat4 {
        self.world_to_camera
    }

    pub fn camera_to_world(&self) -> Mat4 {
        self.camera_to_world
    }
}
