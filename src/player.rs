use std::f32::consts::FRAC_PI_2;

use crate::vector::{Vector, rotate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Grid units, one tile edge per unit.
    pub position: Vector,
    /// Unit facing vector.
    pub direction: Vector,
    /// Half-FOV plane, kept perpendicular to `direction`.
    pub camera: Vector,
    /// Screen-relative movement input: `y = -1` forward, `x = 1` strafe right.
    pub move_dir: Vector,
    /// Rotation input, consumed (reset to zero) by every update.
    pub rotate_dir: f32,
}

impl Player {
    /// Player at `position` facing `direction` with a camera plane of
    /// half-width `plane` to its right.
    pub fn new(position: Vector, direction: Vector, plane: f32) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            position,
            direction,
            camera: rotate(direction, FRAC_PI_2) * plane,
            move_dir: Vector::ZERO,
            rotate_dir: 0.0,
        }
    }

    /// Rotate facing and camera plane together.
    pub fn turn(&mut self, angle: f32) {
        self.direction = rotate(self.direction, angle);
        self.camera = rotate(self.camera, angle);
    }

    /// World-space velocity for the current `move_dir`, `speed` tiles/s, or
    /// `None` without input.
    pub fn velocity(&self, speed: f32) -> Option<Vector> {
        if self.move_dir == Vector::ZERO {
            return None;
        }
        let heading = (-self.move_dir.y).atan2(-self.move_dir.x) - FRAC_PI_2;
        Some(rotate(self.direction, heading) * speed)
    }

    /// Ray through screen column `column` of `screen_width`, spanning the
    /// camera plane from its left edge to its right edge.
    pub fn ray_for_column(&self, column: usize, screen_width: usize) -> Vector {
        let camera_x = 2.0 * column as f32 / screen_width as f32 - 1.0;
        self.direction + self.camera * camera_x
    }
}
