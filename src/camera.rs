use tile_caster::{Player, Vector};

/// View through the player's eyes: facing vector plus camera plane.
pub struct Camera<'a> {
    player: &'a Player,
}

impl<'a> Camera<'a> {
    pub fn new(player: &'a Player) -> Self {
        Self { player }
    }

    /// World point into camera space: `x` across the camera plane, `y` depth
    /// along the facing direction.
    #[inline]
    pub fn world_to_camera(&self, p: Vector) -> Vector {
        let Player {
            position,
            direction: dir,
            camera: plane,
            ..
        } = *self.player;
        let d = p - position;
        // Inverse of the [plane dir] basis
        let inv_det = 1.0 / (plane.x * dir.y - dir.x * plane.y);
        Vector::new(
            inv_det * (dir.y * d.x - dir.x * d.y),
            inv_det * (-plane.y * d.x + plane.x * d.y),
        )
    }

    #[inline]
    pub fn project_x(&self, cx: f32, cy: f32, screen_width: f32) -> f32 {
        0.5 * screen_width * (1.0 + cx / cy)
    }

    /// On-screen height of a one-tile-tall object `depth` tiles away.
    #[inline]
    pub fn slice_height(&self, depth: f32, screen_h: f32) -> f32 {
        screen_h / depth.max(1e-3)
    }

    #[inline]
    pub fn screen_center_y(&self, screen_h: f32) -> f32 {
        0.5 * screen_h
    }
}
