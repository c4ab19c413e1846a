/// Tunables for the simulation and the raycaster.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    /// Player speed in tiles per second.
    pub move_speed: f32,
    /// Radians per second at `rotate_dir == 1`.
    pub rotate_speed: f32,
    /// Tiles per second.
    pub projectile_speed: f32,
    /// Distance ahead of the player a new projectile appears at.
    pub projectile_spawn_offset: f32,
    pub projectile_image: u32,
    /// Sprites closer than this to the player block its movement.
    pub sprite_radius: f32,
    pub texture_width: u32,
    /// Upper bound on DDA steps per ray. `0` derives one from the grid size.
    pub max_ray_steps: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            move_speed: 3.0,
            rotate_speed: std::f32::consts::PI,
            projectile_speed: 8.0,
            projectile_spawn_offset: 0.3,
            projectile_image: 1,
            sprite_radius: 0.2,
            texture_width: 64,
            max_ray_steps: 0,
        }
    }
}

impl SimConfig {
    /// A ray crosses at most `width + 1` vertical and `height + 1` horizontal
    /// lines before leaving the grid.
    pub fn ray_step_limit(&self, width: usize, height: usize) -> usize {
        if self.max_ray_steps > 0 {
            self.max_ray_steps
        } else {
            2 * (width + height) + 4
        }
    }
}
