use rayon::prelude::*;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::grid::GridMap;
use crate::player::Player;
use crate::raycast::{RayHit, Raycaster};
use crate::sprite::{Sprite, SpriteKind, SpriteRegistry};
use crate::vector::Vector;

/// Root simulation state. `update` takes it mutably once per frame; rendering
/// only needs a shared borrow.
#[derive(Debug, Clone)]
pub struct World {
    pub grid: GridMap,
    pub player: Player,
    pub sprites: SpriteRegistry,
    pub config: SimConfig,
}

/// Trim `step` so that `last + step` is not blocked, testing each axis on its
/// own so motion along the free axis survives (sliding).
fn resolve_axes(last: Vector, step: Vector, blocked: impl Fn(Vector) -> bool) -> Vector {
    if !blocked(last + step) {
        return step;
    }
    let x_blocked = blocked(last + Vector::new(step.x, 0.0));
    let y_blocked = blocked(last + Vector::new(0.0, step.y));
    if !x_blocked && !y_blocked {
        // Only the diagonal corner is solid.
        return Vector::ZERO;
    }
    Vector::new(
        if x_blocked { 0.0 } else { step.x },
        if y_blocked { 0.0 } else { step.y },
    )
}

impl World {
    /// Build a world, spawning an object sprite at the center of every cell
    /// with a non-zero spawn entry.
    pub fn new(grid: GridMap, player: Player, config: SimConfig) -> Self {
        let mut sprites = SpriteRegistry::new();
        for (x, y, image) in grid.spawns() {
            let position = Vector::new(x as f32 + 0.5, y as f32 + 0.5);
            log::debug!("spawning object {image} at {position}");
            sprites.create(Sprite::object(position, image));
        }
        log::info!(
            "world ready: {}x{} grid, {} sprites, player at {}",
            grid.width(),
            grid.height(),
            sprites.count(),
            player.position
        );
        Self {
            grid,
            player,
            sprites,
            config,
        }
    }

    /// 6x6 walled room with one interior wall at (1, 1), player at the
    /// center of cell (2, 2) facing up.
    pub fn demo() -> Result<Self, SimError> {
        let mut grid = GridMap::bordered(6, 6, 1)?;
        grid.set_wall(1, 1, 2);
        let player = Player::new(Vector::new(2.5, 2.5), Vector::new(0.0, -1.0), 0.66);
        Ok(Self::new(grid, player, SimConfig::default()))
    }

    /// Advance one frame of `delta` seconds.
    pub fn update(&mut self, delta: f32) {
        let angle = self.config.rotate_speed * self.player.rotate_dir * delta;
        self.player.turn(angle);
        self.player.rotate_dir = 0.0;

        if let Some(velocity) = self.player.velocity(self.config.move_speed) {
            self.move_player(velocity * delta);
        }

        self.advance_sprites(delta);
    }

    fn move_player(&mut self, step: Vector) {
        let last = self.player.position;
        let grid = &self.grid;
        let mut step = resolve_axes(last, step, |p| grid.hits_wall(p));

        let radius = self.config.sprite_radius;
        for sprite in self.sprites.iter() {
            let near = |p: Vector| p.distance(sprite.position) <= radius;
            // Already overlapping: let the player walk out.
            if near(last) {
                continue;
            }
            if near(last + step) {
                // Walls still block, or dropping one axis could land in one.
                step = resolve_axes(last, step, |p| grid.hits_wall(p) || near(p));
            }
        }

        self.player.position = last + step;
    }

    fn advance_sprites(&mut self, delta: f32) {
        let mut expired = Vec::new();
        for (i, sprite) in self.sprites.iter_mut().enumerate() {
            if sprite.velocity == Vector::ZERO {
                continue;
            }
            sprite.position += sprite.velocity * delta;
            if sprite.kind == SpriteKind::Projectile && self.grid.hits_wall(sprite.position) {
                expired.push(i);
            }
        }

        // Highest index first so earlier indices stay valid.
        for i in expired.into_iter().rev() {
            if let Ok(sprite) = self.sprites.delete(i) {
                log::debug!("projectile hit wall at {}", sprite.position);
            }
        }
    }

    /// Fire a projectile from just ahead of the player along its facing.
    pub fn shoot(&mut self) {
        let direction = self.player.direction;
        let position = self.player.position + direction * self.config.projectile_spawn_offset;
        let velocity = direction * self.config.projectile_speed;
        self.sprites
            .create(Sprite::projectile(position, velocity, self.config.projectile_image));
        log::debug!("projectile fired from {position}");
    }

    pub fn raycaster(&self) -> Raycaster<'_> {
        let steps = self
            .config
            .ray_step_limit(self.grid.width(), self.grid.height());
        Raycaster::new(&self.grid, self.config.texture_width, steps)
    }

    /// Cast `ray` from the player's position.
    pub fn cast(&self, ray: Vector) -> RayHit {
        self.raycaster().cast(self.player.position, ray)
    }

    pub fn cast_column(&self, column: usize, screen_width: usize) -> RayHit {
        self.cast(self.player.ray_for_column(column, screen_width))
    }

    /// One hit per screen column, cast in parallel.
    pub fn cast_columns(&self, screen_width: usize) -> Vec<RayHit> {
        let caster = self.raycaster();
        let player = &self.player;
        (0..screen_width)
            .into_par_iter()
            .map(|column| caster.cast(player.position, player.ray_for_column(column, screen_width)))
            .collect()
    }

    /// Sprite indices ordered farthest to nearest from the player.
    pub fn sprites_by_distance(&self) -> Vec<usize> {
        let origin = self.player.position;
        let mut order: Vec<usize> = (0..self.sprites.count()).collect();
        let dist = |i: usize| {
            self.sprites
                .at(i)
                .map_or(0.0, |s| s.position.distance_squared(origin))
        };
        order.sort_by(|&a, &b| dist(b).total_cmp(&dist(a)));
        order
    }
}
