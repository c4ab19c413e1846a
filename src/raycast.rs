//! Grid DDA raycasting.
//!
//! The ray walks from grid line to grid line. Each step goes to whichever of
//! the next vertical or horizontal line is nearer along the ray, x first on a
//! tie, and the coordinate of the line it targeted is written exactly so that
//! alignment never depends on accumulated float error.

use crate::grid::{GridMap, OUTSIDE_ID};
use crate::vector::{Vector, frac, is_grid_aligned, snap};

/// What a single column needs to draw its wall slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Distance along the ray's own axis, already perspective corrected when
    /// the ray is built from the camera plane.
    pub wall_distance: f32,
    pub texture_x: u32,
    /// Hit a vertical grid line (constant x).
    pub x_sided: bool,
    /// Texture id of the struck wall, `0` when the ray left the grid or ran
    /// out of steps.
    pub hit_id: u32,
    pub point: Vector,
}

impl RayHit {
    pub fn is_hit(&self) -> bool {
        self.hit_id != 0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Raycaster<'a> {
    grid: &'a GridMap,
    texture_width: u32,
    max_steps: usize,
}

/// Next grid line from `c` when moving in the direction of `dir`.
#[inline]
fn next_line(c: f32, dir: f32) -> f32 {
    if is_grid_aligned(c) {
        c.round() + dir.signum()
    } else if dir > 0.0 {
        c.floor() + 1.0
    } else {
        c.floor()
    }
}

impl<'a> Raycaster<'a> {
    pub fn new(grid: &'a GridMap, texture_width: u32, max_steps: usize) -> Self {
        assert!(texture_width > 0, "texture width must be non-zero");
        Self {
            grid,
            texture_width,
            max_steps,
        }
    }

    /// Walk the ray until it is inside a wall. Returns the stop point, the
    /// raw wall id found there and the number of steps taken.
    fn march(&self, origin: Vector, ray: Vector) -> (Vector, u32, usize) {
        let mut current = origin;
        let mut steps = 0;

        loop {
            let id = self.grid.wall_at(current);
            if id != 0 {
                return (current, id, steps);
            }
            if steps >= self.max_steps {
                log::trace!("ray from {origin} along {ray} exhausted {steps} steps");
                return (current, 0, steps);
            }

            // Parameter along the ray to the next vertical / horizontal line.
            let x_step = (ray.x != 0.0).then(|| {
                let target = next_line(current.x, ray.x);
                (target, (target - current.x) / ray.x)
            });
            let y_step = (ray.y != 0.0).then(|| {
                let target = next_line(current.y, ray.y);
                (target, (target - current.y) / ray.y)
            });

            current = match (x_step, y_step) {
                (Some((tx, _)), None) => Vector::new(tx, current.y),
                (None, Some((ty, _))) => Vector::new(current.x, ty),
                (Some((tx, t_x)), Some((_, t_y))) if t_x <= t_y => {
                    snap(Vector::new(tx, current.y + ray.y * t_x))
                }
                (Some(_), Some((ty, t_y))) => snap(Vector::new(current.x + ray.x * t_y, ty)),
                (None, None) => unreachable!("degenerate ray rejected by cast"),
            };
            steps += 1;
        }
    }

    /// Cast `ray` from `origin`. `ray` need not be normalized but must not be
    /// the zero vector.
    pub fn cast(&self, origin: Vector, ray: Vector) -> RayHit {
        assert!(ray.x != 0.0 || ray.y != 0.0, "cannot cast a zero-length ray");

        let (point, raw_id, steps) = self.march(origin, ray);
        let hit_id = if raw_id == OUTSIDE_ID { 0 } else { raw_id };

        // A ray running along one axis can only ever strike the other one.
        let x_sided = if ray.x == 0.0 {
            false
        } else if ray.y == 0.0 {
            true
        } else {
            is_grid_aligned(point.x)
        };

        let wall_distance = if steps == 0 {
            0.0
        } else if x_sided {
            (point.x - origin.x) / ray.x
        } else {
            (point.y - origin.y) / ray.y
        };

        let offset = if x_sided { frac(point.y) } else { frac(point.x) };
        let width = self.texture_width;
        let column = ((offset * width as f32) as u32).min(width - 1);
        let texture_x = if (x_sided && ray.x > 0.0) || (!x_sided && ray.y < 0.0) {
            width - 1 - column
        } else {
            column
        };

        RayHit {
            wall_distance,
            texture_x,
            x_sided,
            hit_id,
            point,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEX: u32 = 64;

    fn room() -> GridMap {
        GridMap::bordered(7, 7, 1).unwrap()
    }

    fn cast(grid: &GridMap, origin: (f32, f32), ray: (f32, f32)) -> RayHit {
        let (origin, ray) = (Vector::new(origin.0, origin.1), Vector::new(ray.0, ray.1));
        Raycaster::new(grid, TEX, 64).cast(origin, ray)
    }

    #[test]
    fn straight_ray_hits_border() {
        let g = room();
        let hit = cast(&g, (3.5, 3.5), (0.0, -1.0));
        assert_eq!(hit.hit_id, 1);
        assert!(!hit.x_sided);
        assert!((hit.wall_distance - 2.5).abs() < 1e-6);
        assert_eq!(hit.point, Vector::new(3.5, 1.0));
    }

    #[test]
    fn distance_is_measured_along_ray_axis() {
        let g = room();
        // Unnormalized ray: distance is in units of the ray vector.
        let hit = cast(&g, (3.5, 3.5), (2.0, 0.0));
        assert!(hit.x_sided);
        assert!((hit.wall_distance - 1.25).abs() < 1e-6);
    }

    #[test]
    fn corner_wall_found_from_several_angles() {
        let mut g = room();
        g.set_wall(2, 3, 9);
        for (origin, ray) in [
            ((1.5, 1.5), (1.0, 1.0)),
            ((4.5, 1.5), (-1.0, 1.0)),
            ((3.0, 1.5), (0.0, 1.0)),
            ((5.5, 3.0), (-1.0, 0.0)),
        ] {
            let hit = cast(&g, origin, ray);
            assert_eq!(hit.hit_id, 9, "origin {origin:?} ray {ray:?}");
            assert_eq!(hit.point, Vector::new(3.0, 3.0), "origin {origin:?} ray {ray:?}");
        }
    }

    #[test]
    fn ray_along_grid_line_keeps_finite_distance() {
        let mut g = room();
        g.set_wall(2, 3, 9);
        let hit = cast(&g, (3.0, 1.5), (0.0, 1.0));
        assert!(!hit.x_sided);
        assert!((hit.wall_distance - 1.5).abs() < 1e-6);
    }

    #[test]
    fn distance_shrinks_moving_toward_wall() {
        let g = room();
        let ray = Vector::new(0.3, -1.0);
        let caster = Raycaster::new(&g, TEX, 64);
        let mut last = f32::INFINITY;
        for k in 0..8 {
            let origin = Vector::new(2.2, 5.5) + ray * (k as f32 * 0.5);
            let hit = caster.cast(origin, ray);
            assert!(hit.wall_distance < last, "step {k}: {} !< {last}", hit.wall_distance);
            last = hit.wall_distance;
        }
    }

    #[test]
    fn opposite_approaches_mirror_texture_column() {
        let g = room();
        let east = cast(&g, (2.5, 2.25), (1.0, 0.0));
        let west = cast(&g, (4.5, 2.25), (-1.0, 0.0));
        assert!(east.x_sided && west.x_sided);
        assert_eq!(west.texture_x, 16);
        assert_eq!(east.texture_x, TEX - 1 - west.texture_x);

        let south = cast(&g, (2.25, 2.5), (0.0, 1.0));
        let north = cast(&g, (2.25, 4.5), (0.0, -1.0));
        assert_eq!(south.texture_x, 16);
        assert_eq!(north.texture_x, TEX - 1 - south.texture_x);
    }

    #[test]
    fn origin_inside_wall_returns_immediately() {
        let g = room();
        let hit = cast(&g, (0.5, 3.5), (1.0, 0.3));
        assert_eq!(hit.hit_id, 1);
        assert_eq!(hit.wall_distance, 0.0);
        assert_eq!(hit.point, Vector::new(0.5, 3.5));
    }

    #[test]
    fn open_grid_stops_at_world_edge_without_texture() {
        let g = GridMap::new(4, 4, vec![0; 16], vec![0; 16]).unwrap();
        let hit = cast(&g, (1.5, 1.5), (1.0, 0.0));
        assert!(!hit.is_hit());
        assert_eq!(hit.point, Vector::new(4.0, 1.5));
        assert!((hit.wall_distance - 2.5).abs() < 1e-6);
    }

    #[test]
    fn step_limit_bounds_the_walk() {
        let g = room();
        let hit = Raycaster::new(&g, TEX, 1).cast(Vector::new(3.5, 3.5), Vector::new(0.0, -1.0));
        assert!(!hit.is_hit());
        assert_eq!(hit.point, Vector::new(3.5, 3.0));
    }

    #[test]
    #[should_panic(expected = "zero-length ray")]
    fn zero_ray_fails_fast() {
        let g = room();
        cast(&g, (3.5, 3.5), (0.0, 0.0));
    }
}
