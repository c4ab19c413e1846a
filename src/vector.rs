pub use glam::Vec2 as Vector;

/// Tolerance used when deciding whether a coordinate sits on a grid line.
pub const GRID_EPSILON: f32 = 1e-4;

/// Rotate `v` counter-clockwise by `angle` radians about the origin.
#[inline]
pub fn rotate(v: Vector, angle: f32) -> Vector {
    let (s, c) = angle.sin_cos();
    Vector::new(v.x * c - v.y * s, v.x * s + v.y * c)
}

#[inline]
pub fn is_grid_aligned(f: f32) -> bool {
    (f - f.round()).abs() < GRID_EPSILON
}

/// Integer cell coordinate of `f`. Values within `GRID_EPSILON` of a grid
/// line resolve to that line rather than to the cell below it.
#[inline]
pub fn cell_coord(f: f32) -> i32 {
    if is_grid_aligned(f) {
        f.round() as i32
    } else {
        f.floor() as i32
    }
}

/// Pull near-integral components onto the exact grid line.
#[inline]
pub fn snap(v: Vector) -> Vector {
    let s = |f: f32| if is_grid_aligned(f) { f.round() } else { f };
    Vector::new(s(v.x), s(v.y))
}

/// Offset of `f` from the grid line at or below it, in `[0, 1)`.
#[inline]
pub fn frac(f: f32) -> f32 {
    f - f.floor()
}
