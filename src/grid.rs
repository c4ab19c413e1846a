use crate::error::SimError;
use crate::vector::{Vector, cell_coord, is_grid_aligned};

/// Id reported for cells outside the grid. They block movement and rays but
/// carry no texture.
pub const OUTSIDE_ID: u32 = u32::MAX;

/// Static tile grid: wall texture ids plus the spawn table read once when a
/// world is built. `0` means passable / no spawn in both layers.
#[derive(Debug, Clone)]
pub struct GridMap {
    width: usize,
    height: usize,
    walls: Vec<u32>,
    objects: Vec<u32>,
}

impl GridMap {
    pub fn new(
        width: usize,
        height: usize,
        walls: Vec<u32>,
        objects: Vec<u32>,
    ) -> Result<Self, SimError> {
        if width == 0 || height == 0 {
            return Err(SimError::EmptyGrid);
        }
        let expected = width * height;
        for (layer, len) in [("wall", walls.len()), ("object", objects.len())] {
            if len != expected {
                return Err(SimError::GridShape {
                    layer,
                    expected,
                    actual: len,
                });
            }
        }
        Ok(Self {
            width,
            height,
            walls,
            objects,
        })
    }

    /// Empty room whose outer ring of cells is painted with `wall_id`.
    pub fn bordered(width: usize, height: usize, wall_id: u32) -> Result<Self, SimError> {
        let cells = width * height;
        let mut grid = Self::new(width, height, vec![0; cells], vec![0; cells])?;
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    grid.walls[x + y * width] = wall_id;
                }
            }
        }
        Ok(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(x as usize + y as usize * self.width)
    }

    /// Wall id of cell `(x, y)`; `OUTSIDE_ID` past the grid edge.
    #[inline]
    pub fn wall_id_at(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(OUTSIDE_ID, |i| self.walls[i])
    }

    /// Sprite image to spawn at cell `(x, y)`, `0` for none.
    pub fn spawn_at(&self, x: i32, y: i32) -> u32 {
        self.index(x, y).map_or(0, |i| self.objects[i])
    }

    /// Returns false (and leaves the grid untouched) for out-of-range cells.
    pub fn set_wall(&mut self, x: i32, y: i32, id: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.walls[i] = id;
                true
            }
            None => false,
        }
    }

    pub fn set_spawn(&mut self, x: i32, y: i32, image: u32) -> bool {
        match self.index(x, y) {
            Some(i) => {
                self.objects[i] = image;
                true
            }
            None => false,
        }
    }

    /// Wall membership of a point that may sit on grid lines.
    ///
    /// A point on a vertical line also checks the cell to its left, one on a
    /// horizontal line the cell above, and one on a corner all four cells
    /// around it. The first blocking cell in that order wins; `0` if none.
    pub fn wall_at(&self, v: Vector) -> u32 {
        let x_on_line = is_grid_aligned(v.x);
        let y_on_line = is_grid_aligned(v.y);
        let (cx, cy) = (cell_coord(v.x), cell_coord(v.y));

        let candidates = [
            (cx, cy, true),
            (cx - 1, cy, x_on_line),
            (cx, cy - 1, y_on_line),
            (cx - 1, cy - 1, x_on_line && y_on_line),
        ];
        candidates
            .into_iter()
            .filter(|&(_, _, active)| active)
            .map(|(x, y, _)| self.wall_id_at(x, y))
            .find(|&id| id != 0)
            .unwrap_or(0)
    }

    #[inline]
    pub fn hits_wall(&self, v: Vector) -> bool {
        self.wall_at(v) != 0
    }

    /// Non-zero spawn entries as `(cell_x, cell_y, image)`, row-major order.
    pub fn spawns(&self) -> impl Iterator<Item = (usize, usize, u32)> + '_ {
        self.objects
            .iter()
            .enumerate()
            .filter(|&(_, &image)| image != 0)
            .map(|(i, &image)| (i % self.width, i / self.width, image))
    }
}
