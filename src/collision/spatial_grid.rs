use crate::core::NodeHandle;
use crate::math::Vector2;
use log::warn;
use std::collections::HashSet;

/// Safety valve for the segment cell traversal; a well-formed grid never
/// comes close to this many cells.
const MAX_SEGMENT_CELLS: u32 = 1000;

/// A uniform grid spatial index over the simulation area.
///
/// The grid is rebuilt (cleared and repopulated) once per sub-step and never
/// updated incrementally, so bucket contents always match current node
/// positions. Queries are conservative: the 3x3 neighborhood of a cell may
/// contain false positives for the narrow phase to reject, and positions
/// outside the area clamp to the border cells.
pub struct SpatialGrid {
    /// The side length of a grid cell
    cell_size: f32,

    /// The number of cell columns
    cols: usize,

    /// The number of cell rows
    rows: usize,

    /// The node buckets, row-major
    buckets: Vec<Vec<NodeHandle>>,
}

impl SpatialGrid {
    /// Creates a grid covering `width` x `height` with the given cell size
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cell_size = cell_size.max(crate::math::EPSILON);
        let cols = ((width / cell_size).ceil() as usize).max(1);
        let rows = ((height / cell_size).ceil() as usize).max(1);

        Self {
            cell_size,
            cols,
            rows,
            buckets: vec![Vec::new(); cols * rows],
        }
    }

    /// Returns the grid's cell size
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Returns the number of cell columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of cell rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Maps a world position to clamped cell coordinates
    fn cell_of(&self, position: Vector2) -> (usize, usize) {
        let col = ((position.x / self.cell_size).floor() as i64).clamp(0, self.cols as i64 - 1);
        let row = ((position.y / self.cell_size).floor() as i64).clamp(0, self.rows as i64 - 1);
        (col as usize, row as usize)
    }

    /// Inserts a node into the bucket for its position
    pub fn insert(&mut self, handle: NodeHandle, position: Vector2) {
        let (col, row) = self.cell_of(position);
        self.buckets[row * self.cols + col].push(handle);
    }

    /// Empties every bucket; called once per sub-step before repopulation
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
    }

    /// Returns all nodes in the 3x3 block of cells around `position`.
    ///
    /// This includes the querying node itself when it has been inserted.
    pub fn nearby(&self, position: Vector2) -> Vec<NodeHandle> {
        let (col, row) = self.cell_of(position);
        let mut result = Vec::new();
        self.collect_block(col, row, &mut result);
        result
    }

    /// Returns all nodes near the segment from `a` to `b`, de-duplicated.
    ///
    /// Walks the cells intersected by the segment with integer Bresenham
    /// stepping and unions the 3x3 neighborhood of every cell on the path.
    /// A traversal exceeding the step cap is truncated with a warning and
    /// yields a partial candidate set for this sub-step.
    pub fn nodes_near_segment(&self, a: Vector2, b: Vector2) -> Vec<NodeHandle> {
        let (col_a, row_a) = self.cell_of(a);
        let (col_b, row_b) = self.cell_of(b);

        let mut x = col_a as i64;
        let mut y = row_a as i64;
        let x_end = col_b as i64;
        let y_end = row_b as i64;

        let dx = (x_end - x).abs();
        let dy = -(y_end - y).abs();
        let step_x = if x < x_end { 1 } else { -1 };
        let step_y = if y < y_end { 1 } else { -1 };
        let mut error = dx + dy;

        let mut seen = HashSet::new();
        let mut result = Vec::new();
        let mut collected = Vec::new();
        let mut steps = 0;

        loop {
            collected.clear();
            self.collect_block(x as usize, y as usize, &mut collected);
            for handle in &collected {
                if seen.insert(*handle) {
                    result.push(*handle);
                }
            }

            if x == x_end && y == y_end {
                break;
            }

            steps += 1;
            if steps > MAX_SEGMENT_CELLS {
                warn!(
                    "segment grid traversal exceeded {} cells, truncating candidate set",
                    MAX_SEGMENT_CELLS
                );
                break;
            }

            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
        }

        result
    }

    /// Pushes the contents of the 3x3 block around a cell into `out`
    fn collect_block(&self, col: usize, row: usize, out: &mut Vec<NodeHandle>) {
        let col_start = col.saturating_sub(1);
        let row_start = row.saturating_sub(1);
        let col_end = (col + 1).min(self.cols - 1);
        let row_end = (row + 1).min(self.rows - 1);

        for r in row_start..=row_end {
            for c in col_start..=col_end {
                out.extend_from_slice(&self.buckets[r * self.cols + c]);
            }
        }
    }
}
