//////////////////////////////////////////////////////////////////////
// tile colors: one row per group of congruent tiles, shaded from a
// left to a right color across the slots of the row

use crate::geometry::{Vec3d, MAX_DIM};

// gray tile outline
pub const EDGE_COLOR: [f64; 3] = [128.0 / 255.0, 128.0 / 255.0, 128.0 / 255.0];

// page background
pub const BACKGROUND_COLOR: [f64; 3] = [1.0, 1.0, 1.0];

const COLOR_ROWS: usize = MAX_DIM / 2;

const LOW: f64 = 80.0;

#[derive(Debug, Clone)]
pub struct Palette {
    // [row][left, right] in 0..255
    table: [[Vec3d; 2]; COLOR_ROWS],
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}

impl Palette {

    pub fn new() -> Self {

        let mut table = [[Vec3d::zeros(); 2]; COLOR_ROWS];

        for (row, colors) in table.iter_mut().enumerate() {

            let v = 255.0 - 15.0 * row as f64;

            *colors = match row % 3 {
                0 => [Vec3d::new(v, LOW, LOW), Vec3d::new(LOW, LOW, v)],
                1 => [Vec3d::new(LOW, v, LOW), Vec3d::new(LOW, v, v)],
                _ => [Vec3d::new(v, LOW, v), Vec3d::new(v, v, LOW)],
            };

        }

        Palette { table }

    }

    // color of a tile slot for a tiling of dimension dims, rgb in 0..1;
    // slots are laid out dims per row, the last row of an even
    // dimension holding only dims / 2 of them
    pub fn tile_color(&self, dims: usize, slot: usize) -> Vec3d {

        let row = slot / dims;
        let col = slot % dims;

        if row >= COLOR_ROWS {
            return Vec3d::zeros();
        }

        let row_count = if dims % 2 == 0 && row + 1 >= dims / 2 {
            dims / 2 - 1
        } else {
            dims - 1
        };

        let cof = if row_count > 0 {
            col as f64 / row_count as f64
        } else {
            0.0
        };

        let [left, right] = self.table[row];

        (left * (1.0 - cof) + right * cof) / 255.0

    }

}
