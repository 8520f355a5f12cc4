//! Fixed simulation grid
//!
//! All three solvers share one logical 2D grid. Fields are stored flat in
//! row-major order, `idx = j * NX + i`, where `i` runs along x and `j` along y.

/// Grid width in cells
pub const NX: usize = 20;

/// Grid height in cells
pub const NY: usize = 20;

/// Total number of cells in every field
pub const CELL_COUNT: usize = NX * NY;

/// Cell spacing (length units, treated as metres)
pub const DX: f64 = 0.1;

/// Thermal time step (seconds)
pub const DT: f64 = 0.1;

/// Flat row-major index of cell `(i, j)`
#[inline]
#[must_use]
pub const fn idx(i: usize, j: usize) -> usize {
    j * NX + i
}

/// Panel area covered by the grid (`NX·NY·DX²`)
#[must_use]
pub fn panel_area() -> f64 {
    CELL_COUNT as f64 * DX * DX
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_row_major_index() {
        assert_eq!(idx(0, 0), 0);
        assert_eq!(idx(3, 0), 3);
        assert_eq!(idx(0, 1), NX);
        assert_eq!(idx(NX - 1, NY - 1), CELL_COUNT - 1);
    }

    #[test]
    fn test_panel_area() {
        assert_relative_eq!(panel_area(), 4.0, epsilon = 1e-12);
    }
}
