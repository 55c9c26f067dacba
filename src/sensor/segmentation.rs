use serde::{Deserialize, Serialize};

/// Pixel row/column address within one sensor chip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
}

/// Pixel-grid description of one monolithic sensor chip.
///
/// Rows run along the chip-local x axis, columns along z. The active
/// matrix is the physically sensitive area; the passive edges around it
/// belong to the readout periphery and never map to a pixel. All lengths
/// are centimeters.
///
/// The defaults describe the current sensor generation: 512 x 1024 pixels
/// at 26.88 um x 29.24 um pitch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChipSegmentation {
    pub n_rows: u32,
    pub n_cols: u32,
    pub pitch_row: f64,
    pub pitch_col: f64,
    /// Passive edge on the readout side (row direction).
    pub passive_edge_readout: f64,
    /// Passive edge opposite the readout (row direction).
    pub passive_edge_top: f64,
    /// Passive edge on either side (column direction).
    pub passive_edge_side: f64,
    pub sensor_thickness: f64,
}

impl Default for ChipSegmentation {
    fn default() -> Self {
        Self {
            n_rows: 512,
            n_cols: 1024,
            pitch_row: 26.88e-4,
            pitch_col: 29.24e-4,
            passive_edge_readout: 0.12,
            passive_edge_top: 37.44e-4,
            passive_edge_side: 29.12e-4,
            sensor_thickness: 30.0e-4,
        }
    }
}

impl ChipSegmentation {
    /// Extent of the active matrix along the row (x) direction.
    #[inline]
    pub fn active_size_rows(&self) -> f64 {
        self.n_rows as f64 * self.pitch_row
    }

    /// Extent of the active matrix along the column (z) direction.
    #[inline]
    pub fn active_size_cols(&self) -> f64 {
        self.n_cols as f64 * self.pitch_col
    }

    /// Full sensor extent along the row direction, passive edges included.
    pub fn sensor_size_rows(&self) -> f64 {
        self.active_size_rows() + self.passive_edge_top + self.passive_edge_readout
    }

    /// Full sensor extent along the column direction, passive edges included.
    pub fn sensor_size_cols(&self) -> f64 {
        self.active_size_cols() + 2.0 * self.passive_edge_side
    }

    pub fn n_pixels(&self) -> u64 {
        u64::from(self.n_rows) * u64::from(self.n_cols)
    }

    /// Raw chip-local to pixel-grid conversion without range checks.
    ///
    /// The row axis is inverted with respect to chip-local x: row 0 sits at
    /// the +x edge of the active matrix. Results may lie outside
    /// `[0, n_rows) x [0, n_cols)` for points off the active area.
    pub fn local_to_detector_unchecked(&self, x_row: f64, z_col: f64) -> (i64, i64) {
        let from_top = 0.5 * self.active_size_rows() - x_row;
        let from_left = z_col + 0.5 * self.active_size_cols();
        (
            (from_top / self.pitch_row).floor() as i64,
            (from_left / self.pitch_col).floor() as i64,
        )
    }

    /// Chip-local to pixel conversion; `None` when the point lies outside
    /// the active matrix.
    pub fn local_to_detector(&self, x_row: f64, z_col: f64) -> Option<Pixel> {
        let (row, col) = self.local_to_detector_unchecked(x_row, z_col);
        if row < 0 || row >= i64::from(self.n_rows) || col < 0 || col >= i64::from(self.n_cols) {
            return None;
        }
        Some(Pixel {
            row: row as u32,
            col: col as u32,
        })
    }

    /// Chip-local coordinates of the center of pixel (`row`, `col`), with
    /// no range check. Out-of-range indices extrapolate off the matrix.
    pub fn detector_to_local_unchecked(&self, row: i64, col: i64) -> (f64, f64) {
        let x = 0.5 * self.active_size_rows() - (row as f64 + 0.5) * self.pitch_row;
        let z = (col as f64 + 0.5) * self.pitch_col - 0.5 * self.active_size_cols();
        (x, z)
    }

    /// Chip-local coordinates of a pixel center; `None` for out-of-range
    /// indices.
    pub fn detector_to_local(&self, row: i64, col: i64) -> Option<(f64, f64)> {
        if row < 0 || row >= i64::from(self.n_rows) || col < 0 || col >= i64::from(self.n_cols) {
            return None;
        }
        Some(self.detector_to_local_unchecked(row, col))
    }

    /// Flattened pixel index. Row varies fastest: `idx = row + col * n_rows`.
    /// This convention is load-bearing for persisted pixel-index data.
    #[inline]
    pub fn linear_index(&self, pixel: Pixel) -> u64 {
        u64::from(pixel.row) + u64::from(pixel.col) * u64::from(self.n_rows)
    }

    /// Inverse of [`linear_index`](Self::linear_index).
    #[inline]
    pub fn index_to_pixel(&self, index: u64) -> Pixel {
        Pixel {
            row: (index % u64::from(self.n_rows)) as u32,
            col: (index / u64::from(self.n_rows)) as u32,
        }
    }
}
