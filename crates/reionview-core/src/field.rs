//! The 3D neutral-fraction grid
//!
//! A [`ScalarField`] owns the cubic grid of per-cell neutral hydrogen
//! fractions together with the comoving box length it spans. Values live in
//! `[0, 1]`; the ionized fraction of a cell is `1 - value`.

use crate::error::{SliceError, SliceResult};
use ndarray::Array3;

/// A cubic scalar grid spanning `[0, box_len)` on each axis
#[derive(Debug, Clone)]
pub struct ScalarField {
    data: Array3<f64>,
    box_len: f64,
}

impl ScalarField {
    /// Wrap a grid; the array must be cubic and the box length positive.
    pub fn new(data: Array3<f64>, box_len: f64) -> SliceResult<Self> {
        let shape = data.shape();
        let (nx, ny, nz) = (shape[0], shape[1], shape[2]);
        if nx != ny || ny != nz {
            return Err(SliceError::NotCubic { nx, ny, nz });
        }
        if !(box_len > 0.0) {
            return Err(SliceError::InvalidBoxLen(box_len));
        }
        Ok(Self { data, box_len })
    }

    /// Side length of the grid in cells
    pub fn dim(&self) -> usize {
        self.data.shape()[0]
    }

    /// Comoving box length
    pub fn box_len(&self) -> f64 {
        self.box_len
    }

    /// Physical size of one cell
    pub fn cell_size(&self) -> f64 {
        self.box_len / self.dim() as f64
    }

    /// The underlying grid
    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    /// Map a physical position to the cell containing it.
    ///
    /// The index is `floor(pos / box_len * dim)` per axis, clamped into
    /// `[0, dim)`. The clamp matters for a position sitting exactly at
    /// `box_len`, which would otherwise floor to `dim` and index past the
    /// grid.
    pub fn cell_of(&self, pos: &[f64; 3]) -> [usize; 3] {
        let dim = self.dim();
        let mut cell = [0usize; 3];
        for i in 0..3 {
            let idx = (pos[i] / self.box_len * dim as f64).floor() as usize;
            cell[i] = idx.min(dim - 1);
        }
        cell
    }

    /// Field value at a cell
    pub fn value_at(&self, cell: [usize; 3]) -> f64 {
        self.data[cell]
    }

    /// Field value at the cell containing a physical position
    pub fn sample(&self, pos: &[f64; 3]) -> f64 {
        self.value_at(self.cell_of(pos))
    }
}
