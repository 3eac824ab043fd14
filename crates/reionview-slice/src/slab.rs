//! Physical-coordinate slab mapping
//!
//! A [`SliceSpec`] names cell index ranges; a [`Slab`] is the corresponding
//! region of physical space, obtained by placing the cell edges at
//! `linspace(0, box_len, dim + 1)`.

use crate::ast::{Axis, RangeOutOfBounds, SliceSpec};
use serde::{Deserialize, Serialize};

/// The region of physical space selected by a slice specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    /// Per-axis `(lower, upper)` bounds in physical units, x, y, z order
    bounds: [(f64, f64); 3],
}

impl Slab {
    /// Map a validated slice specification to physical bounds.
    pub fn from_spec(
        spec: &SliceSpec,
        dim: usize,
        box_len: f64,
    ) -> Result<Self, RangeOutOfBounds> {
        spec.validate(dim)?;

        let edge = |cell: usize| box_len * cell as f64 / dim as f64;
        let mut bounds = [(0.0, 0.0); 3];
        for (axis, range) in spec.iter() {
            bounds[axis.index()] = (edge(range.start), edge(range.stop));
        }
        Ok(Self { bounds })
    }

    /// Bounds on one axis
    pub fn bounds(&self, axis: Axis) -> (f64, f64) {
        self.bounds[axis.index()]
    }

    /// Physical extent covered on one axis
    pub fn extent(&self, axis: Axis) -> f64 {
        let (lower, upper) = self.bounds[axis.index()];
        upper - lower
    }

    /// Test whether a position lies inside the slab on all three axes.
    ///
    /// The lower bound is exclusive and the upper bound inclusive, so a point
    /// sitting exactly on a cell edge belongs to the slab ending there, not
    /// the one starting there.
    pub fn contains(&self, pos: &[f64; 3]) -> bool {
        (0..3).all(|i| {
            let (lower, upper) = self.bounds[i];
            pos[i] > lower && pos[i] <= upper
        })
    }
}
