//! Slice specification types
//!
//! This module defines the types produced by the slice grammar parser.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A spatial axis of the simulation box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in fixed x, y, z order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Numeric index of the axis (x = 0, y = 1, z = 2)
    pub fn index(&self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Axis from a numeric index
    pub fn from_index(index: usize) -> Option<Axis> {
        Axis::ALL.get(index).copied()
    }

    /// Display name of the axis
    pub fn name(&self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }

    /// The two axes spanning the plane orthogonal to this axis,
    /// in fixed x, y, z order.
    pub fn plane_axes(&self) -> [Axis; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A half-open cell index interval `[start, stop)` on one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisRange {
    pub start: usize,
    pub stop: usize,
}

impl AxisRange {
    /// Create a range; `stop` must be strictly greater than `start`.
    pub fn new(start: usize, stop: usize) -> Option<Self> {
        if stop > start {
            Some(Self { start, stop })
        } else {
            None
        }
    }

    /// The full axis `[0, dim)`
    pub fn full(dim: usize) -> Self {
        Self { start: 0, stop: dim }
    }

    /// A single cell `[index, index + 1)`
    pub fn single(index: usize) -> Self {
        Self {
            start: index,
            stop: index + 1,
        }
    }

    /// Number of cells covered
    pub fn width(&self) -> usize {
        self.stop - self.start
    }

    /// True if the range selects exactly one cell
    pub fn is_plane(&self) -> bool {
        self.width() == 1
    }
}

/// A range whose bounds exceed the grid dimension
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{axis} axis range {start}:{stop} exceeds grid dimension {dim}")]
pub struct RangeOutOfBounds {
    pub axis: Axis,
    pub start: usize,
    pub stop: usize,
    pub dim: usize,
}

/// An ordered triple of axis ranges, one per spatial axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceSpec {
    ranges: [AxisRange; 3],
}

impl SliceSpec {
    /// Build a spec from three ranges in x, y, z order
    pub fn new(ranges: [AxisRange; 3]) -> Self {
        Self { ranges }
    }

    /// The spec selecting the entire box
    pub fn full(dim: usize) -> Self {
        Self {
            ranges: [AxisRange::full(dim); 3],
        }
    }

    /// Range on one axis
    pub fn range(&self, axis: Axis) -> AxisRange {
        self.ranges[axis.index()]
    }

    /// All three ranges in x, y, z order
    pub fn ranges(&self) -> &[AxisRange; 3] {
        &self.ranges
    }

    /// Iterate `(axis, range)` pairs in fixed x, y, z order
    pub fn iter(&self) -> impl Iterator<Item = (Axis, AxisRange)> + '_ {
        Axis::ALL.iter().map(move |&a| (a, self.ranges[a.index()]))
    }

    /// Axes whose range selects a single cell
    pub fn plane_axes(&self) -> Vec<Axis> {
        self.iter()
            .filter(|(_, r)| r.is_plane())
            .map(|(a, _)| a)
            .collect()
    }

    /// Check every range against the grid dimension.
    ///
    /// The parser deliberately does not clamp `stop`, so a spec such as
    /// `"0:300"` on a 256 grid parses fine and is rejected here.
    pub fn validate(&self, dim: usize) -> Result<(), RangeOutOfBounds> {
        for (axis, range) in self.iter() {
            if range.stop > dim {
                return Err(RangeOutOfBounds {
                    axis,
                    start: range.start,
                    stop: range.stop,
                    dim,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_order() {
        assert_eq!(Axis::ALL.map(|a| a.index()), [0, 1, 2]);
        assert_eq!(Axis::from_index(2), Some(Axis::Z));
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn test_plane_axes() {
        assert_eq!(Axis::Z.plane_axes(), [Axis::X, Axis::Y]);
        assert_eq!(Axis::X.plane_axes(), [Axis::Y, Axis::Z]);
    }

    #[test]
    fn test_axis_range_new_rejects_empty() {
        assert!(AxisRange::new(5, 5).is_none());
        assert!(AxisRange::new(5, 2).is_none());
        assert_eq!(AxisRange::new(5, 6), Some(AxisRange::single(5)));
    }

    #[test]
    fn test_axis_range_width() {
        assert_eq!(AxisRange::full(256).width(), 256);
        assert_eq!(AxisRange::single(10).width(), 1);
        assert!(AxisRange::single(10).is_plane());
    }

    #[test]
    fn test_spec_validate() {
        let spec = SliceSpec::full(256);
        assert!(spec.validate(256).is_ok());

        let err = spec.validate(128).unwrap_err();
        assert_eq!(err.axis, Axis::X);
        assert_eq!(err.dim, 128);
    }

    #[test]
    fn test_spec_validate_names_offending_axis() {
        let spec = SliceSpec::new([
            AxisRange::full(64),
            AxisRange::full(64),
            AxisRange { start: 60, stop: 70 },
        ]);
        let err = spec.validate(64).unwrap_err();
        assert_eq!(err.axis, Axis::Z);
        assert_eq!(err.stop, 70);
    }

    #[test]
    fn test_spec_plane_axes() {
        let spec = SliceSpec::new([
            AxisRange::full(256),
            AxisRange::single(10),
            AxisRange::full(256),
        ]);
        assert_eq!(spec.plane_axes(), vec![Axis::Y]);
    }
}
