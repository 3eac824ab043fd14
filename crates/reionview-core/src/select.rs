//! Grid selection
//!
//! Reduces the 3D field to the plane named by a slice specification. Axes
//! whose range covers a single cell are squeezed away; if every axis stays
//! wider than one cell the block is averaged along its thinnest axis so the
//! result can still be displayed as a plane.

use crate::error::SliceResult;
use crate::field::ScalarField;
use ndarray::{s, ArrayD, ArrayView2, Axis as NdAxis, Ix2};
use reionview_slice::{Axis, SliceSpec};

/// The field restricted to a slice specification
#[derive(Debug, Clone)]
pub struct ReducedField {
    values: ArrayD<f64>,
    slice_axis: Axis,
}

impl ReducedField {
    /// The reduced values; rank 2 for a plane, lower for degenerate slices
    pub fn values(&self) -> &ArrayD<f64> {
        &self.values
    }

    /// The axis orthogonal to the displayed plane
    pub fn slice_axis(&self) -> Axis {
        self.slice_axis
    }

    /// Number of remaining dimensions
    pub fn rank(&self) -> usize {
        self.values.ndim()
    }

    /// Shape of the remaining dimensions
    pub fn shape(&self) -> &[usize] {
        self.values.shape()
    }

    /// View the result as a 2D plane, if it is one
    pub fn as_plane(&self) -> Option<ArrayView2<'_, f64>> {
        self.values.view().into_dimensionality::<Ix2>().ok()
    }
}

/// Extract the slab selected by `spec` and collapse it to a plane.
///
/// The slice axis is the axis with the smallest selected extent (the lowest
/// such axis on ties). Width-1 axes are squeezed; a block that is still 3D
/// afterwards is averaged along the slice axis, which keeps values inside
/// `[0, 1]`. Two or three width-1 axes leave a rank-1 or rank-0 result,
/// which is degenerate but valid here; rendering is where it gets refused.
pub fn extract_slice(field: &ScalarField, spec: &SliceSpec) -> SliceResult<ReducedField> {
    spec.validate(field.dim())?;

    let [rx, ry, rz] = *spec.ranges();
    let view = field.data().slice(s![
        rx.start..rx.stop,
        ry.start..ry.stop,
        rz.start..rz.stop
    ]);

    let shape = [view.shape()[0], view.shape()[1], view.shape()[2]];
    // argmin over the sliced shape; ties go to the lowest axis index
    let mut slice_axis_idx = 0;
    for i in 1..3 {
        if shape[i] < shape[slice_axis_idx] {
            slice_axis_idx = i;
        }
    }
    let slice_axis = Axis::ALL[slice_axis_idx];

    let mut values: ArrayD<f64> = view.to_owned().into_dyn();

    // Squeeze width-1 axes, highest index first so the remaining positions
    // stay valid.
    for i in (0..3).rev() {
        if shape[i] == 1 {
            values = values.index_axis_move(NdAxis(i), 0);
        }
    }

    // Nothing was squeezed: average the block along its thinnest axis.
    if values.ndim() == 3 {
        let n = shape[slice_axis_idx] as f64;
        values = values.sum_axis(NdAxis(slice_axis_idx)) / n;
    }

    Ok(ReducedField { values, slice_axis })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;
    use reionview_slice::parse_slice_spec;

    fn field_from_fn(dim: usize, f: impl Fn(usize, usize, usize) -> f64) -> ScalarField {
        let data = Array3::from_shape_fn((dim, dim, dim), |(x, y, z)| f(x, y, z));
        ScalarField::new(data, dim as f64).unwrap()
    }

    #[test]
    fn test_single_plane_z() {
        let field = field_from_fn(256, |_, _, z| if z == 10 { 1.0 } else { 0.0 });
        let spec = parse_slice_spec(":,:,10", 256).unwrap();

        let reduced = extract_slice(&field, &spec).unwrap();
        assert_eq!(reduced.shape(), &[256, 256]);
        assert_eq!(reduced.slice_axis(), Axis::Z);
        let plane = reduced.as_plane().unwrap();
        assert!((plane[[0, 0]] - 1.0).abs() < 1e-12);
        assert!((plane[[255, 127]] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_plane_x() {
        let field = field_from_fn(32, |x, _, _| x as f64 / 32.0);
        let spec = parse_slice_spec("7,:,:", 32).unwrap();

        let reduced = extract_slice(&field, &spec).unwrap();
        assert_eq!(reduced.slice_axis(), Axis::X);
        assert_eq!(reduced.shape(), &[32, 32]);
        let plane = reduced.as_plane().unwrap();
        assert!((plane[[3, 5]] - 7.0 / 32.0).abs() < 1e-12);
    }

    #[test]
    fn test_thick_slab_is_averaged() {
        // y index as value; selected y range 0..4 averages to 1.5
        let field = field_from_fn(8, |_, y, _| y as f64);
        let spec = parse_slice_spec("0:8,0:4,0:6", 8).unwrap();

        let reduced = extract_slice(&field, &spec).unwrap();
        assert_eq!(reduced.slice_axis(), Axis::Y);
        assert_eq!(reduced.shape(), &[8, 6]);
        let plane = reduced.as_plane().unwrap();
        for v in plane.iter() {
            assert!((v - 1.5).abs() < 1e-12);
        }
    }

    #[test]
    fn test_all_wide_always_rank_two() {
        let field = field_from_fn(8, |_, _, _| 0.5);
        let spec = parse_slice_spec(":,:,:", 8).unwrap();

        let reduced = extract_slice(&field, &spec).unwrap();
        assert_eq!(reduced.rank(), 2);
        // Equal extents tie-break to the lowest axis
        assert_eq!(reduced.slice_axis(), Axis::X);
    }

    #[test]
    fn test_mean_stays_in_unit_interval() {
        let field = field_from_fn(8, |x, y, z| ((x + y + z) % 2) as f64);
        let spec = parse_slice_spec(":,:,0:2", 8).unwrap();

        let reduced = extract_slice(&field, &spec).unwrap();
        for v in reduced.values().iter() {
            assert!((0.0..=1.0).contains(v));
        }
    }

    #[test]
    fn test_degenerate_line_and_point() {
        let field = field_from_fn(8, |_, _, _| 0.25);

        let line = extract_slice(&field, &parse_slice_spec("3,4,:", 8).unwrap()).unwrap();
        assert_eq!(line.rank(), 1);
        assert!(line.as_plane().is_none());

        let point = extract_slice(&field, &parse_slice_spec("3,4,5", 8).unwrap()).unwrap();
        assert_eq!(point.rank(), 0);
    }

    #[test]
    fn test_out_of_bounds_spec_rejected() {
        let field = field_from_fn(8, |_, _, _| 0.0);
        let spec = parse_slice_spec(":,:,0:9", 8).unwrap();
        assert!(extract_slice(&field, &spec).is_err());
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let field = field_from_fn(16, |x, y, z| ((x * 31 + y * 7 + z) % 17) as f64 / 17.0);
        let spec = parse_slice_spec("2:14,:,5", 16).unwrap();

        let a = extract_slice(&field, &spec).unwrap();
        let b = extract_slice(&field, &spec).unwrap();
        assert_eq!(a.values(), b.values());
        assert_eq!(a.slice_axis(), b.slice_axis());
    }
}
