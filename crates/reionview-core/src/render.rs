//! Figure rendering and export
//!
//! Turns a reduced field into a colormapped RGBA raster with an optional
//! galaxy overlay and colorbar strip. Everything the renderer needs comes in
//! through an explicit [`FigureConfig`]; there is no ambient figure state.

use crate::colormap::{blues, get_colormap, Color};
use crate::error::{RenderError, RenderResult};
use crate::galaxies::GalaxySet;
use crate::select::ReducedField;
use image::{Rgba, RgbaImage};
use reionview_slice::{Axis, Slab};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Width of the colorbar strip in pixels
const COLORBAR_WIDTH: u32 = 12;

/// Gap between the field raster and the colorbar
const COLORBAR_GAP: u32 = 6;

/// Marker color for galaxies classified as not cooling
const HOT_COLOR: Color = Color {
    r: 1.0,
    g: 0.0,
    b: 0.0,
    a: 0.5,
};

/// Rendering configuration, passed explicitly into every render call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    /// Colormap name for the field raster
    pub colormap: String,

    /// Whether to append a colorbar strip
    pub color_bar: bool,

    /// Pixels drawn per grid cell
    pub pixels_per_cell: u32,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            colormap: "bupu".to_string(),
            color_bar: false,
            pixels_per_cell: 4,
        }
    }
}

impl FigureConfig {
    /// Set the colormap name
    pub fn with_colormap(mut self, name: impl Into<String>) -> Self {
        self.colormap = name.into();
        self
    }

    /// Enable the colorbar strip
    pub fn with_color_bar(mut self) -> Self {
        self.color_bar = true;
        self
    }
}

/// Title and axis-label strings for a rendered slice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotations {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
}

impl Annotations {
    /// Build the figure annotations for a slice at the given redshift and
    /// global neutral fraction.
    pub fn new(redshift: f64, neutral_fraction: f64, slice_text: &str, slice_axis: Axis) -> Self {
        let [a0, a1] = slice_axis.plane_axes();
        Self {
            title: format!(
                "z={:.2}; nf={:.3}; slice=[{}]",
                redshift, neutral_fraction, slice_text
            ),
            x_label: format!("{} (Mpc)", a0.name()),
            y_label: format!("{} (Mpc)", a1.name()),
        }
    }
}

/// Galaxies to scatter over the field, with their cooling classification
#[derive(Debug, Clone, Copy)]
pub struct GalaxyOverlay<'a> {
    pub galaxies: &'a GalaxySet,
    pub cooling: &'a [bool],
}

/// Render the reduced field to an RGBA raster.
///
/// The plane's first axis runs horizontally and its second vertically with
/// the origin at the lower left. Field values map through the colormap with
/// a fixed `[0, 1]` range. Galaxies are drawn as half-transparent discs at
/// their in-plane positions, sized by stellar mass: cooling galaxies through
/// the blues ramp, the rest in red.
pub fn render_figure(
    reduced: &ReducedField,
    slab: &Slab,
    config: &FigureConfig,
    overlay: Option<GalaxyOverlay<'_>>,
) -> RenderResult<RgbaImage> {
    let plane = reduced
        .as_plane()
        .ok_or(RenderError::DegenerateSlice {
            rank: reduced.rank(),
        })?;
    let cmap = get_colormap(&config.colormap)
        .ok_or_else(|| RenderError::UnknownColormap(config.colormap.clone()))?;

    if let Some(overlay) = &overlay {
        if overlay.cooling.len() != overlay.galaxies.len() {
            return Err(RenderError::FlagMismatch {
                found: overlay.cooling.len(),
                expected: overlay.galaxies.len(),
            });
        }
    }

    let ppc = config.pixels_per_cell.max(1);
    let (n0, n1) = plane.dim();
    let field_w = n0 as u32 * ppc;
    let field_h = n1 as u32 * ppc;
    let total_w = if config.color_bar {
        field_w + COLORBAR_GAP + COLORBAR_WIDTH
    } else {
        field_w
    };

    let mut img = RgbaImage::from_pixel(total_w, field_h, Rgba([255, 255, 255, 255]));

    // Field raster, origin at the lower left
    for py in 0..field_h {
        let j = ((field_h - 1 - py) / ppc) as usize;
        for px in 0..field_w {
            let i = (px / ppc) as usize;
            let color = cmap.sample(plane[[i, j]] as f32);
            img.put_pixel(px, py, Rgba(color.to_rgba8()));
        }
    }

    if let Some(overlay) = overlay {
        draw_galaxies(&mut img, field_w, field_h, reduced.slice_axis(), slab, &overlay);
    }

    if config.color_bar {
        for py in 0..field_h {
            let t = if field_h > 1 {
                1.0 - py as f32 / (field_h - 1) as f32
            } else {
                0.0
            };
            let color = cmap.sample(t);
            for dx in 0..COLORBAR_WIDTH {
                img.put_pixel(field_w + COLORBAR_GAP + dx, py, Rgba(color.to_rgba8()));
            }
        }
    }

    Ok(img)
}

/// Write a rendered figure as PNG
pub fn export_png(image: &RgbaImage, path: &Path) -> RenderResult<()> {
    let file = std::fs::File::create(path)?;
    let mut writer = std::io::BufWriter::new(file);
    image
        .write_to(&mut writer, image::ImageFormat::Png)
        .map_err(|e| RenderError::PngEncoding(e.to_string()))
}

fn draw_galaxies(
    img: &mut RgbaImage,
    field_w: u32,
    field_h: u32,
    slice_axis: Axis,
    slab: &Slab,
    overlay: &GalaxyOverlay<'_>,
) {
    let [a0, a1] = slice_axis.plane_axes();
    let (lo0, up0) = slab.bounds(a0);
    let (lo1, up1) = slab.bounds(a1);
    if up0 <= lo0 || up1 <= lo1 {
        return;
    }

    // Normalize marker colors over the log stellar masses actually present
    let log_masses: Vec<f64> = overlay
        .galaxies
        .iter()
        .map(|g| log_stellar_mass(g.stellar_mass))
        .collect();
    let mass_lo = log_masses.iter().copied().fold(f64::INFINITY, f64::min);
    let mass_hi = log_masses.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let ramp = blues();

    for (idx, galaxy) in overlay.galaxies.iter().enumerate() {
        let u = (galaxy.pos[a0.index()] - lo0) / (up0 - lo0);
        let v = (galaxy.pos[a1.index()] - lo1) / (up1 - lo1);
        let cx = u * field_w as f64;
        let cy = (1.0 - v) * field_h as f64;

        let color = if overlay.cooling[idx] {
            let t = if mass_hi > mass_lo {
                ((log_masses[idx] - mass_lo) / (mass_hi - mass_lo)) as f32
            } else {
                0.5
            };
            let mut c = ramp.sample(t);
            c.a = 0.5;
            c
        } else {
            HOT_COLOR
        };

        let radius = marker_radius(galaxy.stellar_mass);
        draw_disc(img, field_w, field_h, cx, cy, radius, color);
    }
}

/// log10 of the stellar mass in solar masses
fn log_stellar_mass(stellar_mass: f64) -> f64 {
    (stellar_mass * 1.0e10).max(10.0).log10()
}

/// Marker radius in pixels; scatter area scales as log10(M*)^9
fn marker_radius(stellar_mass: f64) -> f64 {
    let area = log_stellar_mass(stellar_mass).powi(9) * 1.0e-7;
    (area / std::f64::consts::PI).sqrt().max(1.5)
}

/// Alpha-blend a filled disc into the field region of the image
fn draw_disc(
    img: &mut RgbaImage,
    field_w: u32,
    field_h: u32,
    cx: f64,
    cy: f64,
    radius: f64,
    color: Color,
) {
    let x0 = ((cx - radius).floor().max(0.0)) as u32;
    let y0 = ((cy - radius).floor().max(0.0)) as u32;
    let x1 = ((cx + radius).ceil().max(0.0) as u32).min(field_w.saturating_sub(1));
    let y1 = ((cy + radius).ceil().max(0.0) as u32).min(field_h.saturating_sub(1));
    let r2 = radius * radius;

    for py in y0..=y1 {
        for px in x0..=x1 {
            let dx = px as f64 + 0.5 - cx;
            let dy = py as f64 + 0.5 - cy;
            if dx * dx + dy * dy <= r2 {
                blend_pixel(img.get_pixel_mut(px, py), &color);
            }
        }
    }
}

/// Source-over blend of a fractional-alpha color onto an opaque pixel
fn blend_pixel(pixel: &mut Rgba<u8>, color: &Color) {
    let a = color.a.clamp(0.0, 1.0);
    let src = color.to_rgba8();
    for k in 0..3 {
        let dst = pixel.0[k] as f32;
        pixel.0[k] = (dst * (1.0 - a) + src[k] as f32 * a) as u8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ScalarField;
    use crate::galaxies::Galaxy;
    use crate::select::extract_slice;
    use ndarray::Array3;
    use reionview_slice::parse_slice_spec;

    fn plane_fixture(dim: usize, value: f64) -> (ReducedField, Slab) {
        let field =
            ScalarField::new(Array3::from_elem((dim, dim, dim), value), dim as f64).unwrap();
        let spec = parse_slice_spec(":,:,0", dim).unwrap();
        let reduced = extract_slice(&field, &spec).unwrap();
        let slab = Slab::from_spec(&spec, dim, dim as f64).unwrap();
        (reduced, slab)
    }

    #[test]
    fn test_render_dimensions() {
        let (reduced, slab) = plane_fixture(16, 0.5);
        let config = FigureConfig::default();

        let img = render_figure(&reduced, &slab, &config, None).unwrap();
        assert_eq!(img.dimensions(), (64, 64));
    }

    #[test]
    fn test_render_colorbar_extends_width() {
        let (reduced, slab) = plane_fixture(16, 0.5);
        let config = FigureConfig::default().with_color_bar();

        let img = render_figure(&reduced, &slab, &config, None).unwrap();
        assert_eq!(
            img.dimensions(),
            (64 + COLORBAR_GAP + COLORBAR_WIDTH, 64)
        );
    }

    #[test]
    fn test_render_unknown_colormap() {
        let (reduced, slab) = plane_fixture(8, 0.5);
        let config = FigureConfig::default().with_colormap("nope");

        assert!(matches!(
            render_figure(&reduced, &slab, &config, None),
            Err(RenderError::UnknownColormap(_))
        ));
    }

    #[test]
    fn test_render_degenerate_slice_refused() {
        let field =
            ScalarField::new(Array3::from_elem((8, 8, 8), 0.5), 8.0).unwrap();
        let spec = parse_slice_spec("0,0,:", 8).unwrap();
        let reduced = extract_slice(&field, &spec).unwrap();
        let slab = Slab::from_spec(&spec, 8, 8.0).unwrap();

        assert!(matches!(
            render_figure(&reduced, &slab, &FigureConfig::default(), None),
            Err(RenderError::DegenerateSlice { rank: 1 })
        ));
    }

    #[test]
    fn test_render_flag_mismatch() {
        let (reduced, slab) = plane_fixture(8, 0.5);
        let galaxies = GalaxySet::new(vec![Galaxy {
            pos: [4.0, 4.0, 0.5],
            stellar_mass: 0.01,
            vvir: 40.0,
            galaxy_type: 0,
        }]);
        let overlay = GalaxyOverlay {
            galaxies: &galaxies,
            cooling: &[true, false],
        };

        assert!(matches!(
            render_figure(&reduced, &slab, &FigureConfig::default(), Some(overlay)),
            Err(RenderError::FlagMismatch {
                found: 2,
                expected: 1
            })
        ));
    }

    #[test]
    fn test_field_pixels_follow_colormap() {
        let (reduced, slab) = plane_fixture(8, 0.0);
        let config = FigureConfig::default();

        let img = render_figure(&reduced, &slab, &config, None).unwrap();
        let expected = get_colormap("bupu").unwrap().sample(0.0).to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, expected);
    }

    #[test]
    fn test_overlay_marks_galaxy_position() {
        let (reduced, slab) = plane_fixture(8, 0.0);
        let galaxies = GalaxySet::new(vec![Galaxy {
            pos: [4.0, 4.0, 0.5],
            stellar_mass: 0.01,
            vvir: 40.0,
            galaxy_type: 0,
        }]);
        let overlay = GalaxyOverlay {
            galaxies: &galaxies,
            cooling: &[false],
        };

        let img = render_figure(&reduced, &slab, &FigureConfig::default(), Some(overlay)).unwrap();
        // hot marker blends red into the center pixel
        let background = get_colormap("bupu").unwrap().sample(0.0).to_rgba8();
        let center = img.get_pixel(16, 16);
        assert!(center.0[0] >= background[0]);
        assert!(center.0[1] < background[1]);
    }

    #[test]
    fn test_annotations() {
        let ann = Annotations::new(7.25, 0.4321, ":,10,:", Axis::Y);
        assert_eq!(ann.title, "z=7.25; nf=0.432; slice=[:,10,:]");
        assert_eq!(ann.x_label, "x (Mpc)");
        assert_eq!(ann.y_label, "z (Mpc)");
    }

    #[test]
    fn test_marker_radius_grows_with_mass() {
        assert!(marker_radius(1.0) > marker_radius(0.001));
        assert!(marker_radius(0.0001) >= 1.5);
    }
}
