//! reionview-core - Slice extraction and galaxy classification engine
//!
//! This crate turns a parsed slice specification into concrete data products:
//!
//! - **ScalarField**: the 3D neutral-fraction grid of a snapshot
//! - **extract_slice**: reduce the grid to the selected 2D plane
//! - **GalaxySet**: galaxies with position, stellar mass, virial velocity
//!   and type, filtered against the same slab
//! - **cooling_flags**: per-galaxy cooling classification from the ionization
//!   state and virial temperature
//! - **render_figure**: colormapped raster of the reduced field with an
//!   optional galaxy overlay and colorbar
//!
//! All operations are pure functions over immutable inputs; nothing here
//! carries state between calls.

pub mod colormap;
pub mod cooling;
pub mod error;
pub mod field;
pub mod galaxies;
pub mod render;
pub mod select;

pub use colormap::*;
pub use cooling::*;
pub use error::*;
pub use field::*;
pub use galaxies::*;
pub use render::*;
pub use select::*;
