//! reionview-io - Snapshot reader for meraxes output files
//!
//! meraxes writes one HDF5 group per snapshot (`Snap000`, `Snap001`, ...),
//! each carrying the ionization grids, the galaxy catalogue, and the
//! snapshot metadata. This crate reads the pieces reionview needs:
//!
//! - the neutral hydrogen fraction grid `Grids/xH` with its grid properties
//! - the galaxy columns `Galaxies/{Pos,StellarMass,Vvir,Type}`
//! - the snapshot redshift

pub mod snapshot;

pub use snapshot::*;
