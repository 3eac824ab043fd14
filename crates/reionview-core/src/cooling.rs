//! Cooling classification
//!
//! A central galaxy sitting in a highly ionized cell whose halo is too cool
//! to collisionally cool ionized gas is flagged as not cooling; every other
//! galaxy keeps the default cooling flag. Classification always samples the
//! full 3D field, not the reduced slice.

use crate::field::ScalarField;
use crate::galaxies::GalaxySet;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Virial temperature scaling, Tvir = 35.9 * Vvir^2 with Vvir in km/s
pub const TVIR_COEFF: f64 = 35.9;

/// A cell counts as ionized once its ionized fraction exceeds this
pub const IONIZED_THRESHOLD: f64 = 0.995;

/// Default virial temperature threshold in Kelvin
pub const DEFAULT_TVIR_THRESH: f64 = 1e5;

/// Virial temperature of a halo from its virial velocity
pub fn virial_temperature(vvir: f64) -> f64 {
    TVIR_COEFF * vvir * vvir
}

/// Classify each galaxy as cooling (`true`) or hot (`false`).
///
/// A galaxy is hot iff the cell containing it is ionized beyond
/// [`IONIZED_THRESHOLD`], its virial temperature is below `tvir_thresh`,
/// and it is the central galaxy of its halo.
pub fn cooling_flags(galaxies: &GalaxySet, field: &ScalarField, tvir_thresh: f64) -> Vec<bool> {
    #[cfg(feature = "parallel")]
    let iter = galaxies.galaxies().par_iter();
    #[cfg(not(feature = "parallel"))]
    let iter = galaxies.iter();

    iter.map(|g| {
        let ionization = 1.0 - field.sample(&g.pos);
        let tvir = virial_temperature(g.vvir);
        let hot = ionization > IONIZED_THRESHOLD && tvir < tvir_thresh && g.is_central();
        !hot
    })
    .collect()
}
