//! Galaxy records and the spatial slab filter
//!
//! Galaxies arrive from the snapshot as parallel columns (position, stellar
//! mass, virial velocity, type) and are carried here as one record per
//! galaxy. Filtering produces a new set; the source is never touched.

use crate::error::{SliceError, SliceResult};
use reionview_slice::Slab;
use serde::{Deserialize, Serialize};

/// One galaxy from the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Galaxy {
    /// Physical position in the box, comoving Mpc
    pub pos: [f64; 3],
    /// Stellar mass in units of 1e10 solar masses
    pub stellar_mass: f64,
    /// Virial velocity in km/s
    pub vvir: f64,
    /// Halo type; 0 is the central galaxy
    pub galaxy_type: i32,
}

impl Galaxy {
    /// True for the central galaxy of its halo
    pub fn is_central(&self) -> bool {
        self.galaxy_type == 0
    }
}

/// An ordered collection of galaxies
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GalaxySet {
    galaxies: Vec<Galaxy>,
}

impl GalaxySet {
    /// Build a set from records
    pub fn new(galaxies: Vec<Galaxy>) -> Self {
        Self { galaxies }
    }

    /// Zip the snapshot's column datasets into records.
    ///
    /// All columns must have the same length as `pos`.
    pub fn from_columns(
        pos: Vec<[f64; 3]>,
        stellar_mass: Vec<f64>,
        vvir: Vec<f64>,
        galaxy_type: Vec<i32>,
    ) -> SliceResult<Self> {
        let expected = pos.len();
        let check = |column: &'static str, found: usize| -> SliceResult<()> {
            if found != expected {
                return Err(SliceError::ColumnMismatch {
                    column,
                    found,
                    expected,
                });
            }
            Ok(())
        };
        check("StellarMass", stellar_mass.len())?;
        check("Vvir", vvir.len())?;
        check("Type", galaxy_type.len())?;

        let galaxies = pos
            .into_iter()
            .zip(stellar_mass)
            .zip(vvir)
            .zip(galaxy_type)
            .map(|(((pos, stellar_mass), vvir), galaxy_type)| Galaxy {
                pos,
                stellar_mass,
                vvir,
                galaxy_type,
            })
            .collect();
        Ok(Self { galaxies })
    }

    pub fn len(&self) -> usize {
        self.galaxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.galaxies.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Galaxy> {
        self.galaxies.iter()
    }

    pub fn galaxies(&self) -> &[Galaxy] {
        &self.galaxies
    }

    /// Galaxies whose position falls inside the slab on all three axes.
    ///
    /// Pure predicate over the set: insertion order is preserved and no
    /// record is duplicated or altered.
    pub fn filter_slab(&self, slab: &Slab) -> GalaxySet {
        GalaxySet {
            galaxies: self
                .galaxies
                .iter()
                .filter(|g| slab.contains(&g.pos))
                .copied()
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a GalaxySet {
    type Item = &'a Galaxy;
    type IntoIter = std::slice::Iter<'a, Galaxy>;

    fn into_iter(self) -> Self::IntoIter {
        self.galaxies.iter()
    }
}
