//! HDF5 snapshot access
//!
//! A [`Snapshot`] is a handle on one `Snap{:03}` group of a meraxes output
//! file. Reads are lazy; nothing is loaded until asked for.

use hdf5::File as Hdf5File;
use ndarray::{Array2, Ix3};
use reionview_core::{GalaxySet, ScalarField};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a snapshot
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("failed to open file: {0}")]
    OpenFailed(String),

    #[error("snapshot {snap} not found in {path}")]
    SnapshotNotFound { snap: u32, path: String },

    #[error("dataset not found: {0}")]
    DatasetNotFound(String),

    #[error("attribute not found: {0}")]
    AttributeNotFound(String),

    #[error("failed to read {0}: {1}")]
    ReadFailed(&'static str, String),

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid snapshot contents: {0}")]
    Contents(#[from] reionview_core::SliceError),
}

/// Result type for snapshot operations
pub type SnapshotResult<T> = Result<T, SnapshotError>;

/// Grid metadata stored alongside the ionization grids
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridProps {
    /// Side length of the grid in cells
    pub dim: usize,
    /// Comoving box length in Mpc
    pub box_len: f64,
    /// Volume-weighted global neutral fraction
    pub global_xh: f64,
}

/// A handle on one snapshot group of a meraxes output file
pub struct Snapshot {
    file: Hdf5File,
    group: hdf5::Group,
    path: PathBuf,
    snap: u32,
}

impl Snapshot {
    /// Open a snapshot by file path and snapshot index.
    ///
    /// A missing file or a missing `Snap{:03}` group is a fatal lookup
    /// error naming the path and index.
    pub fn open(path: impl AsRef<Path>, snap: u32) -> SnapshotResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SnapshotError::FileNotFound(path.display().to_string()));
        }

        let file =
            Hdf5File::open(path).map_err(|e| SnapshotError::OpenFailed(e.to_string()))?;
        let group = file
            .group(&group_name(snap))
            .map_err(|_| SnapshotError::SnapshotNotFound {
                snap,
                path: path.display().to_string(),
            })?;

        Ok(Self {
            file,
            group,
            path: path.to_path_buf(),
            snap,
        })
    }

    /// Snapshot index
    pub fn snap(&self) -> u32 {
        self.snap
    }

    /// Path of the underlying file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Redshift of this snapshot
    pub fn redshift(&self) -> SnapshotResult<f64> {
        self.read_attr_f64("Redshift")
    }

    /// Grid metadata for this snapshot
    pub fn grid_props(&self) -> SnapshotResult<GridProps> {
        let dim = self.read_attr_f64("HII_dim")? as usize;
        let box_len = self.read_attr_f64("box_len")?;
        let global_xh = self.read_attr_f64("global_xH")?;
        Ok(GridProps {
            dim,
            box_len,
            global_xh,
        })
    }

    /// Read the neutral fraction grid together with its properties.
    pub fn read_grid(&self) -> SnapshotResult<(ScalarField, GridProps)> {
        let props = self.grid_props()?;

        let dataset = self
            .group
            .dataset("Grids/xH")
            .map_err(|_| SnapshotError::DatasetNotFound(self.qualify("Grids/xH")))?;
        let data = dataset
            .read_dyn::<f64>()
            .map_err(|e| SnapshotError::ReadFailed("Grids/xH", e.to_string()))?
            .into_dimensionality::<Ix3>()
            .map_err(|e| SnapshotError::MalformedGrid(e.to_string()))?;

        if data.shape() != [props.dim, props.dim, props.dim] {
            return Err(SnapshotError::MalformedGrid(format!(
                "grid shape {:?} does not match HII_dim {}",
                data.shape(),
                props.dim
            )));
        }

        let field = ScalarField::new(data, props.box_len)?;
        Ok((field, props))
    }

    /// Read the galaxy catalogue of this snapshot.
    pub fn read_galaxies(&self) -> SnapshotResult<GalaxySet> {
        let pos: Array2<f64> = self
            .galaxy_dataset("Pos")?
            .read_2d()
            .map_err(|e| SnapshotError::ReadFailed("Galaxies/Pos", e.to_string()))?;
        let stellar_mass: Vec<f64> = self
            .galaxy_dataset("StellarMass")?
            .read_raw()
            .map_err(|e| SnapshotError::ReadFailed("Galaxies/StellarMass", e.to_string()))?;
        let vvir: Vec<f64> = self
            .galaxy_dataset("Vvir")?
            .read_raw()
            .map_err(|e| SnapshotError::ReadFailed("Galaxies/Vvir", e.to_string()))?;
        let galaxy_type: Vec<i32> = self
            .galaxy_dataset("Type")?
            .read_raw()
            .map_err(|e| SnapshotError::ReadFailed("Galaxies/Type", e.to_string()))?;

        let positions: Vec<[f64; 3]> = pos
            .rows()
            .into_iter()
            .map(|row| [row[0], row[1], row[2]])
            .collect();

        Ok(GalaxySet::from_columns(
            positions,
            stellar_mass,
            vvir,
            galaxy_type,
        )?)
    }

    fn galaxy_dataset(&self, name: &str) -> SnapshotResult<hdf5::Dataset> {
        let path = format!("Galaxies/{}", name);
        self.group
            .dataset(&path)
            .map_err(|_| SnapshotError::DatasetNotFound(self.qualify(&path)))
    }

    fn read_attr_f64(&self, name: &'static str) -> SnapshotResult<f64> {
        let attr = self
            .group
            .attr(name)
            .map_err(|_| SnapshotError::AttributeNotFound(self.qualify(name)))?;
        attr.read_scalar::<f64>()
            .map_err(|e| SnapshotError::ReadFailed(name, e.to_string()))
    }

    fn qualify(&self, name: &str) -> String {
        format!("{}/{}", group_name(self.snap), name)
    }
}

impl std::fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Snapshot")
            .field("path", &self.path)
            .field("snap", &self.snap)
            .field("file", &self.file.filename())
            .finish()
    }
}

/// HDF5 group name for a snapshot index
fn group_name(snap: u32) -> String {
    format!("Snap{:03}", snap)
}
