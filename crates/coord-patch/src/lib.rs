//! Overwrite the single-point coordinates of a netCDF file.
//!
//! Site-level model inputs often store their location as one-element
//! `lat`/`lon` (or `latitude`/`longitude`) coordinate variables. This
//! crate opens such a file read-write, checks that each coordinate holds
//! exactly one value, replaces it, and closes the file.
//!
//! # Usage
//!
//! ```ignore
//! use coord_patch::{run, Options};
//!
//! let options = Options::try_from_args(["ncmc", "45.5", "-122.3", "site.nc"])?;
//! let report = run(&options)?;
//! ```
//!
//! The patch logic is written against [`CoordinateStore`], so it can be
//! driven by a real file ([`NetCdfStore`]) or by [`MemoryStore`].

pub mod config;
pub mod error;
pub mod memory;
pub mod native;
pub mod options;
pub mod patch;
pub mod resolver;
pub mod store;

pub use config::{CoordinateRole, LATITUDE_CANDIDATES, LONGITUDE_CANDIDATES};
pub use error::{PatchError, PatchResult, StoreError};
pub use memory::{FailureSwitches, MemoryStore};
pub use native::NetCdfStore;
pub use options::{parse_coordinate, Options};
pub use patch::{
    patch_coordinate, patch_dataset, validate_scalar_axis, CoordinateChange, PatchReport,
};
pub use resolver::{resolve, ResolvedVariable};
pub use store::{Axis, CoordinateStore};

use tracing::info;

/// Open the file named by `options`, patch both coordinates and close it.
///
/// The run only succeeds once the close succeeds. On an earlier error the
/// store is dropped without an explicit close.
pub fn run(options: &Options) -> PatchResult<PatchReport> {
    let store = NetCdfStore::open(&options.path)?;
    finish(store, options)
}

/// Patch both coordinates of an opened store, then close it.
///
/// A close failure is fatal even when every write succeeded.
pub fn finish<S: CoordinateStore>(mut store: S, options: &Options) -> PatchResult<PatchReport> {
    let report = patch_dataset(&mut store, options)?;

    store.close().map_err(|e| PatchError::CloseFailed {
        path: options.path.display().to_string(),
        message: e.to_string(),
    })?;

    info!(
        file = %options.path.display(),
        latitude = options.latitude,
        longitude = options.longitude,
        "Coordinates updated"
    );

    Ok(report)
}
