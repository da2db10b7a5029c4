//! NetCDF file access using the native netcdf library.
//!
//! The netcdf library wraps libnetcdf/HDF5 and opens files by path.
//! Files are opened in append (read-write) mode; changes are only
//! guaranteed on disk once [`CoordinateStore::close`] succeeds.

use std::path::{Path, PathBuf};
use std::sync::Once;

use tracing::debug;

use crate::error::{PatchError, PatchResult, StoreError};
use crate::store::{Axis, CoordinateStore};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when
/// errors are handled gracefully, e.g. when a netCDF-4 file fails to open:
///
/// ```text
/// HDF5-DIAG: Error detected in HDF5 (1.10.8) thread 0:
///   #000: ../../../src/H5F.c line 620 in H5Fopen(): unable to open file
/// ```
///
/// Failures are reported once, through [`PatchError`], so the HDF5 output
/// is disabled with H5Eset_auto2. Safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// A netCDF dataset opened for writing.
pub struct NetCdfStore {
    file: netcdf::FileMut,
    path: PathBuf,
}

impl NetCdfStore {
    /// Open an existing netCDF file for read-write access.
    pub fn open(path: impl AsRef<Path>) -> PatchResult<Self> {
        silence_hdf5_errors();

        let path = path.as_ref();
        let file = netcdf::append(path).map_err(|e| PatchError::OpenFailed {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        debug!(file = %path.display(), "Opened dataset for writing");

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn variable(&self, name: &str) -> Result<netcdf::Variable<'_>, StoreError> {
        self.file
            .variable(name)
            .ok_or_else(|| StoreError::new(format!("variable {} not found", name)))
    }
}

impl CoordinateStore for NetCdfStore {
    fn contains(&self, name: &str) -> bool {
        self.file.variable(name).is_some()
    }

    fn axes(&self, name: &str) -> Result<Vec<Axis>, StoreError> {
        let var = self.variable(name)?;
        Ok(var
            .dimensions()
            .iter()
            .map(|dim| Axis::new(dim.name(), dim.len()))
            .collect())
    }

    fn read_scalar(&self, name: &str) -> Result<f64, StoreError> {
        let var = self.variable(name)?;
        Ok(var.get_value::<f64, _>([0usize])?)
    }

    fn write_scalar(&mut self, name: &str, value: f64) -> Result<(), StoreError> {
        let mut var = self
            .file
            .variable_mut(name)
            .ok_or_else(|| StoreError::new(format!("variable {} not found", name)))?;
        var.put_value(value, [0usize])?;
        Ok(())
    }

    fn close(self) -> Result<(), StoreError> {
        debug!(file = %self.path().display(), "Closing dataset");
        self.file.close()?;
        Ok(())
    }
}
