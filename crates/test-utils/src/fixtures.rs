//! NetCDF fixtures for patcher tests.
//!
//! Each fixture is written to its own temporary directory, which is
//! removed when the [`TestDataset`] is dropped.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Common single-site coordinates.
pub mod sites {
    /// (latitude, longitude) of the default fixture values
    pub const ORIGIN: (f64, f64) = (10.0, 20.0);

    /// Portland, OR
    pub const PORTLAND: (f64, f64) = (45.5, -122.3);

    /// Canberra, AU
    pub const CANBERRA: (f64, f64) = (-35.28, 149.13);
}

/// Storage type of a fixture variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredAs {
    Double,
    Float,
}

#[derive(Debug, Clone)]
struct VariableSpec {
    name: String,
    dims: Vec<String>,
    values: Vec<f64>,
    stored_as: StoredAs,
}

/// Builder for a small netCDF file of `f64` or `f32` variables.
///
/// Dimensions are declared before variables regardless of call order.
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    dims: Vec<(String, usize)>,
    vars: Vec<VariableSpec>,
}

impl DatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn dimension(mut self, name: &str, len: usize) -> Self {
        self.dims.push((name.to_string(), len));
        self
    }

    /// Add an `f64` variable over existing dimensions.
    pub fn variable(self, name: &str, dims: &[&str], values: &[f64]) -> Self {
        self.typed_variable(name, dims, values, StoredAs::Double)
    }

    /// Add a variable stored as `stored_as`; `f32` storage rounds `values`.
    pub fn typed_variable(
        mut self,
        name: &str,
        dims: &[&str],
        values: &[f64],
        stored_as: StoredAs,
    ) -> Self {
        self.vars.push(VariableSpec {
            name: name.to_string(),
            dims: dims.iter().map(|d| d.to_string()).collect(),
            values: values.to_vec(),
            stored_as,
        });
        self
    }

    /// Add a one-element coordinate variable on a dimension of the same name.
    pub fn scalar(self, name: &str, value: f64) -> Self {
        self.dimension(name, 1).variable(name, &[name], &[value])
    }

    /// Add a one-element `f32` coordinate variable on a dimension of the same name.
    pub fn scalar_f32(self, name: &str, value: f32) -> Self {
        self.dimension(name, 1)
            .typed_variable(name, &[name], &[value as f64], StoredAs::Float)
    }

    /// Add a coordinate variable of several elements on a dimension of the same name.
    pub fn series(self, name: &str, values: &[f64]) -> Self {
        self.dimension(name, values.len()).variable(name, &[name], values)
    }

    /// Write the file.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or the netCDF file cannot be created.
    pub fn build(self) -> TestDataset {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("dataset.nc");

        write_dataset(&path, &self.dims, &self.vars).expect("Failed to write netCDF fixture");

        TestDataset { _dir: dir, path }
    }
}

fn write_dataset(
    path: &Path,
    dims: &[(String, usize)],
    vars: &[VariableSpec],
) -> Result<(), netcdf::Error> {
    let mut file = netcdf::create(path)?;

    for (name, len) in dims {
        file.add_dimension(name, *len)?;
    }

    for spec in vars {
        let dims: Vec<&str> = spec.dims.iter().map(String::as_str).collect();
        match spec.stored_as {
            StoredAs::Double => {
                let mut var = file.add_variable::<f64>(&spec.name, &dims)?;
                if !spec.values.is_empty() {
                    var.put_values(spec.values.as_slice(), ..)?;
                }
            }
            StoredAs::Float => {
                let values: Vec<f32> = spec.values.iter().map(|&v| v as f32).collect();
                let mut var = file.add_variable::<f32>(&spec.name, &dims)?;
                if !values.is_empty() {
                    var.put_values(values.as_slice(), ..)?;
                }
            }
        }
    }

    file.close()
}

/// A netCDF file that lives as long as this value.
#[derive(Debug)]
pub struct TestDataset {
    _dir: TempDir,
    path: PathBuf,
}

impl TestDataset {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All stored values of a variable, or `None` if it does not exist.
    ///
    /// `f32` variables are widened by the library.
    pub fn values(&self, name: &str) -> Option<Vec<f64>> {
        let file = netcdf::open(&self.path).expect("Failed to reopen netCDF fixture");
        let var = file.variable(name)?;
        let values = var
            .get_values::<f64, _>(..)
            .expect("Failed to read netCDF variable");
        Some(values)
    }

    /// The first stored value of a variable.
    ///
    /// # Panics
    ///
    /// Panics if the variable does not exist or is empty.
    pub fn scalar(&self, name: &str) -> f64 {
        self.values(name)
            .and_then(|v| v.first().copied())
            .unwrap_or_else(|| panic!("Variable {} missing from fixture", name))
    }
}

/// A file with one-element coordinate variables under the given names.
pub fn single_site(lat_name: &str, lat: f64, lon_name: &str, lon: f64) -> TestDataset {
    DatasetBuilder::new()
        .scalar(lat_name, lat)
        .scalar(lon_name, lon)
        .build()
}
