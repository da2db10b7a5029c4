//! In-memory [`CoordinateStore`].
//!
//! Holds variables as flat `f64` buffers with explicit axes. Each store
//! operation can be switched to fail, which lets callers exercise the
//! error paths without a real file.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::store::{Axis, CoordinateStore};

#[derive(Debug, Clone, PartialEq)]
struct MemoryVariable {
    axes: Vec<Axis>,
    values: Vec<f64>,
}

/// Operations that can be forced to fail.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FailureSwitches {
    pub axes: bool,
    pub read: bool,
    pub write: bool,
    pub close: bool,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    variables: HashMap<String, MemoryVariable>,
    fail: FailureSwitches,
    writes: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable whose shape is given by `axes`.
    ///
    /// `values` is truncated or zero-padded to the product of the axis
    /// lengths.
    pub fn with_variable(mut self, name: &str, axes: &[(&str, usize)], values: &[f64]) -> Self {
        let axes: Vec<Axis> = axes.iter().map(|&(n, len)| Axis::new(n, len)).collect();
        let size = axes.iter().map(|a| a.len).product();
        let mut values = values.to_vec();
        values.resize(size, 0.0);
        self.variables
            .insert(name.to_string(), MemoryVariable { axes, values });
        self
    }

    /// Add a one-element variable on its own dimension of the same name.
    pub fn with_scalar(self, name: &str, value: f64) -> Self {
        self.with_variable(name, &[(name, 1)], &[value])
    }

    pub fn failing(mut self, fail: FailureSwitches) -> Self {
        self.fail = fail;
        self
    }

    /// All values of a variable, if present.
    pub fn values(&self, name: &str) -> Option<&[f64]> {
        self.variables.get(name).map(|v| v.values.as_slice())
    }

    /// Number of successful writes.
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn variable(&self, name: &str) -> Result<&MemoryVariable, StoreError> {
        self.variables
            .get(name)
            .ok_or_else(|| StoreError::new(format!("variable {} not found", name)))
    }
}

impl CoordinateStore for MemoryStore {
    fn contains(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    fn axes(&self, name: &str) -> Result<Vec<Axis>, StoreError> {
        if self.fail.axes {
            return Err(StoreError::new("NetCDF: Not a valid ID"));
        }
        Ok(self.variable(name)?.axes.clone())
    }

    fn read_scalar(&self, name: &str) -> Result<f64, StoreError> {
        if self.fail.read {
            return Err(StoreError::new("NetCDF: HDF error"));
        }
        self.variable(name)?
            .values
            .first()
            .copied()
            .ok_or_else(|| StoreError::new("NetCDF: Index exceeds dimension bound"))
    }

    fn write_scalar(&mut self, name: &str, value: f64) -> Result<(), StoreError> {
        if self.fail.write {
            return Err(StoreError::new("NetCDF: Write to read only"));
        }
        let slot = self
            .variables
            .get_mut(name)
            .and_then(|v| v.values.first_mut())
            .ok_or_else(|| StoreError::new(format!("variable {} not found", name)))?;
        *slot = value;
        self.writes += 1;
        Ok(())
    }

    fn close(self) -> Result<(), StoreError> {
        if self.fail.close {
            return Err(StoreError::new("NetCDF: HDF error"));
        }
        Ok(())
    }
}
