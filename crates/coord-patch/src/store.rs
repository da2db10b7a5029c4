//! The data-access seam.
//!
//! Everything the patcher needs from a dataset goes through
//! [`CoordinateStore`]. Variables are addressed by name.

use crate::error::StoreError;

/// One dimension of a variable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    pub name: String,
    pub len: usize,
}

impl Axis {
    pub fn new(name: impl Into<String>, len: usize) -> Self {
        Self {
            name: name.into(),
            len,
        }
    }
}

/// A dataset opened for read-write access.
pub trait CoordinateStore {
    /// Whether a variable with this name exists.
    fn contains(&self, name: &str) -> bool;

    /// The dimensions of a variable, in declaration order.
    fn axes(&self, name: &str) -> Result<Vec<Axis>, StoreError>;

    /// Read the element at offset 0 of a one-dimensional variable.
    fn read_scalar(&self, name: &str) -> Result<f64, StoreError>;

    /// Write the element at offset 0 of a one-dimensional variable.
    fn write_scalar(&mut self, name: &str, value: f64) -> Result<(), StoreError>;

    /// Flush and release the dataset.
    fn close(self) -> Result<(), StoreError>
    where
        Self: Sized;
}
