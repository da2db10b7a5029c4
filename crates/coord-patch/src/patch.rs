//! Shape validation and the scalar overwrite of a coordinate variable.

use std::fmt;

use tracing::debug;

use crate::config::CoordinateRole;
use crate::error::{PatchError, PatchResult};
use crate::options::Options;
use crate::resolver::resolve;
use crate::store::{Axis, CoordinateStore};

/// One coordinate overwrite.
#[derive(Debug, Clone, PartialEq)]
pub struct CoordinateChange {
    pub role: CoordinateRole,
    /// Variable name that matched
    pub variable: String,
    /// Previous value, `None` if it could not be read
    pub old: Option<f64>,
    pub new: f64,
}

impl fmt::Display for CoordinateChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.old {
            Some(old) => write!(
                f,
                "Changing {} from {:.2} to {:.2}",
                self.variable, old, self.new
            ),
            None => write!(f, "Changing {} from unknown to {:.2}", self.variable, self.new),
        }
    }
}

/// Changes applied by [`patch_dataset`], in patch order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchReport {
    pub changes: Vec<CoordinateChange>,
}

impl PatchReport {
    pub fn change(&self, role: CoordinateRole) -> Option<&CoordinateChange> {
        self.changes.iter().find(|c| c.role == role)
    }
}

/// Check that a variable has exactly one axis, of length one.
pub fn validate_scalar_axis<S>(store: &S, name: &str) -> PatchResult<Axis>
where
    S: CoordinateStore + ?Sized,
{
    let mut axes = store
        .axes(name)
        .map_err(|e| PatchError::DimensionQuery {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    if axes.len() != 1 {
        return Err(PatchError::DimensionCount {
            name: name.to_string(),
            ndims: axes.len(),
        });
    }

    let axis = axes.remove(0);
    if axis.len != 1 {
        return Err(PatchError::DimensionLength {
            name: name.to_string(),
            len: axis.len,
        });
    }

    Ok(axis)
}

/// Resolve, validate and overwrite the coordinate for one role.
///
/// The old value is read only for the change message; a failed read is
/// not an error. A failed write is.
pub fn patch_coordinate<S>(
    store: &mut S,
    role: CoordinateRole,
    value: f64,
) -> PatchResult<CoordinateChange>
where
    S: CoordinateStore + ?Sized,
{
    let resolved = resolve(&*store, role.candidates())?;
    let name = resolved.name;
    validate_scalar_axis(&*store, name)?;

    let old = match store.read_scalar(name) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(variable = name, error = %e, "Could not read current value");
            None
        }
    };

    let change = CoordinateChange {
        role,
        variable: name.to_string(),
        old,
        new: value,
    };
    debug!("{}", change);

    store
        .write_scalar(name, value)
        .map_err(|e| PatchError::ScalarWrite {
            name: name.to_string(),
            message: e.to_string(),
        })?;

    Ok(change)
}

/// Patch latitude then longitude. Stops at the first error; nothing
/// already written is undone.
pub fn patch_dataset<S>(store: &mut S, options: &Options) -> PatchResult<PatchReport>
where
    S: CoordinateStore + ?Sized,
{
    let mut report = PatchReport::default();
    for role in CoordinateRole::ALL {
        let change = patch_coordinate(store, role, options.value_for(role))?;
        report.changes.push(change);
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::memory::{FailureSwitches, MemoryStore};

    fn options(latitude: f64, longitude: f64) -> Options {
        Options {
            latitude,
            longitude,
            path: PathBuf::from("memory.nc"),
        }
    }

    #[test]
    fn test_validate_accepts_single_element() {
        let store = MemoryStore::new().with_variable("lat", &[("site", 1)], &[3.0]);
        let axis = validate_scalar_axis(&store, "lat").unwrap();
        assert_eq!(axis, Axis::new("site", 1));
    }

    #[test]
    fn test_validate_rejects_two_dimensions() {
        let store = MemoryStore::new().with_variable("lat", &[("y", 1), ("x", 1)], &[3.0]);
        let err = validate_scalar_axis(&store, "lat").unwrap_err();
        assert_eq!(err.to_string(), "Variable lat has 2 dimensions (expected 1)");
    }

    #[test]
    fn test_validate_rejects_zero_dimensions() {
        let store = MemoryStore::new().with_variable("lat", &[], &[3.0]);
        let err = validate_scalar_axis(&store, "lat").unwrap_err();
        assert_eq!(
            err,
            PatchError::DimensionCount {
                name: "lat".to_string(),
                ndims: 0
            }
        );
    }

    #[test]
    fn test_validate_rejects_long_axis() {
        let store = MemoryStore::new().with_variable("lat", &[("lat", 3)], &[1.0, 2.0, 3.0]);
        let err = validate_scalar_axis(&store, "lat").unwrap_err();
        assert_eq!(err.to_string(), "Length of dimension lat is 3 (expected 1)");
    }

    #[test]
    fn test_validate_reports_query_failure() {
        let store = MemoryStore::new()
            .with_scalar("lat", 1.0)
            .failing(FailureSwitches {
                axes: true,
                ..Default::default()
            });
        let err = validate_scalar_axis(&store, "lat").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to read dimensions of variable lat: NetCDF: Not a valid ID"
        );
    }

    #[test]
    fn test_patch_coordinate_records_old_value() {
        let mut store = MemoryStore::new().with_scalar("lat", 10.0);
        let change = patch_coordinate(&mut store, CoordinateRole::Latitude, 45.5).unwrap();
        assert_eq!(change.old, Some(10.0));
        assert_eq!(change.to_string(), "Changing lat from 10.00 to 45.50");
        assert_eq!(store.values("lat"), Some(&[45.5][..]));
    }

    #[test]
    fn test_read_failure_is_not_fatal() {
        let mut store = MemoryStore::new()
            .with_scalar("lon", 20.0)
            .failing(FailureSwitches {
                read: true,
                ..Default::default()
            });
        let change = patch_coordinate(&mut store, CoordinateRole::Longitude, -122.3).unwrap();
        assert_eq!(change.old, None);
        assert_eq!(change.to_string(), "Changing lon from unknown to -122.30");
        assert_eq!(store.values("lon"), Some(&[-122.3][..]));
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let mut store = MemoryStore::new()
            .with_scalar("lat", 10.0)
            .failing(FailureSwitches {
                write: true,
                ..Default::default()
            });
        let err = patch_coordinate(&mut store, CoordinateRole::Latitude, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "Failed to write lat: NetCDF: Write to read only");
        assert_eq!(store.values("lat"), Some(&[10.0][..]));
    }

    #[test]
    fn test_invalid_shape_is_not_written() {
        let mut store = MemoryStore::new().with_variable("lat", &[("lat", 3)], &[1.0, 2.0, 3.0]);
        assert!(patch_coordinate(&mut store, CoordinateRole::Latitude, 9.0).is_err());
        assert_eq!(store.values("lat"), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_patch_dataset_both_roles() {
        let mut store = MemoryStore::new()
            .with_scalar("latitude", 10.0)
            .with_scalar("lon", 20.0);
        let report = patch_dataset(&mut store, &options(45.5, -122.3)).unwrap();

        assert_eq!(report.changes.len(), 2);
        assert_eq!(report.change(CoordinateRole::Latitude).unwrap().variable, "latitude");
        assert_eq!(report.change(CoordinateRole::Longitude).unwrap().variable, "lon");
        assert_eq!(store.values("latitude"), Some(&[45.5][..]));
        assert_eq!(store.values("lon"), Some(&[-122.3][..]));
    }

    #[test]
    fn test_patch_dataset_prefers_short_names() {
        let mut store = MemoryStore::new()
            .with_scalar("lat", 1.0)
            .with_scalar("latitude", 2.0)
            .with_scalar("lon", 3.0);
        patch_dataset(&mut store, &options(50.0, 60.0)).unwrap();
        assert_eq!(store.values("lat"), Some(&[50.0][..]));
        assert_eq!(store.values("latitude"), Some(&[2.0][..]));
    }

    #[test]
    fn test_longitude_failure_keeps_latitude_change() {
        let mut store = MemoryStore::new()
            .with_scalar("lat", 10.0)
            .with_variable("lon", &[("lon", 2)], &[20.0, 21.0]);
        let err = patch_dataset(&mut store, &options(45.5, -122.3)).unwrap_err();

        assert_eq!(
            err,
            PatchError::DimensionLength {
                name: "lon".to_string(),
                len: 2
            }
        );
        assert_eq!(store.values("lat"), Some(&[45.5][..]));
        assert_eq!(store.values("lon"), Some(&[20.0, 21.0][..]));
    }

    #[test]
    fn test_missing_latitude_writes_nothing() {
        let mut store = MemoryStore::new().with_scalar("lon", 20.0);
        let err = patch_dataset(&mut store, &options(45.5, -122.3)).unwrap_err();
        assert_eq!(err.to_string(), "Variable lat does not exist");
        assert_eq!(store.writes(), 0);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let mut store = MemoryStore::new()
            .with_scalar("lat", 10.0)
            .with_scalar("lon", 20.0);
        let opts = options(45.5, -122.3);
        patch_dataset(&mut store, &opts).unwrap();
        let once = (store.values("lat").unwrap()[0], store.values("lon").unwrap()[0]);
        let report = patch_dataset(&mut store, &opts).unwrap();
        let twice = (store.values("lat").unwrap()[0], store.values("lon").unwrap()[0]);

        assert_eq!(once, twice);
        assert_eq!(report.change(CoordinateRole::Latitude).unwrap().old, Some(45.5));
    }
}
