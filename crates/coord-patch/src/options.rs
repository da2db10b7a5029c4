//! Invocation options: `<latitude> <longitude> <file>`.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use tracing::{debug, warn};

use crate::config::CoordinateRole;
use crate::error::{PatchError, PatchResult};

const DEFAULT_PROGRAM: &str = "ncmc";

#[derive(Parser, Debug)]
#[command(name = "ncmc")]
#[command(about = "Overwrite the single-point latitude and longitude of a netCDF file")]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Args {
    /// New latitude value
    #[arg(allow_hyphen_values = true)]
    latitude: OsString,

    /// New longitude value
    #[arg(allow_hyphen_values = true)]
    longitude: OsString,

    /// NetCDF file, modified in place
    #[arg(allow_hyphen_values = true)]
    file: PathBuf,
}

/// Values supplied on the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub latitude: f64,
    pub longitude: f64,
    pub path: PathBuf,
}

impl Options {
    /// Build options from a raw argument list that includes the program name.
    ///
    /// Any argument count other than three yields [`PatchError::Usage`]
    /// naming the program.
    pub fn try_from_args<I, T>(args: I) -> PatchResult<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let program = args
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_PROGRAM.to_string());

        let parsed = Args::try_parse_from(&args).map_err(|_| PatchError::Usage { program })?;

        let options = Options {
            latitude: parse_coordinate(&parsed.latitude.to_string_lossy()),
            longitude: parse_coordinate(&parsed.longitude.to_string_lossy()),
            path: parsed.file,
        };

        debug!(
            latitude = options.latitude,
            longitude = options.longitude,
            file = %options.path.display(),
            "Parsed options"
        );

        Ok(options)
    }

    /// The value to store for the given role.
    pub fn value_for(&self, role: CoordinateRole) -> f64 {
        match role {
            CoordinateRole::Latitude => self.latitude,
            CoordinateRole::Longitude => self.longitude,
        }
    }
}

/// Parse a coordinate the way a permissive `%lf` scan does.
///
/// Leading whitespace is skipped and the longest prefix that parses as a
/// float is used. Input with no numeric prefix yields `0.0`. No range
/// checks are applied. Hexadecimal floats are not recognised: `0x1p4`
/// reads as `0`.
pub fn parse_coordinate(raw: &str) -> f64 {
    let trimmed = raw.trim_start();

    let longest = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| trimmed[..end].parse::<f64>().ok().map(|v| (end, v)));

    match longest {
        Some((end, value)) => {
            if end < trimmed.len() {
                warn!(input = raw, value, "Ignoring trailing characters in coordinate");
            }
            value
        }
        None => {
            warn!(input = raw, "Coordinate is not numeric, using 0");
            0.0
        }
    }
}
