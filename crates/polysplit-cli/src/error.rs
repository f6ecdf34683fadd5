use std::io;
use std::path::PathBuf;

use polysplit_geometry::GeometryError;
use thiserror::Error;

/// Everything that can stop a `polysplit` run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("error reading {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error parsing {what}: {source}")]
    Parse {
        what: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("error serializing output: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
