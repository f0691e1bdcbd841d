use std::path::PathBuf;

use conway_grid::GridError;
use thiserror::Error;

use crate::dashboard::GameId;

/// Errors surfaced by the simulation layer
#[derive(Error, Debug)]
pub enum SimError {
    #[error(transparent)]
    Grid(#[from] GridError),

    /// Signed input that can't be a grid size
    #[error("invalid field size {height}x{width}")]
    InvalidDimension { height: i64, width: i64 },

    #[error("no game with id {0:?}")]
    UnknownGame(GameId),

    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;

/// Field dimensions checked at the boundary, before the grid sees them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FieldSize {
    pub height: usize,
    pub width: usize,
}

impl FieldSize {
    pub fn new(height: i64, width: i64) -> SimResult<Self> {
        match (usize::try_from(height), usize::try_from(width)) {
            (Ok(height), Ok(width)) => Ok(Self { height, width }),
            _ => Err(SimError::InvalidDimension { height, width }),
        }
    }
}
