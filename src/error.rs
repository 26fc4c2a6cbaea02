use thiserror::Error;

use crate::direction::Direction;

/// Everything that can go wrong while configuring a tracer or walking a boundary.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("connectivity must be either 4 or 8, got {0}")]
    InvalidConnectivity(u8),

    #[error("unknown vertex location '{0}', expected corner, edge_center or pixel")]
    UnknownVertexLocation(String),

    #[error("start pixel ({x}, {y}) is outside the {w}x{h} grid")]
    OutOfBounds { x: i64, y: i64, w: usize, h: usize },

    #[error("({x}, {y}, {direction:?}) is not on the boundary of a region labeled {label}")]
    NotOnBoundary {
        x: i64,
        y: i64,
        direction: Direction,
        label: i64,
    },

    /// The walk reached a configuration that cannot occur on a true boundary
    /// under the tracer's connectivity.
    #[error("inconsistent boundary configuration at ({x}, {y}, {direction:?}) for label {label}")]
    Inconsistent {
        x: i64,
        y: i64,
        direction: Direction,
        label: i64,
    },

    #[error("scan aborted after {loops} loops")]
    Aborted { loops: usize },
}

pub type Result<T> = std::result::Result<T, TraceError>;
