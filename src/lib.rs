// Library crate root.
//
// Boundary tracing of label images: every maximal region of equal labels is
// walked along its pixel sides (crack code) and emitted as closed polygons.
// The binary in src/main.rs is a thin CLI over this library.

pub mod bitmap;
pub mod config;
pub mod direction;
pub mod error;
pub mod grid;
pub mod im;
pub mod mpoly;
pub mod polygon;
pub mod scan;
pub mod trace;

#[cfg(test)]
pub mod test_helpers;

pub use config::{Connectivity, TraceConfig, VertexLocation};
pub use direction::{Direction, Position};
pub use error::{Result, TraceError};
pub use grid::{Label, LabelGrid};
pub use polygon::{BoundaryMap, Fv2, Polygon};
pub use trace::Tracer;
