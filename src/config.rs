use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TraceError;
use crate::grid::Label;

/// Pixel adjacency rule. Decides how saddle configurations are resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

impl TryFrom<u8> for Connectivity {
    type Error = TraceError;

    fn try_from(conn: u8) -> Result<Self, Self::Error> {
        match conn {
            4 => Ok(Connectivity::Four),
            8 => Ok(Connectivity::Eight),
            _ => Err(TraceError::InvalidConnectivity(conn)),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(conn: Connectivity) -> u8 {
        match conn {
            Connectivity::Four => 4,
            Connectivity::Eight => 8,
        }
    }
}

impl fmt::Display for Connectivity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}", u8::from(*self))
    }
}

/// Where each output vertex sits relative to the pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexLocation {
    /// Pixel corners (exact lattice coordinates).
    #[default]
    Corner,
    /// Midpoint of each boundary side.
    EdgeCenter,
    /// Centre of the boundary pixel. Every step along one pixel lands on the
    /// same centre, so straight runs and convex corners repeat points and a
    /// lone pixel collapses to four copies of one point with zero area. Use
    /// `Polygon::dedup_consecutive` for a clean outline.
    Pixel,
}

impl FromStr for VertexLocation {
    type Err = TraceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "corner" | "corners" => Ok(VertexLocation::Corner),
            "edge_center" | "edge-center" => Ok(VertexLocation::EdgeCenter),
            "pixel" | "pixel_center" | "pixel-center" => Ok(VertexLocation::Pixel),
            other => Err(TraceError::UnknownVertexLocation(other.to_string())),
        }
    }
}

/// Settings fixed for the lifetime of one tracer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    pub connectivity: Connectivity,
    pub vertex_location: VertexLocation,
    /// Label that is never traced as a region.
    pub background: Label,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Four,
            vertex_location: VertexLocation::Corner,
            background: 0,
        }
    }
}

pub fn parse_config_json(json: &str) -> serde_json::Result<TraceConfig> {
    serde_json::from_str(json)
}
