//! Curvature-adjusted speed estimation for rail segments.
//!
//! The crate turns segment polylines into a speed bound derived from their
//! local radius of curvature and aggregates the per-segment speeds into
//! length-weighted corridor figures. Everything here works on in-memory
//! geometry; reading and writing files is left to the caller.

pub mod aggregate;
pub mod config;
pub mod diagnostics;
pub mod enrich;
pub mod error;
pub mod evaluate;
pub mod extract;
pub mod geometry;
pub mod model;
pub mod network;
pub mod prelude;
pub mod speed;

pub use aggregate::aggregate;
pub use config::{CurvatureConfig, ExtractionConfig, MissingGeometryPolicy};
pub use error::Error;
pub use evaluate::{Progress, evaluate_segment, evaluate_segments, segment_curvature_speed};
pub use model::{
    AverageSpeed, CorridorRecord, CorridorSummary, EnrichedCorridor, EvaluatedSegment,
    SegmentRecord,
};
pub use network::{NetworkEdge, RailNetwork};

/// Lowest curvature speed ever reported for a segment, in mph
pub const MIN_SPEED_MPH: f64 = 1.0;
