pub use crate::MIN_SPEED_MPH;

// Re-export key components
pub use crate::aggregate::aggregate;
pub use crate::config::{CurvatureConfig, ExtractionConfig, MissingGeometryPolicy};
pub use crate::diagnostics::{SegmentDiagnostics, most_common_speeds};
pub use crate::enrich::enrich;
pub use crate::evaluate::{Progress, evaluate_segment, evaluate_segments, segment_curvature_speed};
pub use crate::extract::{RoutedCorridor, extract_segments};
pub use crate::geometry::{circumradius, densify, polyline_length};
pub use crate::network::{NetworkEdge, RailNetwork};
pub use crate::speed::speed_for_radius;

// Records flowing through the pipeline
pub use crate::model::{
    AverageSpeed, CorridorRecord, CorridorSummary, EnrichedCorridor, EvaluatedSegment,
    SegmentRecord,
};

pub use crate::Error;
