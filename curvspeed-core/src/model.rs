//! Records flowing through the curvature pipeline

use geo::LineString;

/// A routed piece of track as handed over by geometry extraction
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentRecord {
    /// Corridor the segment belongs to ("from_to")
    pub corridor_key: String,
    /// Track geometry in projected units, `None` when the source had none
    pub geometry: Option<LineString<f64>>,
    /// Segment length in miles
    pub length: Option<f64>,
    /// Speed declared on the source edge, passed through untouched
    pub declared_speed: Option<f64>,
    /// Track type, passed through untouched
    pub segment_type: Option<String>,
}

impl SegmentRecord {
    pub fn new(corridor_key: impl Into<String>, geometry: LineString<f64>) -> Self {
        Self {
            corridor_key: corridor_key.into(),
            geometry: Some(geometry),
            length: None,
            declared_speed: None,
            segment_type: None,
        }
    }

    #[must_use]
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = Some(length);
        self
    }

    /// Length usable as an aggregation weight
    pub fn usable_length(&self) -> Option<f64> {
        self.length.filter(|l| l.is_finite() && *l >= 0.0)
    }
}

/// A segment together with its curvature-adjusted speed
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatedSegment {
    pub record: SegmentRecord,
    /// Curvature-adjusted speed in mph
    pub curvature_speed: f64,
}

/// Length-weighted corridor speed, or the lack of one
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AverageSpeed {
    Known(f64),
    /// No member segment had a usable length
    NoData,
}

impl AverageSpeed {
    pub fn value(self) -> Option<f64> {
        match self {
            AverageSpeed::Known(speed) => Some(speed),
            AverageSpeed::NoData => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorridorSummary {
    pub corridor_key: String,
    /// Sum of usable member lengths, in miles
    pub total_length: f64,
    pub avg_curvature_speed: AverageSpeed,
    /// Number of member segments
    pub segment_count: usize,
    /// Members left out of the weighting for lack of a usable length
    pub excluded_count: usize,
}

impl CorridorSummary {
    /// Travel time in hours at the average curvature speed
    pub fn estimated_travel_time(&self) -> Option<f64> {
        self.avg_curvature_speed
            .value()
            .filter(|_| self.total_length > 0.0)
            .map(|speed| self.total_length / speed)
    }
}

/// A corridor as drawn on the map, keyed the same way as its segments
#[derive(Debug, Clone, PartialEq)]
pub struct CorridorRecord {
    pub corridor_key: String,
    pub geometry: Option<LineString<f64>>,
}

/// A corridor joined with its summary, if any segment matched
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedCorridor {
    pub corridor: CorridorRecord,
    pub summary: Option<CorridorSummary>,
}
