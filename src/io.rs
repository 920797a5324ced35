//! GeoJSON and CSV exchange with the rest of the pipeline
//!
//! Segments, routes, network edges and corridors travel as GeoJSON feature
//! collections in a projected CRS. Property names follow the upstream
//! extraction step.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use curvspeed_core::prelude::*;
use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, GeoJson, Geometry};
use serde::Serialize;
use serde_json::{Value as JsonValue, json};

use crate::error::CliError;

pub const CORRIDOR_KEY: &str = "from_to";
pub const LENGTH: &str = "length_mi";
pub const DECLARED_SPEED: &str = "speed";
pub const SEGMENT_TYPE: &str = "type";
pub const CURVATURE_SPEED: &str = "curv_speed_mph";
pub const EDGE_FROM: &str = "from";
pub const EDGE_TO: &str = "to";

pub fn read_features(path: &Path) -> Result<Vec<Feature>, CliError> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let geojson: GeoJson = serde_json::from_reader(BufReader::new(file))?;
    let collection = FeatureCollection::try_from(geojson)?;
    Ok(collection.features)
}

pub fn write_features(path: &Path, features: Vec<Feature>) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    let collection: FeatureCollection = features.into_iter().collect();
    serde_json::to_writer(BufWriter::new(file), &collection)?;
    Ok(())
}

fn corridor_key(index: usize, feature: &Feature) -> Result<String, CliError> {
    feature
        .property(CORRIDOR_KEY)
        .and_then(JsonValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| CliError::feature(index, format!("missing '{CORRIDOR_KEY}' property")))
}

fn number(feature: &Feature, name: &str) -> Option<f64> {
    feature.property(name).and_then(JsonValue::as_f64)
}

fn line_geometry(index: usize, feature: &Feature) -> Result<Option<LineString<f64>>, CliError> {
    feature
        .geometry
        .as_ref()
        .map(|geometry| {
            LineString::<f64>::try_from(geometry.value.clone()).map_err(|e| {
                CliError::feature(index, format!("expected a LineString geometry: {e}"))
            })
        })
        .transpose()
}

fn coordinate(feature: &Feature, name: &str) -> Option<Coord<f64>> {
    let pair = feature.property(name)?.as_array()?;
    match pair.as_slice() {
        [x, y] => Some(Coord {
            x: x.as_f64()?,
            y: y.as_f64()?,
        }),
        _ => None,
    }
}

pub fn segment_from_feature(index: usize, feature: &Feature) -> Result<SegmentRecord, CliError> {
    Ok(SegmentRecord {
        corridor_key: corridor_key(index, feature)?,
        geometry: line_geometry(index, feature)?,
        length: number(feature, LENGTH),
        declared_speed: number(feature, DECLARED_SPEED),
        segment_type: feature
            .property(SEGMENT_TYPE)
            .and_then(JsonValue::as_str)
            .map(str::to_string),
    })
}

pub fn segments_from_features(features: &[Feature]) -> Result<Vec<SegmentRecord>, CliError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| segment_from_feature(index, feature))
        .collect()
}

/// Segment features as seen by `inspect`, which reports bad features
/// instead of stopping at them
#[derive(Debug, Default)]
pub struct Inspection {
    pub segments: Vec<SegmentRecord>,
    /// `curv_speed_mph` of each accepted segment, if present
    pub speeds: Vec<Option<f64>>,
    /// Features per GeoJSON geometry type, `null` for missing geometry
    pub geometry_types: BTreeMap<String, usize>,
    /// Features left out for an unsupported geometry or a missing key
    pub rejected: usize,
}

fn geometry_type(feature: &Feature) -> String {
    feature
        .geometry
        .as_ref()
        .and_then(|geometry| serde_json::to_value(geometry).ok())
        .and_then(|value| value.get("type")?.as_str().map(str::to_string))
        .unwrap_or_else(|| "null".to_string())
}

pub fn inspect_features(features: &[Feature]) -> Inspection {
    let mut inspection = Inspection::default();
    for (index, feature) in features.iter().enumerate() {
        *inspection
            .geometry_types
            .entry(geometry_type(feature))
            .or_default() += 1;

        match segment_from_feature(index, feature) {
            Ok(segment) => {
                inspection.segments.push(segment);
                inspection.speeds.push(number(feature, CURVATURE_SPEED));
            }
            Err(e) => {
                tracing::warn!("Skipping feature during inspection: {e}");
                inspection.rejected += 1;
            }
        }
    }
    inspection
}

/// Writes each segment's speed onto the feature it was read from
pub fn attach_speeds(features: &mut [Feature], evaluated: &[EvaluatedSegment]) {
    for (feature, segment) in features.iter_mut().zip(evaluated) {
        feature.set_property(CURVATURE_SPEED, segment.curvature_speed);
    }
}

/// Segments that already went through the estimate step
pub fn evaluated_from_features(features: &[Feature]) -> Result<Vec<EvaluatedSegment>, CliError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            let curvature_speed = number(feature, CURVATURE_SPEED).ok_or_else(|| {
                CliError::feature(index, format!("missing '{CURVATURE_SPEED}' property"))
            })?;
            Ok(EvaluatedSegment {
                record: segment_from_feature(index, feature)?,
                curvature_speed,
            })
        })
        .collect()
}

pub fn segment_to_feature(record: &SegmentRecord) -> Result<Feature, CliError> {
    let value = json!({
        "type": "Feature",
        "geometry": record.geometry.as_ref().map(|line| Geometry::new(line.into())),
        "properties": {
            CORRIDOR_KEY: record.corridor_key,
            LENGTH: record.length,
            DECLARED_SPEED: record.declared_speed,
            SEGMENT_TYPE: record.segment_type,
        }
    });
    Ok(serde_json::from_value::<Feature>(value)?)
}

pub fn routes_from_features(features: &[Feature]) -> Result<Vec<RoutedCorridor>, CliError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            Ok(RoutedCorridor {
                corridor_key: corridor_key(index, feature)?,
                path: line_geometry(index, feature)?,
            })
        })
        .collect()
}

/// Builds the network from edge features.
///
/// Endpoints come from the `from`/`to` properties when present and from the
/// geometry's first and last vertex otherwise.
pub fn network_from_features(features: &[Feature]) -> Result<RailNetwork, CliError> {
    let mut network = RailNetwork::new();
    for (index, feature) in features.iter().enumerate() {
        let geometry = line_geometry(index, feature)?;
        let from = coordinate(feature, EDGE_FROM)
            .or_else(|| geometry.as_ref().and_then(|g| g.0.first().copied()));
        let to = coordinate(feature, EDGE_TO)
            .or_else(|| geometry.as_ref().and_then(|g| g.0.last().copied()));

        let (Some(from), Some(to)) = (from, to) else {
            return Err(CliError::feature(
                index,
                format!("edge needs a geometry or '{EDGE_FROM}'/'{EDGE_TO}' coordinates"),
            ));
        };

        network.add_edge(
            from,
            to,
            NetworkEdge {
                geometry,
                length: number(feature, LENGTH),
                speed: number(feature, DECLARED_SPEED),
                edge_type: feature
                    .property(SEGMENT_TYPE)
                    .and_then(JsonValue::as_str)
                    .map(str::to_string),
            },
        );
    }
    Ok(network)
}

pub fn corridors_from_features(features: &[Feature]) -> Result<Vec<CorridorRecord>, CliError> {
    features
        .iter()
        .enumerate()
        .map(|(index, feature)| {
            Ok(CorridorRecord {
                corridor_key: corridor_key(index, feature)?,
                geometry: line_geometry(index, feature)?,
            })
        })
        .collect()
}

/// One row of the corridor summary table
#[derive(Debug, Serialize)]
pub struct SummaryRow<'a> {
    pub from_to: &'a str,
    pub total_length_mi: Option<f64>,
    pub avg_curv_speed_mph: Option<f64>,
    pub est_travel_hr: Option<f64>,
    pub segment_count: Option<usize>,
    pub excluded_count: Option<usize>,
}

impl<'a> SummaryRow<'a> {
    pub fn new(corridor_key: &'a str, summary: Option<&CorridorSummary>) -> Self {
        Self {
            from_to: corridor_key,
            total_length_mi: summary.map(|s| s.total_length),
            avg_curv_speed_mph: summary.and_then(|s| s.avg_curvature_speed.value()),
            est_travel_hr: summary.and_then(CorridorSummary::estimated_travel_time),
            segment_count: summary.map(|s| s.segment_count),
            excluded_count: summary.map(|s| s.excluded_count),
        }
    }

    /// Writes the row's fields onto a feature, as nulls where absent
    pub fn apply_to(&self, feature: &mut Feature) {
        feature.set_property("total_length_mi", self.total_length_mi);
        feature.set_property("avg_curv_speed_mph", self.avg_curv_speed_mph);
        feature.set_property("est_travel_hr", self.est_travel_hr);
        feature.set_property("segment_count", self.segment_count);
        feature.set_property("excluded_count", self.excluded_count);
    }
}

pub fn write_summary_csv<'a>(
    path: &Path,
    summaries: impl IntoIterator<Item = &'a CorridorSummary>,
) -> Result<(), CliError> {
    let file = File::create(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to create file '{}': {}", path.display(), e),
        )
    })?;
    write_summary(file, summaries)
}

pub fn write_summary<'a, W: Write>(
    writer: W,
    summaries: impl IntoIterator<Item = &'a CorridorSummary>,
) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_writer(writer);
    for summary in summaries {
        writer.serialize(SummaryRow::new(&summary.corridor_key, Some(summary)))?;
    }
    writer.flush()?;
    Ok(())
}
