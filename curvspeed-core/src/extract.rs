//! Turns routed corridors into the network segments they traverse

use geo::{LineString, line_string};
use log::{debug, info};

use crate::{ExtractionConfig, MissingGeometryPolicy, RailNetwork, SegmentRecord};

/// Output of the routing step for one corridor
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedCorridor {
    pub corridor_key: String,
    /// Route through network nodes; `None` if no route was found
    pub path: Option<LineString<f64>>,
}

/// Collects one segment record per network edge along each routed path.
///
/// Consecutive path vertices that are not joined by a network edge are
/// skipped. Edges without geometry are handled per
/// [`ExtractionConfig::missing_geometry`].
pub fn extract_segments(
    network: &RailNetwork,
    routes: &[RoutedCorridor],
    config: &ExtractionConfig,
) -> Vec<SegmentRecord> {
    let mut segments = Vec::new();
    let mut unrouted = 0;
    let mut unmatched = 0;
    let mut placeholders = 0;

    for route in routes {
        let Some(path) = &route.path else {
            debug!("Corridor '{}' has no route", route.corridor_key);
            unrouted += 1;
            continue;
        };

        for line in path.lines() {
            let Some(edge) = network.lookup(line.start, line.end) else {
                unmatched += 1;
                continue;
            };

            let geometry = match (&edge.geometry, config.missing_geometry) {
                (Some(geometry), _) => Some(geometry.clone()),
                (None, MissingGeometryPolicy::StraightLine) => {
                    placeholders += 1;
                    Some(line_string![line.start, line.end])
                }
                (None, MissingGeometryPolicy::Skip) => {
                    placeholders += 1;
                    continue;
                }
                (None, MissingGeometryPolicy::Keep) => {
                    placeholders += 1;
                    None
                }
            };

            segments.push(SegmentRecord {
                corridor_key: route.corridor_key.clone(),
                geometry,
                length: edge.length,
                declared_speed: edge.speed,
                segment_type: edge.edge_type.clone(),
            });
        }
    }

    info!(
        "Extracted {} segments from {} routes ({unrouted} without route, \
         {unmatched} path steps off the network, {placeholders} edges without geometry)",
        segments.len(),
        routes.len()
    );

    segments
}
