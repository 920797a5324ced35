use std::collections::BTreeMap;

use log::info;

use crate::{CorridorRecord, CorridorSummary, EnrichedCorridor};

/// Left-joins corridor summaries onto corridor records by key.
///
/// Every corridor is kept in its original order; those without a summary
/// come back with `summary: None`.
pub fn enrich(
    corridors: Vec<CorridorRecord>,
    summaries: &BTreeMap<String, CorridorSummary>,
) -> Vec<EnrichedCorridor> {
    let enriched: Vec<EnrichedCorridor> = corridors
        .into_iter()
        .map(|corridor| {
            let summary = summaries.get(&corridor.corridor_key).cloned();
            EnrichedCorridor { corridor, summary }
        })
        .collect();

    let unmatched = enriched.iter().filter(|c| c.summary.is_none()).count();
    info!(
        "Enriched {} corridors, {unmatched} without curvature summary",
        enriched.len()
    );

    enriched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AverageSpeed;

    fn corridor(key: &str) -> CorridorRecord {
        CorridorRecord {
            corridor_key: key.to_string(),
            geometry: None,
        }
    }

    #[test]
    fn unmatched_corridors_are_kept() {
        let mut summaries = BTreeMap::new();
        summaries.insert(
            "A_B".to_string(),
            CorridorSummary {
                corridor_key: "A_B".to_string(),
                total_length: 12.0,
                avg_curvature_speed: AverageSpeed::Known(88.0),
                segment_count: 4,
                excluded_count: 0,
            },
        );

        let enriched = enrich(vec![corridor("C_D"), corridor("A_B")], &summaries);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].corridor.corridor_key, "C_D");
        assert!(enriched[0].summary.is_none());
        assert_eq!(
            enriched[1].summary.as_ref().map(|s| s.total_length),
            Some(12.0)
        );
    }
}
