use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;

use curvspeed_core::prelude::*;
use rayon::ThreadPool;
use tracing::info;

use crate::error::CliError;
use crate::io::{self, CURVATURE_SPEED, SummaryRow};
use crate::settings::Settings;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

fn worker_pool(threads: Option<usize>) -> Result<ThreadPool, CliError> {
    // 0 lets rayon pick one thread per core
    Ok(rayon::ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or(0))
        .build()?)
}

pub fn extract(
    settings: &Settings,
    network_path: &Path,
    routes_path: &Path,
    out: &Path,
) -> Result<(), CliError> {
    info!("Loading network edges from {}", network_path.display());
    let network = io::network_from_features(&io::read_features(network_path)?)?;
    info!(
        "Network has {} nodes and {} edges",
        network.node_count(),
        network.edge_count()
    );

    let routes = io::routes_from_features(&io::read_features(routes_path)?)?;
    let segments = extract_segments(&network, &routes, &settings.extraction);

    let features = segments
        .iter()
        .map(io::segment_to_feature)
        .collect::<Result<Vec<_>, _>>()?;
    io::write_features(out, features)?;
    info!("Saved {} segments to {}", segments.len(), out.display());
    Ok(())
}

/// Evaluates segments on a sized pool while a reporter thread logs progress
fn evaluate_with_progress(
    segments: &[SegmentRecord],
    config: &CurvatureConfig,
    pool: &ThreadPool,
) -> Result<Vec<EvaluatedSegment>, CliError> {
    let progress = Progress::new();
    let total = segments.len();
    let (stop, stopped) = mpsc::channel::<()>();

    let evaluated = thread::scope(|scope| {
        let reporter = progress.clone();
        scope.spawn(move || {
            while let Err(RecvTimeoutError::Timeout) = stopped.recv_timeout(PROGRESS_INTERVAL) {
                info!("Evaluated {}/{total} segments", reporter.completed());
            }
        });

        let evaluated = pool.install(|| evaluate_segments(segments, config, &progress));
        drop(stop);
        evaluated
    })?;

    info!("Evaluated {}/{total} segments", progress.completed());
    Ok(evaluated)
}

pub fn estimate(
    settings: &Settings,
    segments_path: &Path,
    out: &Path,
    max_speed: Option<f64>,
    spacing: Option<f64>,
) -> Result<(), CliError> {
    let mut config = settings.curvature;
    if let Some(max_speed) = max_speed {
        config.max_speed_mph = max_speed;
    }
    if let Some(spacing) = spacing {
        config.densify_spacing = spacing;
    }
    config.validate()?;

    info!("Loading segments from {}", segments_path.display());
    let mut features = io::read_features(segments_path)?;
    let segments = io::segments_from_features(&features)?;

    let pool = worker_pool(settings.threads)?;
    let evaluated = evaluate_with_progress(&segments, &config, &pool)?;

    io::attach_speeds(&mut features, &evaluated);
    io::write_features(out, features)?;
    info!("Saved {} segments to {}", evaluated.len(), out.display());
    Ok(())
}

pub fn aggregate_corridors(
    segments_path: &Path,
    csv_path: &Path,
    corridors: Option<(&Path, &Path)>,
) -> Result<(), CliError> {
    info!("Loading evaluated segments from {}", segments_path.display());
    let evaluated = io::evaluated_from_features(&io::read_features(segments_path)?)?;

    let summaries = aggregate(&evaluated);
    io::write_summary_csv(csv_path, summaries.values())?;
    info!(
        "Saved {} corridor summaries to {}",
        summaries.len(),
        csv_path.display()
    );

    let Some((corridors_path, out)) = corridors else {
        return Ok(());
    };

    let mut features = io::read_features(corridors_path)?;
    let records = io::corridors_from_features(&features)?;
    let enriched = enrich(records, &summaries);

    for (feature, corridor) in features.iter_mut().zip(&enriched) {
        SummaryRow::new(&corridor.corridor.corridor_key, corridor.summary.as_ref())
            .apply_to(feature);
    }
    io::write_features(out, features)?;
    info!("Saved enriched corridors to {}", out.display());
    Ok(())
}

pub fn inspect(segments_path: &Path, top: usize) -> Result<(), CliError> {
    let features = io::read_features(segments_path)?;
    let inspection = io::inspect_features(&features);

    let mut diagnostics = SegmentDiagnostics::collect(&inspection.segments);
    diagnostics.unsupported_geometry = inspection.rejected;
    println!("{diagnostics}");

    println!("geometry types:");
    for (name, count) in &inspection.geometry_types {
        println!("  {name:<16}{count}");
    }

    let speeds: Option<Vec<f64>> = inspection.speeds.iter().copied().collect();
    if let Some(speeds) = speeds.filter(|s| !s.is_empty()) {
        let evaluated: Vec<EvaluatedSegment> = inspection
            .segments
            .into_iter()
            .zip(speeds)
            .map(|(record, curvature_speed)| EvaluatedSegment {
                record,
                curvature_speed,
            })
            .collect();
        println!("most common {CURVATURE_SPEED} values:");
        for (speed, count) in most_common_speeds(&evaluated, top) {
            println!("  {speed:>10.3}  {count}");
        }
    }
    Ok(())
}
