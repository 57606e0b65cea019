//! Sequential phase orchestrator with timing.

use std::collections::HashMap;
use std::time::Instant;

use rayon::prelude::*;

use crate::analyzers::AnalyzerRegistry;
use crate::assembler;
use crate::config::{AnalysisConfig, AnalysisReport, AnalysisStatus};
use crate::graph::hotspots;
use crate::output::build_report;
use crate::walker;

/// Phase labels for progress reporting.
const PHASE_LABELS: &[(&str, &str)] = &[
    ("walk", "Scanning file tree"),
    ("analyze", "Extracting structure"),
    ("assemble", "Linking call graph"),
    ("rank", "Ranking hotspots"),
];

/// Progress callback type: (phase_name, label).
pub type ProgressCallback = Box<dyn FnMut(&str, &str)>;

/// Execute the four-phase analysis pipeline and return the report.
///
/// No phase is fatal: unreadable files, oversized files, and parse failures
/// all degrade per file, so the result is best-effort total coverage.
pub fn run_analysis(
    config: &AnalysisConfig,
    mut progress_callback: Option<ProgressCallback>,
) -> Result<AnalysisReport, Box<dyn std::error::Error>> {
    let mut timings: HashMap<String, f64> = HashMap::new();
    let total_start = Instant::now();

    let mut notify = |name: &str| {
        if let Some(ref mut cb) = progress_callback {
            let label = PHASE_LABELS
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, l)| *l)
                .unwrap_or(name);
            cb(name, label);
        }
    };

    notify("walk");
    let start = Instant::now();
    let walked = walker::walk_repository(config);
    timings.insert("walk".to_string(), start.elapsed().as_secs_f64());

    notify("analyze");
    let start = Instant::now();
    let registry = AnalyzerRegistry::new();
    // Per-file analysis has no cross-file dependency; fan out and keep the
    // walk order, then merge sequentially below.
    let analyses: Vec<_> = walked
        .records
        .par_iter()
        .map(|record| registry.analyze(record))
        .collect();
    let parse_failures = analyses
        .iter()
        .filter(|a| a.status == AnalysisStatus::ParseFailed)
        .count();
    timings.insert("analyze".to_string(), start.elapsed().as_secs_f64());

    notify("assemble");
    let start = Instant::now();
    let (modules, graph) = assembler::assemble(analyses);
    timings.insert("assemble".to_string(), start.elapsed().as_secs_f64());

    notify("rank");
    let start = Instant::now();
    let hotspot_ids = hotspots::rank_hotspots(&graph, config.hotspot_count);
    timings.insert("rank".to_string(), start.elapsed().as_secs_f64());

    let total_ms = total_start.elapsed().as_secs_f64() * 1000.0;

    Ok(build_report(
        config,
        &walked,
        parse_failures,
        modules,
        &graph,
        hotspot_ids,
        &timings,
        total_ms,
    ))
}
