//! Report assembly and JSON serialization.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::process::Command;

use chrono::Utc;

use crate::config::{AnalysisConfig, AnalysisReport, ModuleFacts};
use crate::graph::call_graph::CallGraph;
use crate::walker::WalkOutput;

/// Try to get the current git commit hash (first 12 chars).
fn get_commit_hash(repo_path: &str) -> Option<String> {
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(repo_path)
        .output()
        .ok()
        .and_then(|output| {
            if output.status.success() {
                let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
                Some(hash[..hash.len().min(12)].to_string())
            } else {
                None
            }
        })
}

/// Build the AnalysisReport from the pipeline products.
#[allow(clippy::too_many_arguments)]
pub fn build_report(
    config: &AnalysisConfig,
    walked: &WalkOutput,
    parse_failures: usize,
    modules: BTreeMap<String, ModuleFacts>,
    graph: &CallGraph,
    hotspots: Vec<String>,
    timings: &HashMap<String, f64>,
    total_ms: f64,
) -> AnalysisReport {
    let repo_path = Path::new(&config.repo_path)
        .canonicalize()
        .unwrap_or_else(|_| Path::new(&config.repo_path).to_path_buf());
    let repo_name = repo_path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let call_edges = graph.edges();
    let function_count: usize = modules.values().map(|m| m.functions.len()).sum();
    let class_count: usize = modules.values().map(|m| m.classes.len()).sum();
    let call_count: usize = modules.values().map(|m| m.calls.len()).sum();

    let mut metadata = HashMap::new();
    metadata.insert(
        "repo_name".to_string(),
        serde_json::Value::String(repo_name),
    );
    metadata.insert(
        "repo_path".to_string(),
        serde_json::Value::String(repo_path.to_string_lossy().to_string()),
    );
    metadata.insert(
        "analysed_at".to_string(),
        serde_json::Value::String(Utc::now().to_rfc3339()),
    );
    metadata.insert(
        "contour_version".to_string(),
        serde_json::Value::String(env!("CARGO_PKG_VERSION").to_string()),
    );
    if let Some(hash) = get_commit_hash(&config.repo_path) {
        metadata.insert("commit_hash".to_string(), serde_json::Value::String(hash));
    } else {
        metadata.insert("commit_hash".to_string(), serde_json::Value::Null);
    }
    metadata.insert(
        "analysis_duration_ms".to_string(),
        serde_json::json!(((total_ms * 10.0).round() / 10.0)),
    );
    metadata.insert(
        "phase_timings".to_string(),
        serde_json::to_value(timings).unwrap_or_default(),
    );

    let mut stats = HashMap::new();
    stats.insert("files".to_string(), serde_json::json!(walked.records.len()));
    stats.insert("functions".to_string(), serde_json::json!(function_count));
    stats.insert("classes".to_string(), serde_json::json!(class_count));
    stats.insert("calls".to_string(), serde_json::json!(call_count));
    stats.insert("call_edges".to_string(), serde_json::json!(call_edges.len()));
    stats.insert("hotspots".to_string(), serde_json::json!(hotspots.len()));
    stats.insert(
        "parsed".to_string(),
        serde_json::json!(walked.records.len().saturating_sub(parse_failures)),
    );
    stats.insert(
        "parse_failures".to_string(),
        serde_json::json!(parse_failures),
    );
    stats.insert(
        "read_failures".to_string(),
        serde_json::json!(walked.read_failures),
    );
    stats.insert("oversized".to_string(), serde_json::json!(walked.oversized));

    AnalysisReport {
        version: "1.0".to_string(),
        metadata,
        stats,
        modules,
        call_edges,
        hotspots,
    }
}

/// Write the analysis report to a JSON file.
pub fn write_report(report: &AnalysisReport, output_path: &str) -> std::io::Result<()> {
    if let Some(parent) = Path::new(output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(report).map_err(std::io::Error::other)?;
    std::fs::write(output_path, json)
}
