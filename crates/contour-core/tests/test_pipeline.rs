//! Pipeline orchestration and end-to-end integration tests.

mod common;

use std::sync::{Arc, Mutex};

use common::*;
use pretty_assertions::assert_eq;

use contour_core::config::AnalysisConfig;
use contour_core::pipeline::{run_analysis, ProgressCallback};

#[test]
fn pipeline_maps_fixture_repo() {
    let path = fixture_path("python_simple");
    let report = run_analysis(&config_for(&path), None).unwrap();

    assert_eq!(report.version, "1.0");
    assert!(report.modules.contains_key("app.py"));
    assert!(report.modules.contains_key("services.py"));

    let app = &report.modules["app.py"];
    let names: Vec<_> = app.functions.iter().map(|f| f.name.as_str()).collect();
    assert!(names.contains(&"Greeter.greet"));
    assert!(names.contains(&"build_message"));
    assert_eq!(app.classes[0].name, "Greeter");

    // greet() calls into services.py, but the edge stays app.py-scoped.
    assert!(report
        .call_edges
        .iter()
        .any(|e| e.0 == "app.py::Greeter.greet" && e.1 == "app.py::send"));
    assert!(!report.hotspots.is_empty());
}

#[test]
fn edge_endpoints_match_id_pattern() {
    let path = fixture_path("python_simple");
    let report = run_analysis(&config_for(&path), None).unwrap();

    assert!(!report.call_edges.is_empty());
    for edge in &report.call_edges {
        for endpoint in [&edge.0, &edge.1] {
            let (relpath, symbol) = endpoint
                .split_once("::")
                .unwrap_or_else(|| panic!("malformed endpoint: {endpoint}"));
            assert!(!relpath.is_empty());
            assert!(!symbol.is_empty());
        }
    }
}

#[test]
fn two_runs_are_structurally_identical() {
    let path = fixture_path("python_simple");
    let first = run_analysis(&config_for(&path), None).unwrap();
    let second = run_analysis(&config_for(&path), None).unwrap();

    assert_eq!(first.modules, second.modules);
    assert_eq!(first.call_edges, second.call_edges);
    assert_eq!(first.hotspots, second.hotspots);
}

#[test]
fn hotspot_count_is_capped() {
    let path = fixture_path("python_simple");
    let mut config = config_for(&path);
    config.hotspot_count = 1;

    let report = run_analysis(&config, None).unwrap();
    assert!(report.hotspots.len() <= 1);
}

#[test]
fn hotspot_degrees_descend() {
    let path = fixture_path("python_simple");
    let report = run_analysis(&config_for(&path), None).unwrap();

    let degree = |id: &str| {
        report
            .call_edges
            .iter()
            .map(|e| usize::from(e.0 == id) + usize::from(e.1 == id))
            .sum::<usize>()
    };
    let degrees: Vec<_> = report.hotspots.iter().map(|id| degree(id)).collect();
    for window in degrees.windows(2) {
        assert!(window[0] >= window[1], "degrees not descending: {degrees:?}");
    }
}

#[test]
fn mixed_language_repo_uses_fallback() {
    let path = fixture_path("mixed_langs");
    let report = run_analysis(&config_for(&path), None).unwrap();

    let ruby = &report.modules["util.rb"];
    let names: Vec<_> = ruby.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["format", "shout"]);
    assert_eq!(ruby.classes[0].name, "Formatter");
    assert!(ruby.calls.is_empty());

    let notes = &report.modules["notes.txt"];
    assert!(notes.functions.is_empty() && notes.classes.is_empty());

    // Only the Python module contributes edges.
    assert!(report.call_edges.iter().all(|e| e.0.starts_with("main.py::")));
}

#[test]
fn oversized_file_contributes_empty_facts() {
    let dir = tempfile::tempdir().unwrap();
    let mut big = String::from("def hidden():\n    pass\n");
    big.push_str(&"# padding\n".repeat(50_000));
    write_tree(
        dir.path(),
        &[("big.py", big.as_str()), ("ok.py", "def seen():\n    pass\n")],
    );

    let report = run_analysis(&config_for(dir.path()), None).unwrap();

    let big_module = &report.modules["big.py"];
    assert!(big_module.functions.is_empty());
    assert!(big_module.classes.is_empty());
    assert!(big_module.calls.is_empty());
    assert_eq!(report.stats["oversized"], serde_json::json!(1));

    assert_eq!(report.modules["ok.py"].functions[0].name, "seen");
}

#[test]
fn broken_python_file_degrades_without_failing_run() {
    let dir = tempfile::tempdir().unwrap();
    write_tree(
        dir.path(),
        &[
            ("broken.py", "def broken(:\n    pass\n"),
            ("ok.py", "def fine():\n    pass\n"),
        ],
    );

    let report = run_analysis(&config_for(dir.path()), None).unwrap();
    assert!(report.modules["broken.py"].functions.is_empty());
    assert_eq!(report.modules["ok.py"].functions[0].name, "fine");
    assert_eq!(report.stats["parse_failures"], serde_json::json!(1));
    assert_eq!(report.stats["parsed"], serde_json::json!(1));
}

#[test]
fn progress_callback_sees_all_phases() {
    let path = fixture_path("python_simple");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let callback: ProgressCallback = Box::new(move |phase, _label| {
        sink.lock().unwrap().push(phase.to_string());
    });

    run_analysis(&config_for(&path), Some(callback)).unwrap();

    let phases = seen.lock().unwrap();
    assert_eq!(*phases, vec!["walk", "analyze", "assemble", "rank"]);
}

#[test]
fn report_metadata_and_stats_are_populated() {
    let path = fixture_path("python_simple");
    let config = AnalysisConfig {
        repo_path: path.to_string_lossy().to_string(),
        ..Default::default()
    };
    let report = run_analysis(&config, None).unwrap();

    for key in ["repo_name", "analysed_at", "contour_version", "phase_timings"] {
        assert!(report.metadata.contains_key(key), "missing metadata: {key}");
    }
    for key in ["files", "functions", "classes", "call_edges", "parse_failures"] {
        assert!(report.stats.contains_key(key), "missing stat: {key}");
    }
}
