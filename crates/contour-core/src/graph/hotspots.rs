//! Degree-centrality hotspot ranking.

use crate::graph::call_graph::CallGraph;

/// Rank symbol ids by undirected degree, descending, returning at most `k`.
///
/// The sort is stable over first-encounter node order, so equal degrees
/// keep the order in which the ids first appeared while scanning edges.
/// Cheap and deterministic — a proxy for centrality, not a replacement.
pub fn rank_hotspots(graph: &CallGraph, k: usize) -> Vec<String> {
    let mut ranked: Vec<(usize, String)> = graph
        .nodes()
        .map(|(idx, id)| (graph.degree(idx), id.to_string()))
        .collect();

    ranked.sort_by_key(|(degree, _)| std::cmp::Reverse(*degree));
    ranked.into_iter().take(k).map(|(_, id)| id).collect()
}
