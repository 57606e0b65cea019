//! Normalizes per-file facts into the module map and the edge store.

use std::collections::BTreeMap;

use crate::config::{symbol_id, FileAnalysis, ModuleFacts};
use crate::graph::call_graph::CallGraph;

/// Fold per-file analyses into the module map and call graph.
///
/// Every call fact with a non-empty caller and callee emits an edge whose
/// destination id is scoped to the caller's file, even when the textual name
/// plausibly resolves elsewhere — a recall-biased approximation that also
/// conflates same-named symbols within one file.
pub fn assemble(analyses: Vec<FileAnalysis>) -> (BTreeMap<String, ModuleFacts>, CallGraph) {
    let mut modules = BTreeMap::new();
    let mut graph = CallGraph::new();

    for analysis in analyses {
        for call in &analysis.facts.calls {
            if call.caller.is_empty() || call.callee.is_empty() {
                continue;
            }
            graph.add_edge(
                &symbol_id(&analysis.relpath, &call.caller),
                &symbol_id(&analysis.relpath, &call.callee),
            );
        }
        // Keyed by relative path; last write wins on collision.
        modules.insert(analysis.relpath, analysis.facts);
    }

    (modules, graph)
}
