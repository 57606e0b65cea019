//! Core data types and configuration for Contour analysis.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// A file discovered by the walker.
///
/// `content` is empty when the file was oversized or unreadable; the record
/// still participates in analysis and simply yields no facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileRecord {
    /// Absolute path on disk.
    pub path: String,
    /// Path relative to the repository root, `/`-separated.
    pub relpath: String,
    /// Bare file name.
    pub name: String,
    /// Decoded file content, possibly empty.
    pub content: String,
}

/// A function or method extracted from a source file.
///
/// `name` is qualified with the enclosing class (`Greeter.greet`) when the
/// definition is class-scoped, otherwise it is the bare name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionFact {
    pub name: String,
    pub line: usize,
    #[serde(default)]
    pub params: Vec<String>,
}

/// A class extracted from a source file. Base identifiers are best-effort:
/// attribute chains are reduced to their trailing identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassFact {
    pub name: String,
    pub line: usize,
    #[serde(default)]
    pub bases: Vec<String>,
}

/// A call site: the qualified caller and the textual callee name. The callee
/// is an unresolved string, not a reference to a definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallFact {
    pub caller: String,
    pub callee: String,
}

/// Structural facts for one module (one file).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleFacts {
    #[serde(default)]
    pub functions: Vec<FunctionFact>,
    #[serde(default)]
    pub classes: Vec<ClassFact>,
    #[serde(default)]
    pub calls: Vec<CallFact>,
}

/// How the analyzer fared on a single file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisStatus {
    Parsed,
    ParseFailed,
}

/// Per-file analysis outcome: extracted facts plus a parse status for the
/// diagnosability counters.
#[derive(Debug, Clone)]
pub struct FileAnalysis {
    pub relpath: String,
    pub facts: ModuleFacts,
    pub status: AnalysisStatus,
}

/// Composite graph-node key: `"<relative path>::<qualified name>"`.
pub fn symbol_id(relpath: &str, name: &str) -> String {
    format!("{relpath}::{name}")
}

/// A directed call edge, serialized as a `["source", "destination"]` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallEdge(pub String, pub String);

/// Configuration for an analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub repo_path: String,
    pub output_path: Option<String>,
    /// Maximum number of hotspot ids to report.
    #[serde(default = "default_hotspot_count")]
    pub hotspot_count: usize,
    /// Files larger than this are recorded with empty content.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,
    /// Extra directory names to exclude on top of the built-in noise set.
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub quiet: bool,
}

fn default_hotspot_count() -> usize {
    10
}
fn default_max_file_size() -> u64 {
    300_000
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            repo_path: String::new(),
            output_path: None,
            hotspot_count: default_hotspot_count(),
            max_file_size: default_max_file_size(),
            exclude_patterns: Vec::new(),
            verbose: false,
            quiet: false,
        }
    }
}

/// Result of an analysis run — matches the JSON output schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub stats: HashMap<String, serde_json::Value>,
    #[serde(default)]
    pub modules: BTreeMap<String, ModuleFacts>,
    #[serde(default)]
    pub call_edges: Vec<CallEdge>,
    #[serde(default)]
    pub hotspots: Vec<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self {
            version: default_version(),
            metadata: HashMap::new(),
            stats: HashMap::new(),
            modules: BTreeMap::new(),
            call_edges: Vec::new(),
            hotspots: Vec::new(),
        }
    }
}
