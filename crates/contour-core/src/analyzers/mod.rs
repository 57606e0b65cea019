//! Source analyzer trait and extension registry.

use std::collections::HashMap;
use std::path::Path;

use crate::config::{FileAnalysis, FileRecord};

pub mod heuristic;
pub mod python;

pub use heuristic::HeuristicAnalyzer;
pub use python::PythonAnalyzer;

/// Trait implemented by every analysis capability.
pub trait SourceAnalyzer: Send + Sync {
    /// File extensions this analyzer claims (e.g. &["py"]).
    fn extensions(&self) -> &[&str];

    /// Short analyzer name for logs.
    fn name(&self) -> &str;

    /// Extract structural facts from one file.
    ///
    /// Never propagates an error: any internal fault degrades to empty
    /// facts for that file.
    fn analyze(&self, record: &FileRecord) -> FileAnalysis;
}

/// Registry mapping file extensions to analyzers, with a lexical fallback
/// for everything unclaimed.
pub struct AnalyzerRegistry {
    analyzers: Vec<Box<dyn SourceAnalyzer>>,
    extension_map: HashMap<String, usize>,
    fallback: HeuristicAnalyzer,
}

impl AnalyzerRegistry {
    pub fn new() -> Self {
        let analyzers: Vec<Box<dyn SourceAnalyzer>> = vec![Box::new(PythonAnalyzer::new())];

        let mut extension_map = HashMap::new();
        for (i, analyzer) in analyzers.iter().enumerate() {
            for ext in analyzer.extensions() {
                extension_map.insert(ext.to_string(), i);
            }
        }

        Self {
            analyzers,
            extension_map,
            fallback: HeuristicAnalyzer::new(),
        }
    }

    /// Analyzer responsible for a file extension (matched lowercase).
    pub fn for_extension(&self, ext: &str) -> &dyn SourceAnalyzer {
        match self.extension_map.get(&ext.to_ascii_lowercase()) {
            Some(&i) => self.analyzers[i].as_ref(),
            None => &self.fallback,
        }
    }

    /// Dispatch a record to the analyzer for its file-name extension.
    pub fn analyze(&self, record: &FileRecord) -> FileAnalysis {
        let ext = Path::new(&record.name)
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .unwrap_or_default();
        self.for_extension(&ext).analyze(record)
    }
}

impl Default for AnalyzerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
