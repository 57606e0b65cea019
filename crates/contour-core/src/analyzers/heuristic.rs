//! Lexical fallback analyzer for files without a precise grammar.

use super::SourceAnalyzer;
use crate::config::{AnalysisStatus, ClassFact, FileAnalysis, FileRecord, FunctionFact, ModuleFacts};

pub struct HeuristicAnalyzer;

impl Default for HeuristicAnalyzer {
    fn default() -> Self {
        Self
    }
}

impl HeuristicAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl SourceAnalyzer for HeuristicAnalyzer {
    fn extensions(&self) -> &[&str] {
        &[]
    }

    fn name(&self) -> &str {
        "heuristic"
    }

    /// Line-oriented scan: a trimmed line starting with `def ` yields a
    /// function name up to the first `(`; one starting with `class ` yields
    /// a class name up to the first `(` or `:`. No call facts are produced —
    /// lexical matching alone would fabricate unreliable edges.
    fn analyze(&self, record: &FileRecord) -> FileAnalysis {
        let mut facts = ModuleFacts::default();

        for (i, line) in record.content.lines().enumerate() {
            let trimmed = line.trim();
            if let Some(rest) = trimmed.strip_prefix("def ") {
                let name = rest.find('(').map(|at| &rest[..at]).unwrap_or(rest);
                if !name.is_empty() {
                    facts.functions.push(FunctionFact {
                        name: name.to_string(),
                        line: i + 1,
                        params: Vec::new(),
                    });
                }
            } else if let Some(rest) = trimmed.strip_prefix("class ") {
                let name = rest.find(['(', ':']).map(|at| &rest[..at]).unwrap_or(rest);
                if !name.is_empty() {
                    facts.classes.push(ClassFact {
                        name: name.to_string(),
                        line: i + 1,
                        bases: Vec::new(),
                    });
                }
            }
        }

        FileAnalysis {
            relpath: record.relpath.clone(),
            facts,
            status: AnalysisStatus::Parsed,
        }
    }
}
