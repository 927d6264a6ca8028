use anyhow::Result;

use crate::core::dispatcher::DirectoryResults;

pub trait Reporter: Send + Sync {
    /// Reporter name for display
    fn name(&self) -> &str;

    /// File extension for the output file
    fn extension(&self) -> &str;

    /// Render per-file results, already filtered by the caller.
    fn generate(&self, results: &DirectoryResults) -> Result<String>;
}

/// All issues in file order, as a flat list.
pub fn flatten(results: &DirectoryResults) -> Vec<crate::analyzers::Issue> {
    results.values().flatten().cloned().collect()
}
