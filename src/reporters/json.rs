use anyhow::Result;

use super::summary::ReportSummary;
use super::traits::{flatten, Reporter};
use crate::core::dispatcher::DirectoryResults;

pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn name(&self) -> &str {
        "JSON"
    }

    fn extension(&self) -> &str {
        "json"
    }

    fn generate(&self, results: &DirectoryResults) -> Result<String> {
        let output = serde_json::json!({
            "summary": ReportSummary::new(&flatten(results), None),
            "files": results,
        });
        Ok(serde_json::to_string_pretty(&output)?)
    }
}
