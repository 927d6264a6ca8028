use async_trait::async_trait;
use std::time::Duration;

use super::{probe, run_command, ExternalLinter};
use crate::analyzers::{Issue, Severity};

pub struct PrettierLinter {
    timeout: Duration,
}

impl PrettierLinter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ExternalLinter for PrettierLinter {
    fn name(&self) -> &'static str {
        "prettier"
    }

    fn install_hint(&self) -> &'static str {
        "npm install -g prettier"
    }

    async fn is_available(&self) -> bool {
        probe("prettier", self.timeout).await
    }

    async fn lint_content(&self, content: &str, file_path: &str) -> Vec<Issue> {
        let args = ["--stdin-filepath", file_path];
        match run_command("prettier", &args, Some(content), self.timeout).await {
            Ok(output) if output.success() => {
                formatting_issue(content, &output.stdout, file_path).into_iter().collect()
            }
            Ok(output) => {
                tracing::warn!(path = file_path, stderr = %output.stderr.trim(), "prettier failed");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = file_path, error = %e, "prettier did not run");
                Vec::new()
            }
        }
    }
}

pub fn formatting_issue(content: &str, formatted: &str, file_path: &str) -> Option<Issue> {
    if formatted.is_empty() || formatted == content {
        return None;
    }
    Some(
        Issue::new(
            "prettier-formatting",
            Severity::Warning,
            "formatting",
            file_path,
            1,
            "File is not properly formatted according to Prettier rules",
        )
        .with_fix("Run Prettier to format the file"),
    )
}
