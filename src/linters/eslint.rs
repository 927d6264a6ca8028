use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{probe, run_command, ExternalLinter};
use crate::analyzers::{Issue, Severity};

#[derive(Debug, Deserialize)]
struct FileReport {
    #[serde(default)]
    messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Message {
    rule_id: Option<String>,
    #[serde(default)]
    message: String,
    #[serde(default = "default_severity")]
    severity: u8,
    line: Option<usize>,
    column: Option<usize>,
}

fn default_severity() -> u8 {
    1
}

pub struct EslintLinter {
    timeout: Duration,
}

impl EslintLinter {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl ExternalLinter for EslintLinter {
    fn name(&self) -> &'static str {
        "eslint"
    }

    fn install_hint(&self) -> &'static str {
        "npm install -g eslint @typescript-eslint/parser @typescript-eslint/eslint-plugin"
    }

    async fn is_available(&self) -> bool {
        probe("eslint", self.timeout).await
    }

    async fn lint_content(&self, content: &str, file_path: &str) -> Vec<Issue> {
        let args = ["--format", "json", "--stdin", "--stdin-filename", file_path];
        match run_command("eslint", &args, Some(content), self.timeout).await {
            // 0: clean, 1: findings
            Ok(output) if matches!(output.status, Some(0) | Some(1)) => {
                parse_output(&output.stdout, file_path)
            }
            Ok(output) => {
                tracing::warn!(path = file_path, stderr = %output.stderr.trim(), "eslint failed");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = file_path, error = %e, "eslint did not run");
                Vec::new()
            }
        }
    }
}

pub fn map_severity(severity: u8) -> Severity {
    match severity {
        2 => Severity::Error,
        1 => Severity::Warning,
        _ => Severity::Info,
    }
}

/// ESLint's `--format json` output. Unparsable output yields nothing.
pub fn parse_output(stdout: &str, file_path: &str) -> Vec<Issue> {
    let reports: Vec<FileReport> = match serde_json::from_str(stdout) {
        Ok(reports) => reports,
        Err(e) => {
            tracing::debug!(error = %e, "unparsable eslint output");
            return Vec::new();
        }
    };

    reports
        .into_iter()
        .flat_map(|r| r.messages)
        .map(|m| {
            let message = if m.message.is_empty() {
                "Unknown ESLint issue".to_string()
            } else {
                m.message
            };
            Issue::new(
                m.rule_id.as_deref().unwrap_or("eslint-unknown"),
                map_severity(m.severity),
                "eslint",
                file_path,
                m.line.unwrap_or(1),
                message,
            )
            .at_column(m.column.unwrap_or(0))
        })
        .collect()
}
