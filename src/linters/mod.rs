pub mod eslint;
pub mod prettier;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::analyzers::{Issue, Severity};
use crate::core::config::LinterConfig;

pub use eslint::EslintLinter;
pub use prettier::PrettierLinter;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    /// `None` when the process was killed by a signal.
    pub status: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }
}

/// A third-party tool run as a subprocess. Failures to launch or finish in
/// time are soft: they produce no issues, only a log line.
#[async_trait]
pub trait ExternalLinter: Send + Sync {
    fn name(&self) -> &'static str;
    fn install_hint(&self) -> &'static str;
    async fn is_available(&self) -> bool;
    async fn lint_content(&self, content: &str, file_path: &str) -> Vec<Issue>;

    async fn lint(&self, content: &str, file_path: &str) -> Vec<Issue> {
        if !self.is_available().await {
            tracing::warn!(linter = self.name(), "linter not available");
            return vec![not_available_issue(self.name(), self.install_hint(), file_path)];
        }
        self.lint_content(content, file_path).await
    }
}

pub fn not_available_issue(name: &str, install_hint: &str, file_path: &str) -> Issue {
    Issue::new(
        &format!("{name}-not-available"),
        Severity::Warning,
        "system",
        file_path,
        1,
        format!("{name} is not available. Install with: {install_hint}"),
    )
}

/// Spawns `program`, optionally feeding `stdin`, and waits at most `timeout`.
pub async fn run_command(
    program: &str,
    args: &[&str],
    stdin: Option<&str>,
    timeout: Duration,
) -> Result<CommandOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(if stdin.is_some() { Stdio::piped() } else { Stdio::null() })
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to launch {program}"))?;

    // The write runs beside the wait so the timeout bounds both.
    // Dropping the pipe closes stdin.
    if let (Some(input), Some(mut pipe)) = (stdin, child.stdin.take()) {
        let input = input.to_owned();
        let name = program.to_owned();
        tokio::spawn(async move {
            if let Err(e) = pipe.write_all(input.as_bytes()).await {
                tracing::debug!(program = %name, error = %e, "stdin not fully consumed");
            }
        });
    }

    let output = match tokio::time::timeout(timeout, child.wait_with_output()).await {
        Ok(output) => output.with_context(|| format!("Failed to run {program}"))?,
        Err(_) => bail!("{program} timed out after {timeout:?}"),
    };

    Ok(CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        status: output.status.code(),
    })
}

/// `<program> --version` exits cleanly.
pub async fn probe(program: &str, timeout: Duration) -> bool {
    matches!(run_command(program, &["--version"], None, timeout).await, Ok(out) if out.success())
}

/// The linters enabled in config, run one after another.
pub struct LinterManager {
    linters: Vec<Box<dyn ExternalLinter>>,
}

impl LinterManager {
    pub fn new(linters: Vec<Box<dyn ExternalLinter>>) -> Self {
        Self { linters }
    }

    pub fn from_config(config: &LinterConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut linters: Vec<Box<dyn ExternalLinter>> = Vec::new();
        if config.eslint {
            linters.push(Box::new(EslintLinter::new(timeout)));
        }
        if config.prettier {
            linters.push(Box::new(PrettierLinter::new(timeout)));
        }
        Self { linters }
    }

    pub fn is_empty(&self) -> bool {
        self.linters.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.linters.iter().map(|l| l.name()).collect()
    }

    pub async fn lint(&self, content: &str, file_path: &str) -> Vec<Issue> {
        let mut issues = Vec::new();
        for linter in &self.linters {
            let found = linter.lint(content, file_path).await;
            tracing::debug!(linter = linter.name(), path = file_path, count = found.len(), "linter finished");
            issues.extend(found);
        }
        issues
    }
}
