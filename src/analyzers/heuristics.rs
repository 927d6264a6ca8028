//! Text heuristics shared by the analyzers. None of this understands the
//! language: braces inside strings or comments are counted like any other.

use regex::Regex;
use std::sync::LazyLock;

static CAMEL_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-zA-Z0-9]*$").unwrap());
static PASCAL_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").unwrap());
static UPPER_SNAKE_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Z0-9_]*$").unwrap());
static SNAKE_CASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

static FUNCTION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:async\s+)?(?:function\s+)?(\w+)\s*\([^)]*\)\s*(?::\s*[^{]+)?\s*\{").unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Convention {
    CamelCase,
    PascalCase,
    UpperSnakeCase,
    SnakeCase,
}

impl Convention {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            Convention::CamelCase => CAMEL_CASE.is_match(name),
            Convention::PascalCase => PASCAL_CASE.is_match(name),
            Convention::UpperSnakeCase => UPPER_SNAKE_CASE.is_match(name),
            Convention::SnakeCase => SNAKE_CASE.is_match(name),
        }
    }
}

/// True when the name has at least one letter and none of them are lowercase.
pub fn is_all_caps(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic()) && !name.chars().any(|c| c.is_lowercase())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    /// 1-based line of the declaration.
    pub line_number: usize,
    /// Lines from the declaration through the line where the brace count
    /// returns to zero.
    pub length: usize,
}

/// Finds anything that looks like `name(...) {` and measures it with a
/// running brace counter. Control-flow headers such as `if (x) {` match too.
pub fn extract_functions(lines: &[&str]) -> Vec<FunctionInfo> {
    let mut functions = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        for caps in FUNCTION_DECL.captures_iter(line) {
            let mut depth: i64 = 0;
            let mut length = 0;
            for body_line in &lines[idx..] {
                depth += brace_delta(body_line);
                length += 1;
                if depth <= 0 {
                    break;
                }
            }
            functions.push(FunctionInfo {
                name: caps[1].to_string(),
                line_number: idx + 1,
                length,
            });
        }
    }

    functions
}

/// Collects the lines of the block opened at or after `start` (0-based),
/// stopping once the brace count returns to zero.
pub fn function_body(lines: &[&str], start: usize) -> String {
    let mut body = Vec::new();
    let mut depth: i64 = 0;
    let mut started = false;

    for line in lines.iter().skip(start) {
        if line.contains('{') {
            started = true;
        }
        if started {
            body.push(*line);
            depth += brace_delta(line);
            if depth == 0 {
                break;
            }
        }
    }

    body.join("\n")
}

fn brace_delta(line: &str) -> i64 {
    line.matches('{').count() as i64 - line.matches('}').count() as i64
}

/// Maps a byte offset in `content` to a 1-based line and 0-based column.
pub fn line_and_column(content: &str, offset: usize) -> (usize, usize) {
    let before = &content[..offset.min(content.len())];
    let line = before.matches('\n').count() + 1;
    let column = match before.rfind('\n') {
        Some(pos) => before.len() - pos - 1,
        None => before.len(),
    };
    (line, column)
}
