use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

use super::heuristics::line_and_column;
use super::traits::{Analyzer, Issue, Severity, SourceFile};

static USER_STORY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)As a.*I want.*So that").unwrap());
static STEP_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(Given|When|Then|And|But)\s+").unwrap());
static USER_PERSPECTIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(I\s+|The\s+user\s+|User\s+|A\s+user\s+)").unwrap());
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\w+)").unwrap());
static BACKGROUND_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(Given|When|Then|And|But)").unwrap());
static STEP_DEFINITION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(Given|When|Then)\s*\(\s*["'][^"']*["']"#).unwrap());
static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#"["']([^"']*)["']"#).unwrap());
static STEP_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(Given|When|Then)\s*\([^)]+\)").unwrap());

const MIN_FEATURE_DESCRIPTION: usize = 10;
const MIN_SCENARIO_NAME: usize = 15;
const MAX_BACKGROUND_STEPS: usize = 5;
const USER_STORY_WINDOW: usize = 10;
const SCENARIO_UI_WORDS: &[&str] = &["click", "button", "field", "input"];
const STEP_UI_WORDS: &[&str] = &["click", "button", "field", "input", "dropdown"];
const GENERIC_TAGS: &[&str] = &["test", "temp", "todo", "wip"];
const STEP_DOMAINS: &[&str] = &["auth", "user", "product", "order", "common"];
const HARDCODED_VALUES: &[&str] = &["john", "test", "example", "123"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StepKind {
    Given,
    When,
    Then,
    Conjunction,
}

impl StepKind {
    fn of(step: &str) -> Self {
        if step.starts_with("Given ") {
            StepKind::Given
        } else if step.starts_with("When ") {
            StepKind::When
        } else if step.starts_with("Then ") {
            StepKind::Then
        } else {
            StepKind::Conjunction
        }
    }
}

/// Gherkin feature files and the step-definition files that back them.
pub struct CucumberAnalyzer;

impl Analyzer for CucumberAnalyzer {
    fn name(&self) -> &'static str {
        "cucumber"
    }

    fn description(&self) -> &'static str {
        "Gherkin structure, step phrasing, tag and step-definition checks"
    }

    fn applies_to(&self, file: &SourceFile) -> bool {
        file.is_feature() || (file.is_script() && file.file_name().to_lowercase().contains("step"))
    }

    fn analyze(&self, file: &SourceFile) -> Vec<Issue> {
        let lines = file.lines();
        let mut issues = Vec::new();

        if file.is_feature() {
            check_feature_structure(file, &lines, &mut issues);
            check_scenarios(file, &lines, &mut issues);
            check_steps(file, &lines, &mut issues);
            check_tags(file, &lines, &mut issues);
            check_background(file, &mut issues);
        } else if file.path.to_lowercase().contains("step") {
            check_step_definitions(file, &lines, &mut issues);
            check_step_reuse(file, &mut issues);
            check_step_organization(file, &mut issues);
        }

        issues
    }
}

fn check_feature_structure(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    let feature_line = lines
        .iter()
        .position(|line| line.trim().starts_with("Feature:"))
        .map(|idx| idx + 1);

    match feature_line {
        Some(line_number) => {
            let description = lines[line_number - 1].replace("Feature:", "");
            if description.trim().chars().count() < MIN_FEATURE_DESCRIPTION {
                issues.push(Issue::new(
                    "cucumber-feature-description",
                    Severity::Warning,
                    "documentation",
                    file.path,
                    line_number,
                    "Feature description should be more descriptive",
                ));
            }
        }
        None => issues.push(Issue::new(
            "cucumber-feature-structure",
            Severity::Error,
            "structure",
            file.path,
            1,
            "Feature file must start with a Feature declaration",
        )),
    }

    // The user story is looked for in the lines right after the Feature line.
    let story_found = match feature_line {
        Some(line_number) => {
            let end = (line_number + USER_STORY_WINDOW).min(lines.len());
            let window = lines[line_number.min(end)..end].join("\n");
            USER_STORY.is_match(&window)
        }
        None => USER_STORY.is_match(file.content),
    };
    if !story_found {
        issues.push(
            Issue::new(
                "cucumber-feature-structure",
                Severity::Warning,
                "structure",
                file.path,
                feature_line.map_or(1, |l| l + 1),
                "Feature should include user story format (As a... I want... So that...)",
            )
            .with_fix("Add: As a [user] I want [goal] So that [benefit]"),
        );
    }
}

fn check_scenarios(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().starts_with("Scenario:") {
            continue;
        }
        let name = line.replace("Scenario:", "");
        let name = name.trim();

        if name.chars().count() < MIN_SCENARIO_NAME {
            issues.push(
                Issue::new(
                    "cucumber-scenario-naming",
                    Severity::Warning,
                    "naming",
                    file.path,
                    idx + 1,
                    "Scenario names should be more descriptive",
                )
                .with_fix("Use business language to describe the scenario"),
            );
        }

        let lower = name.to_lowercase();
        if SCENARIO_UI_WORDS.iter().any(|w| lower.contains(w)) {
            issues.push(
                Issue::new(
                    "cucumber-no-ui-details",
                    Severity::Warning,
                    "gherkin",
                    file.path,
                    idx + 1,
                    "Scenario names should avoid UI implementation details",
                )
                .with_fix("Focus on business behavior, not UI elements"),
            );
        }
    }
}

fn check_steps(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    // Steps seen before the first Scenario (e.g. Background) form their own group.
    let mut scenario_steps: Vec<(usize, &str)> = Vec::new();

    for (idx, line) in lines.iter().enumerate() {
        let step = line.trim();

        if step.starts_with("Scenario:") {
            check_step_order(file, &scenario_steps, issues);
            scenario_steps.clear();
            continue;
        }
        if !STEP_KEYWORD.is_match(step) {
            continue;
        }
        scenario_steps.push((idx + 1, step));

        let phrase = STEP_KEYWORD.replace(step, "");
        if !USER_PERSPECTIVE.is_match(&phrase) {
            issues.push(
                Issue::new(
                    "cucumber-imperative-mood",
                    Severity::Warning,
                    "gherkin",
                    file.path,
                    idx + 1,
                    "Steps should be written in imperative mood from user perspective",
                )
                .with_fix("Start with \"I\" or use active voice"),
            );
        }

        let lower = step.to_lowercase();
        if STEP_UI_WORDS.iter().any(|w| lower.contains(w)) {
            issues.push(
                Issue::new(
                    "cucumber-no-ui-details",
                    Severity::Warning,
                    "gherkin",
                    file.path,
                    idx + 1,
                    "Steps should avoid UI implementation details",
                )
                .with_fix("Focus on business actions, not UI interactions"),
            );
        }
    }

    check_step_order(file, &scenario_steps, issues);
}

/// Given → When → Then, with And/But continuing whatever phase is current.
fn check_step_order(file: &SourceFile, steps: &[(usize, &str)], issues: &mut Vec<Issue>) {
    let Some(&(first_line, first_step)) = steps.first() else {
        return;
    };

    if StepKind::of(first_step) != StepKind::Given {
        issues.push(Issue::new(
            "cucumber-given-when-then",
            Severity::Error,
            "gherkin",
            file.path,
            first_line,
            "Scenario should start with Given step",
        ));
    }

    let mut acting = false;
    for &(line_number, step) in steps {
        match StepKind::of(step) {
            StepKind::When | StepKind::Then => acting = true,
            StepKind::Given if acting => issues.push(Issue::new(
                "cucumber-given-when-then",
                Severity::Error,
                "gherkin",
                file.path,
                line_number,
                "Given steps should not appear after When or Then",
            )),
            _ => {}
        }
    }
}

fn check_tags(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        if !line.trim().starts_with('@') {
            continue;
        }
        for caps in TAG.captures_iter(line) {
            let Some(m) = caps.get(1) else {
                continue;
            };
            let tag = m.as_str();
            let lower = tag.to_lowercase();
            let column = m.start().saturating_sub(1);

            if GENERIC_TAGS.contains(&lower.as_str()) {
                issues.push(
                    Issue::new(
                        "cucumber-meaningful-tags",
                        Severity::Warning,
                        "organization",
                        file.path,
                        idx + 1,
                        format!("Tag \"@{tag}\" is not meaningful, use descriptive tags"),
                    )
                    .at_column(column)
                    .with_fix("Use tags like @smoke, @regression, @critical"),
                );
            }

            if tag != lower {
                issues.push(
                    Issue::new(
                        "cucumber-tag-conventions",
                        Severity::Warning,
                        "organization",
                        file.path,
                        idx + 1,
                        format!("Tag \"@{tag}\" should use lowercase naming convention"),
                    )
                    .at_column(column)
                    .with_fix(format!("@{lower}"))
                    .fixable(),
                );
            }
        }
    }
}

fn check_background(file: &SourceFile, issues: &mut Vec<Issue>) {
    let Some(start) = file.content.find("Background:") else {
        return;
    };
    let section = &file.content[start..];
    let section = match section.find("Scenario:") {
        Some(end) => &section[..end],
        None => section,
    };

    if BACKGROUND_STEP.find_iter(section).count() > MAX_BACKGROUND_STEPS {
        let (line_number, column) = line_and_column(file.content, start);
        issues.push(
            Issue::new(
                "cucumber-background-limit",
                Severity::Warning,
                "structure",
                file.path,
                line_number,
                "Background has too many steps, keep it minimal",
            )
            .at_column(column)
            .with_fix("Move non-essential steps to individual scenarios"),
        );
    }
}

fn check_step_definitions(file: &SourceFile, lines: &[&str], issues: &mut Vec<Issue>) {
    for (idx, line) in lines.iter().enumerate() {
        let Some(definition) = STEP_DEFINITION.find(line) else {
            continue;
        };
        let Some(caps) = QUOTED.captures(line) else {
            continue;
        };
        let text = &caps[1];
        if text.contains('{') || text.contains("string") {
            continue;
        }
        let lower = text.to_lowercase();
        if HARDCODED_VALUES.iter().any(|v| lower.contains(v)) {
            issues.push(
                Issue::new(
                    "cucumber-step-parameters",
                    Severity::Warning,
                    "step-definitions",
                    file.path,
                    idx + 1,
                    "Consider parameterizing step definition for reusability",
                )
                .at_column(definition.start())
                .with_fix("Use {string} or {int} parameters"),
            );
        }
    }
}

fn check_step_reuse(file: &SourceFile, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    let duplicated = STEP_CALL
        .find_iter(file.content)
        .any(|m| !seen.insert(m.as_str()));

    if duplicated {
        issues.push(Issue::new(
            "cucumber-step-reusability",
            Severity::Warning,
            "step-definitions",
            file.path,
            1,
            "Duplicate step definitions found, ensure reusability",
        ));
    }
}

fn check_step_organization(file: &SourceFile, issues: &mut Vec<Issue>) {
    let path = file.path.to_lowercase();
    if !STEP_DOMAINS.iter().any(|d| path.contains(d)) {
        issues.push(
            Issue::new(
                "cucumber-step-organization",
                Severity::Warning,
                "step-definitions",
                file.path,
                1,
                "Consider organizing step definitions by domain/feature",
            )
            .with_fix("Group steps by business domain"),
        );
    }
}
