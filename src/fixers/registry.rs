use regex::{Captures, Regex};
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::analyzers::custom::CustomRule;

/// Computes the replacement for a matched span.
pub type ReplaceFn = fn(&Captures) -> String;

/// Decides whether a match may be rewritten. Receives the match, the line it
/// was found on and the full content as it stands before the fix.
pub type ConditionFn = fn(&Captures, &str, &str) -> bool;

#[derive(Debug, Clone)]
pub enum Replacement {
    /// `$1` / `${name}` style template.
    Template(String),
    Computed(ReplaceFn),
}

#[derive(Debug, Clone)]
pub struct FixPattern {
    pub pattern: Regex,
    pub replacement: Replacement,
    pub condition: Option<ConditionFn>,
}

impl FixPattern {
    fn new(pattern: &Regex, replacement: Replacement, condition: Option<ConditionFn>) -> Self {
        Self {
            pattern: pattern.clone(),
            replacement,
            condition,
        }
    }

    /// Rewrites the first span on `line` that matches and passes the
    /// condition. Everything outside the span is kept.
    pub fn apply(&self, line: &str, content: &str) -> Option<String> {
        for caps in self.pattern.captures_iter(line) {
            if self.condition.is_some_and(|accept| !accept(&caps, line, content)) {
                continue;
            }
            let span = caps.get(0)?;
            let replaced = match &self.replacement {
                Replacement::Template(template) => {
                    let mut out = String::new();
                    caps.expand(template, &mut out);
                    out
                }
                Replacement::Computed(f) => f(&caps),
            };
            return Some(format!("{}{}{}", &line[..span.start()], replaced, &line[span.end()..]));
        }
        None
    }
}

static LET_BINDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\blet\s+([A-Za-z_$][\w$]*)(\s*=)").unwrap());
static CONSOLE_LOG_CALL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)console\.log\s*\((?:[^()]|\([^()]*\))*\)\s*;?").unwrap());
static CONSOLE_CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)console\.(?:log|warn|error|info|debug)\s*\((?:[^()]|\([^()]*\))*\)\s*;?").unwrap()
});
static SNAKE_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-z][a-z0-9]*)_([A-Za-z0-9_]*[A-Za-z0-9])\b").unwrap());
static CONST_BINDING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bconst\s+([A-Za-z_][A-Za-z0-9_]*)\s*=").unwrap());
static LITERAL_CONSTANT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"=\s*([A-Z_][A-Z0-9_]*|\d+)\s*(;|$)").unwrap());
static TYPE_DECL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(class|interface)\s+([A-Za-z_$][\w$]*)").unwrap());
static CLASS_DECL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\bclass\s+(\w+)").unwrap());
static ID_LOCATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"page\.locator\(\s*["']#([\w-]+)["']\s*\)"#).unwrap());
static VISIBLE_ASSERT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bassert\s*\(\s*await\s+(.+?)\.isVisible\(\s*\)\s*\)").unwrap()
});
static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@([A-Za-z0-9_][\w-]*)").unwrap());

/// Rule id to textual transform. Built-ins cover the analyzers' fixable
/// rules; auto-fixable custom rules add their own templates.
#[derive(Debug, Clone)]
pub struct FixRegistry {
    patterns: HashMap<String, FixPattern>,
}

impl FixRegistry {
    pub fn empty() -> Self {
        Self {
            patterns: HashMap::new(),
        }
    }

    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register(
            "ts-prefer-const",
            FixPattern::new(&LET_BINDING, Replacement::Template("const $1$2".into()), Some(never_reassigned)),
        );
        registry.register(
            "ts-no-console-log",
            FixPattern::new(&CONSOLE_LOG_CALL, Replacement::Template(String::new()), None),
        );
        registry.register(
            "pw-no-console-in-tests",
            FixPattern::new(&CONSOLE_CALL, Replacement::Template(String::new()), None),
        );
        registry.register(
            "ts-naming-camelcase",
            FixPattern::new(&SNAKE_IDENT, Replacement::Computed(snake_to_camel), Some(not_a_property)),
        );
        registry.register(
            "ts-naming-constants",
            FixPattern::new(&CONST_BINDING, Replacement::Computed(constant_name), Some(literal_constant)),
        );
        registry.register(
            "ts-naming-pascalcase-classes",
            FixPattern::new(&TYPE_DECL, Replacement::Computed(pascal_type_name), Some(not_pascal)),
        );
        registry.register(
            "pw-page-object-naming",
            FixPattern::new(&CLASS_DECL, Replacement::Template("class ${1}Page".into()), Some(missing_page_suffix)),
        );
        registry.register(
            "pw-stable-locators",
            FixPattern::new(&ID_LOCATOR, Replacement::Template(r#"page.getByTestId("$1")"#.into()), None),
        );
        registry.register(
            "pw-proper-assertions",
            FixPattern::new(&VISIBLE_ASSERT, Replacement::Template("await expect($1).toBeVisible()".into()), None),
        );
        registry.register(
            "cucumber-tag-conventions",
            FixPattern::new(&TAG, Replacement::Computed(lowercase_tag), Some(tag_has_uppercase)),
        );
        registry
    }

    pub fn register(&mut self, rule_id: &str, pattern: FixPattern) {
        self.patterns.insert(rule_id.to_string(), pattern);
    }

    /// Registers the `fix` template of an auto-fixable custom rule. Rules
    /// without one are ignored.
    pub fn register_custom_rule(&mut self, rule: &CustomRule) {
        if !rule.auto_fixable {
            return;
        }
        if let Some(template) = &rule.fix {
            self.register(
                &rule.id,
                FixPattern::new(rule.pattern(), Replacement::Template(template.clone()), None),
            );
        }
    }

    pub fn find(&self, rule_id: &str) -> Option<&FixPattern> {
        self.patterns.get(rule_id)
    }

    pub fn contains(&self, rule_id: &str) -> bool {
        self.patterns.contains_key(rule_id)
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.patterns.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for FixRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

fn never_reassigned(caps: &Captures, _line: &str, content: &str) -> bool {
    let name = regex::escape(&caps[1]);
    let assignment = format!(r"\b{name}\s*(?:[-+*/%]?=)(?:[^=>]|$)");
    let update = format!(r"(?:\+\+|--)\s*\b{name}\b|\b{name}\s*(?:\+\+|--)");
    let (Ok(assignment), Ok(update)) = (Regex::new(&assignment), Regex::new(&update)) else {
        return false;
    };
    // The declaration itself accounts for one assignment.
    assignment.find_iter(content).count() <= 1 && !update.is_match(content)
}

fn not_a_property(caps: &Captures, line: &str, _content: &str) -> bool {
    caps.get(0)
        .is_some_and(|m| !line[..m.start()].ends_with('.'))
}

fn literal_constant(_caps: &Captures, line: &str, _content: &str) -> bool {
    LITERAL_CONSTANT.is_match(line)
}

fn not_pascal(caps: &Captures, _line: &str, _content: &str) -> bool {
    pascal_case(&caps[2]) != caps[2]
}

fn missing_page_suffix(caps: &Captures, _line: &str, _content: &str) -> bool {
    !caps[1].ends_with("Page")
}

fn tag_has_uppercase(caps: &Captures, _line: &str, _content: &str) -> bool {
    caps[1].chars().any(char::is_uppercase)
}

fn snake_to_camel(caps: &Captures) -> String {
    let mut out = caps[1].to_string();
    for part in caps[2].split('_').filter(|p| !p.is_empty()) {
        out.push_str(&capitalize(&part.to_lowercase()));
    }
    out
}

fn constant_name(caps: &Captures) -> String {
    format!("const {} =", to_upper_snake_case(&caps[1]))
}

fn pascal_type_name(caps: &Captures) -> String {
    format!("{} {}", &caps[1], pascal_case(&caps[2]))
}

fn lowercase_tag(caps: &Captures) -> String {
    format!("@{}", caps[1].to_lowercase())
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `userService` and `user_service` both become `UserService`.
pub fn pascal_case(name: &str) -> String {
    name.split('_')
        .filter(|p| !p.is_empty())
        .map(capitalize)
        .collect()
}

/// `maxRetries` becomes `MAX_RETRIES`; leading underscores are dropped.
pub fn to_upper_snake_case(name: &str) -> String {
    let mut out = String::new();
    let mut prev: Option<char> = None;
    for c in name.chars() {
        if c.is_uppercase() && prev.is_some_and(|p| p.is_lowercase() || p.is_ascii_digit()) {
            out.push('_');
        }
        out.extend(c.to_uppercase());
        prev = Some(c);
    }
    out.trim_start_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fix(rule_id: &str, line: &str) -> Option<String> {
        FixRegistry::builtin().find(rule_id).unwrap().apply(line, line)
    }

    #[test]
    fn test_prefer_const() {
        assert_eq!(
            fix("ts-prefer-const", "let apiKey = \"abc\";").as_deref(),
            Some("const apiKey = \"abc\";")
        );
    }

    #[test]
    fn test_prefer_const_skips_reassigned() {
        let registry = FixRegistry::builtin();
        let pattern = registry.find("ts-prefer-const").unwrap();
        let content = "let count = 0;\ncount = 5;";
        assert!(pattern.apply("let count = 0;", content).is_none());

        let content = "let total = 0;\ntotal += 1;";
        assert!(pattern.apply("let total = 0;", content).is_none());

        let content = "let i = 0;\ni++;";
        assert!(pattern.apply("let i = 0;", content).is_none());

        let content = "let ok = 1;\nif (ok == 1) {}";
        assert!(pattern.apply("let ok = 1;", content).is_some());
    }

    #[test]
    fn test_console_removal() {
        assert_eq!(fix("ts-no-console-log", "  console.log(\"debug\", x);").as_deref(), Some("  "));
        assert_eq!(
            fix("pw-no-console-in-tests", "console.warn(format(a, b));").as_deref(),
            Some("")
        );
    }

    #[test]
    fn test_console_removal_keeps_trailing_code() {
        assert_eq!(
            fix("ts-no-console-log", "if (ready) console.log(state); else retry(3);").as_deref(),
            Some("if (ready)  else retry(3);")
        );
        assert_eq!(
            fix("pw-no-console-in-tests", "console.error(format(err)); await page.close();")
                .as_deref(),
            Some(" await page.close();")
        );
    }

    #[test]
    fn test_camelcase() {
        assert_eq!(
            fix("ts-naming-camelcase", "let user_name = 'x';").as_deref(),
            Some("let userName = 'x';")
        );
        assert_eq!(
            fix("ts-naming-camelcase", "function get_user_by_id() {").as_deref(),
            Some("function getUserById() {")
        );
        assert!(fix("ts-naming-camelcase", "obj.user_name = 1;").is_none());
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            fix("ts-naming-constants", "const _MAX = 10;").as_deref(),
            Some("const MAX = 10;")
        );
        assert!(fix("ts-naming-constants", "const _MAX = compute();").is_none());
    }

    #[test]
    fn test_pascal_classes_and_page_objects() {
        assert_eq!(
            fix("ts-naming-pascalcase-classes", "export class user_service {").as_deref(),
            Some("export class UserService {")
        );
        assert_eq!(
            fix("pw-page-object-naming", "export class Login {").as_deref(),
            Some("export class LoginPage {")
        );
        assert!(fix("pw-page-object-naming", "class LoginPage {").is_none());
    }

    #[test]
    fn test_playwright_rewrites() {
        assert_eq!(
            fix("pw-stable-locators", "await page.locator('#submit').click();").as_deref(),
            Some("await page.getByTestId(\"submit\").click();")
        );
        assert_eq!(
            fix("pw-proper-assertions", "assert(await page.locator('#x').isVisible());").as_deref(),
            Some("await expect(page.locator('#x')).toBeVisible();")
        );
    }

    #[test]
    fn test_tag_lowercase_targets_uppercase_tag() {
        assert_eq!(
            fix("cucumber-tag-conventions", "@smoke @SmokeTest").as_deref(),
            Some("@smoke @smoketest")
        );
    }

    #[test]
    fn test_upper_snake_case() {
        assert_eq!(to_upper_snake_case("maxRetries"), "MAX_RETRIES");
        assert_eq!(to_upper_snake_case("_MAX"), "MAX");
        assert_eq!(to_upper_snake_case("timeout2Secs"), "TIMEOUT2_SECS");
    }

    #[test]
    fn test_custom_rule_template() {
        use crate::analyzers::custom::RuleDefinition;

        let rule = CustomRule::try_from(RuleDefinition {
            id: Some("no-var".into()),
            pattern: Some(r"\bvar\s+".into()),
            message: Some("Use let or const".into()),
            severity: Some("warning".into()),
            category: Some("typescript".into()),
            auto_fixable: true,
            fix: Some("let ".into()),
            ..Default::default()
        })
        .unwrap();
        let mut registry = FixRegistry::builtin();
        registry.register_custom_rule(&rule);
        assert_eq!(
            registry.find("no-var").unwrap().apply("var x = 1;", "").as_deref(),
            Some("let x = 1;")
        );
    }
}
