//! Skill-tree Markdown parser.
//!
//! The model is asked for a fixed layout (see `prompt::build_tree_prompt`) but
//! only loosely follows it. Parsing is therefore pattern based and lenient:
//! tiers and modules are located by their headings, and fields inside a module
//! are picked up by their line label with defaults for anything missing.
//!
//! Recognised layout:
//!
//! ```text
//! # 🟢 Primary (foundations)
//! ## 1. HTML Basics
//! - Estimated duration: 8 hours
//! - Dependencies: none
//! - Skill points: tags, attributes, forms
//! - Learning goal: write a static page
//! ```

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::generation::Tier;
use crate::generation::prompt::{
    DEPENDENCIES_LABEL, DURATION_LABEL, DURATION_UNIT, GOAL_LABEL, NO_DEPENDENCY, SKILL_POINTS_LABEL,
};

/// Hours assumed when a module does not state a usable duration.
pub const DEFAULT_DURATION_HOURS: i32 = 8;

/// Level-1 heading whose first word (after optional decoration such as an
/// emoji or bold markers) is a tier label.
static TIER_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*#[ \t]+[^\p{L}\p{N}\n]*(primary|intermediate|advanced)\b[^\n]*$")
        .expect("Invalid tier heading regex")
});

/// `## 1. Module name`, also accepting `1)` and bold names.
static MODULE_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*##[ \t]*\d+[.)][ \t]*([^\n]+?)[ \t]*$").expect("Invalid module heading regex")
});

static DURATION_FIELD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?mi){}[ \t]*(\d+)[ \t]*(?:{}|hour|hrs?|h)\b",
        field_prefix(DURATION_LABEL),
        regex::escape(DURATION_UNIT),
    ))
    .expect("Invalid duration regex")
});

static DEPENDENCIES_FIELD: Lazy<Regex> = Lazy::new(|| text_field(DEPENDENCIES_LABEL));
static SKILL_POINTS_FIELD: Lazy<Regex> = Lazy::new(|| text_field(SKILL_POINTS_LABEL));
static GOAL_FIELD: Lazy<Regex> = Lazy::new(|| text_field(GOAL_LABEL));

/// Start of a labelled list line: optional bullet, optional bold around the
/// label and/or the colon.
fn field_prefix(label: &str) -> String {
    format!(
        r"^[ \t]*(?:[-*+][ \t]*)?(?:\*\*)?{}(?:\*\*)?[ \t]*:(?:\*\*)?",
        regex::escape(label)
    )
}

fn text_field(label: &str) -> Regex {
    Regex::new(&format!(r"(?mi){}[ \t]*([^\n]*?)[ \t]*$", field_prefix(label)))
        .expect("Invalid field regex")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedModule {
    pub name: String,
    pub tier: Tier,
    pub duration_hours: i32,
    pub dependencies: String,
    pub skill_points: String,
    pub goal: String,
}

/// Extracts modules in tier order, then heading order within each tier.
///
/// Returns an empty list when no tier heading or no module heading is found;
/// deciding whether that is fatal is up to the caller.
pub fn parse_tree(text: &str) -> Vec<ParsedModule> {
    let text = text.replace("\r\n", "\n");
    let mut modules = Vec::new();

    for (tier, block) in tier_blocks(&text) {
        for (name, body) in module_blocks(block) {
            modules.push(parse_module(name, tier, body));
        }
    }

    dedupe_names(&mut modules);
    modules
}

/// Splits `text` into `(tier, body)` pairs; a body runs to the next tier heading.
fn tier_blocks(text: &str) -> Vec<(Tier, &str)> {
    let headings: Vec<(Tier, usize, usize)> = TIER_HEADING
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let tier = caps.get(1)?.as_str().parse::<Tier>().ok()?;
            Some((tier, whole.start(), whole.end()))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, (tier, _, body_start))| {
            let body_end = headings.get(i + 1).map(|(_, start, _)| *start).unwrap_or(text.len());
            (*tier, &text[*body_start..body_end])
        })
        .collect()
}

/// Splits a tier body into `(module name, module body)` pairs.
fn module_blocks(block: &str) -> Vec<(String, &str)> {
    let headings: Vec<(String, usize, usize)> = MODULE_HEADING
        .captures_iter(block)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = clean_name(caps.get(1)?.as_str());
            (!name.is_empty()).then(|| (name, whole.start(), whole.end()))
        })
        .collect();

    headings
        .iter()
        .enumerate()
        .map(|(i, (name, _, body_start))| {
            let body_end = headings.get(i + 1).map(|(_, start, _)| *start).unwrap_or(block.len());
            (name.clone(), &block[*body_start..body_end])
        })
        .collect()
}

fn clean_name(raw: &str) -> String {
    raw.replace("**", "").trim().trim_matches('*').trim().to_string()
}

fn parse_module(name: String, tier: Tier, body: &str) -> ParsedModule {
    let duration_hours = DURATION_FIELD
        .captures(body)
        .and_then(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
        .filter(|hours| *hours > 0)
        .unwrap_or(DEFAULT_DURATION_HOURS);

    let dependencies = capture_text(&DEPENDENCIES_FIELD, body).unwrap_or_else(|| NO_DEPENDENCY.to_string());
    let skill_points = capture_text(&SKILL_POINTS_FIELD, body).unwrap_or_default();
    let goal = capture_text(&GOAL_FIELD, body).unwrap_or_default();

    ParsedModule {
        name,
        tier,
        duration_hours,
        dependencies,
        skill_points,
        goal,
    }
}

fn capture_text(re: &Regex, body: &str) -> Option<String> {
    re.captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim_matches('*').trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Module names are unique within a path; a repeat gets the first free
/// ` (n)` suffix, checked against every name already kept.
fn dedupe_names(modules: &mut [ParsedModule]) {
    let mut taken: HashSet<String> = HashSet::new();

    for module in modules.iter_mut() {
        if !taken.contains(&module.name) {
            taken.insert(module.name.clone());
            continue;
        }

        let renamed = (2..)
            .map(|n| format!("{} ({})", module.name, n))
            .find(|candidate| !taken.contains(candidate))
            .unwrap_or_else(|| module.name.clone());
        tracing::warn!("duplicate module name `{}` renamed to `{}`", module.name, renamed);
        taken.insert(renamed.clone());
        module.name = renamed;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const FULL_TREE: &str = r#"# 🟢 Primary (foundations)
---
## 1. HTML Basics
- Estimated duration: 8 hours
- Tier: primary
- Dependencies: none
- Skill points: document structure, common tags, semantic HTML
- Learning goal: write a valid static page
## 2. CSS Basics
- Estimated duration: 10 hours
- Tier: primary
- Dependencies: HTML Basics
- Skill points: selectors, box model, layout
- Learning goal: style a page
# 🟡 Intermediate (core)
---
## 1. CSS Layout
- Estimated duration: 12 hours
- Dependencies: HTML Basics, CSS Basics
- Skill points: flexbox, grid, animations
- Learning goal: build complex layouts
## 2. JavaScript Basics
- Estimated duration: 15 hours
- Dependencies: HTML Basics, CSS Basics
- Skill points: variables, functions, DOM, events
- Learning goal: add interaction to a page
## 3. Git
- Estimated duration: 6 hours
- Dependencies: none
- Skill points: commits, branches, merges
- Learning goal: version a project
# 🔴 Advanced (projects)
---
## 1. Advanced JavaScript
- Estimated duration: 18 hours
- Dependencies: JavaScript Basics
- Skill points: async, closures, modules
- Learning goal: write maintainable JavaScript
## 2. Vue
- Estimated duration: 20 hours
- Dependencies: Advanced JavaScript, CSS Layout
- Skill points: components, routing, state
- Learning goal: ship a small Vue app
"#;

    #[test]
    fn full_tree_test() {
        let modules = parse_tree(FULL_TREE);
        assert_eq!(modules.len(), 7);

        let tiers: Vec<Tier> = modules.iter().map(|m| m.tier).collect();
        assert_eq!(
            tiers,
            vec![
                Tier::Primary,
                Tier::Primary,
                Tier::Intermediate,
                Tier::Intermediate,
                Tier::Intermediate,
                Tier::Advanced,
                Tier::Advanced,
            ]
        );

        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "HTML Basics",
                "CSS Basics",
                "CSS Layout",
                "JavaScript Basics",
                "Git",
                "Advanced JavaScript",
                "Vue",
            ]
        );

        let css = &modules[1];
        assert_eq!(css.duration_hours, 10);
        assert_eq!(css.dependencies, "HTML Basics");
        assert_eq!(css.skill_points, "selectors, box model, layout");
        assert_eq!(css.goal, "style a page");
    }

    #[test]
    fn missing_fields_use_defaults_test() {
        let modules = parse_tree("# Primary\n## 1. Basics\n");
        assert_eq!(
            modules,
            vec![ParsedModule {
                name: "Basics".to_string(),
                tier: Tier::Primary,
                duration_hours: 8,
                dependencies: "none".to_string(),
                skill_points: String::new(),
                goal: String::new(),
            }]
        );
    }

    #[test]
    fn unparsable_duration_test() {
        let modules = parse_tree(
            "# Primary\n## 1. A\n- Estimated duration: about a week\n## 2. B\n- Estimated duration: 0 hours\n",
        );
        assert_eq!(modules[0].duration_hours, DEFAULT_DURATION_HOURS);
        assert_eq!(modules[1].duration_hours, DEFAULT_DURATION_HOURS);
    }

    #[test]
    fn enclosing_tier_wins_test() {
        let modules = parse_tree(
            "# Intermediate\n## 1. Traits\n- Tier: advanced\n- Estimated duration: 12 hours\n",
        );
        assert_eq!(modules[0].tier, Tier::Intermediate);
        assert_eq!(modules[0].duration_hours, 12);
    }

    #[test]
    fn no_tiers_test() {
        assert!(parse_tree("").is_empty());
        assert!(parse_tree("Sorry, I cannot help with that.").is_empty());
        // module headings without any tier heading are ignored
        assert!(parse_tree("## 1. Orphan\n- Estimated duration: 3 hours\n").is_empty());
        // level-2 tier heading is not a tier
        assert!(parse_tree("## Primary\n## 1. A\n").is_empty());
    }

    #[test]
    fn tier_without_modules_test() {
        let modules = parse_tree("# Primary\nnothing here\n# Advanced\n## 1. Only\n");
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].tier, Tier::Advanced);
    }

    #[test]
    fn decorated_markdown_test() {
        let text = "#   **PRIMARY** tier\n\
                    ## 1) **Ownership**\n\
                    * **Estimated duration:** 9 hrs\n\
                    * **Dependencies**: none\n\
                    * **Skill points:** moves, borrows\n\
                    * **Learning goal:** reason about lifetimes\n";
        let modules = parse_tree(text);

        assert_eq!(modules.len(), 1);
        let module = &modules[0];
        assert_eq!(module.name, "Ownership");
        assert_eq!(module.tier, Tier::Primary);
        assert_eq!(module.duration_hours, 9);
        assert_eq!(module.dependencies, "none");
        assert_eq!(module.skill_points, "moves, borrows");
        assert_eq!(module.goal, "reason about lifetimes");
    }

    #[test]
    fn fields_do_not_leak_between_modules_test() {
        let modules = parse_tree(
            "# Primary\n## 1. A\n- Learning goal: goal of A\n## 2. B\n- Estimated duration: 4 hours\n",
        );
        assert_eq!(modules[0].goal, "goal of A");
        assert_eq!(modules[0].duration_hours, DEFAULT_DURATION_HOURS);
        assert_eq!(modules[1].goal, "");
        assert_eq!(modules[1].duration_hours, 4);
    }

    #[test]
    fn duplicate_names_test() {
        let modules = parse_tree("# Primary\n## 1. Basics\n# Intermediate\n## 1. Basics\n## 2. Basics\n");
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Basics", "Basics (2)", "Basics (3)"]);

        // a suffixed name the model wrote itself is not reused
        let modules = parse_tree("# Primary\n## 1. Basics\n## 2. Basics\n## 3. Basics (2)\n");
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Basics", "Basics (2)", "Basics (2) (2)"]);
        let unique: HashSet<&str> = names.iter().copied().collect();
        assert_eq!(unique.len(), names.len());
    }

    #[test]
    fn inline_bold_in_name_test() {
        let modules = parse_tree("# Primary\n## 1. **HTML** Basics\n## 2. Intro to **CSS**\n");
        let names: Vec<&str> = modules.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["HTML Basics", "Intro to CSS"]);
    }
}
