//! Directive prompts sent to the model.
//!
//! The field labels below are the contract between [`build_tree_prompt`] and
//! the tree parser: the model is told to write them verbatim and the parser
//! looks for exactly these prefixes.

use crate::generation::{Level, Pace, ResourcePreference, Tier};

pub const DURATION_LABEL: &str = "Estimated duration";
pub const DURATION_UNIT: &str = "hours";
pub const TIER_LABEL: &str = "Tier";
pub const DEPENDENCIES_LABEL: &str = "Dependencies";
pub const SKILL_POINTS_LABEL: &str = "Skill points";
pub const GOAL_LABEL: &str = "Learning goal";

/// Marker for "no prerequisite" in the dependency field.
pub const NO_DEPENDENCY: &str = "none";

pub const RESOURCES_PER_MODULE: usize = 2;
pub const CHOICE_QUESTIONS: usize = 3;
pub const ESSAY_QUESTIONS: usize = 1;
pub const MIN_OPTIONS: usize = 4;

pub fn build_tree_prompt(target: &str, level: Level, pace: Pace, resource_type: ResourcePreference) -> String {
    let [primary, intermediate, advanced] = Tier::ALL;

    format!(
        r#"# Role
You are a senior learning planner who designs systematic, practical, tiered skill trees for learners of any background.

# Learner
- Goal: {target}
- Current level: {level_desc} ({level})
- Pace: {pace} ({hours} hours per day, {pace_desc})
- Preferred resources: {resource_type}

# Output requirements (follow strictly)
1. Split the tree into exactly 3 tiers in this order: {primary_h} -> {intermediate_h} -> {advanced_h}. Each tier contains 2-3 skill modules.
2. Tier rules:
   - {primary_h}: foundational skills suited to a {level} learner, no prerequisites.
   - {intermediate_h}: core skills that depend on all {primary} modules.
   - {advanced_h}: project-level skills that depend on all {intermediate} modules.
3. Every module must list:
   - the module name
   - {duration}: whole number of {unit}, computed for the {pace} pace
   - {tier}: {primary}, {intermediate} or {advanced}
   - {deps}: names of prerequisite modules, or "{none}"
   - {points}: 3-5 core skill points suited to the {level} level
   - {goal}: what the learner can do after finishing the module
4. Format:
   - Markdown only. Each tier is a level-1 heading (#), each module a numbered level-2 heading (## 1. Name) followed by a bullet list.
   - Separate tiers with a horizontal rule.
   - No introduction or closing remarks, output the skill tree only.
   - Duration ceilings: {primary} modules <= {primary_max} {unit}, {intermediate} <= {intermediate_max} {unit}, {advanced} <= {advanced_max} {unit}.
5. Weighting: {weighting}.

# Example layout (structure only, do not copy the content)
# {primary_h}
---
## 1. HTML Basics
- {duration}: 8 {unit}
- {tier}: {primary}
- {deps}: {none}
- {points}: document structure, common tags, attributes, semantic HTML, basic forms
- {goal}: write a valid static HTML page independently
## 2. CSS Basics
- {duration}: 10 {unit}
- {tier}: {primary}
- {deps}: HTML Basics
- {points}: selectors, box model, layout basics, responsive basics
- {goal}: style a page and build a simple layout
# {intermediate_h}
---
## 1. JavaScript Basics
- {duration}: 15 {unit}
- {tier}: {intermediate}
- {deps}: HTML Basics, CSS Basics
- {points}: variables, functions, DOM manipulation, events
- {goal}: add interactive behaviour to a page
# {advanced_h}
---
## 1. Frontend Framework
- {duration}: 20 {unit}
- {tier}: {advanced}
- {deps}: JavaScript Basics
- {points}: components, routing, state management, API calls
- {goal}: build a small single-page application"#,
        level = level.as_str(),
        level_desc = level.describe(),
        pace = pace.as_str(),
        hours = pace.hours_per_day(),
        pace_desc = pace.describe(),
        resource_type = resource_type.as_str(),
        primary = primary.as_str(),
        intermediate = intermediate.as_str(),
        advanced = advanced.as_str(),
        primary_h = primary.heading(),
        intermediate_h = intermediate.heading(),
        advanced_h = advanced.heading(),
        primary_max = primary.max_hours(),
        intermediate_max = intermediate.max_hours(),
        advanced_max = advanced.max_hours(),
        duration = DURATION_LABEL,
        unit = DURATION_UNIT,
        tier = TIER_LABEL,
        deps = DEPENDENCIES_LABEL,
        points = SKILL_POINTS_LABEL,
        goal = GOAL_LABEL,
        none = NO_DEPENDENCY,
        weighting = level.tier_weighting(),
    )
}

pub fn build_resource_prompt(module_name: &str, level: Level, resource_type: ResourcePreference) -> String {
    let type_rule = match resource_type {
        ResourcePreference::Video => "every resource must be a video",
        ResourcePreference::Document => "every resource must be a document",
        ResourcePreference::Mixed => "videos and documents may be mixed, but each must state its type",
    };

    format!(
        r#"You are a learning resource curator. Recommend exactly {count} free, publicly accessible, high quality resources for the module "{module_name}" for a {level} learner.

Rules:
1. Resource type must match the preference "{resource_type}": {type_rule}.
2. Only real, reachable public resources. Do not invent links. Official documentation must use the official domain.
3. Every resource has these fields:
   title  - resource title
   url    - resource link
   source - platform name (YouTube, MDN, official docs, Coursera, blog, ...)
   type   - "video" or "document"
   tag    - difficulty tag that mentions "{level}"
4. Difficulty must match the {level} level.
5. Output a bare JSON array only: no Markdown, no explanation, no code fence markers.

Example (structure only):
[
    {{"title": "Python for Absolute Beginners", "url": "https://www.youtube.com/watch?v=xxxxxxxxxxx", "source": "YouTube", "type": "video", "tag": "suits {level}"}},
    {{"title": "The Python Tutorial", "url": "https://docs.python.org/3/tutorial/", "source": "official docs", "type": "document", "tag": "suits {level}"}}
]

Now produce the resources for "{module_name}"."#,
        count = RESOURCES_PER_MODULE,
        level = level.as_str(),
        resource_type = resource_type.as_str(),
    )
}

pub fn build_quiz_prompt(module_name: &str, level: Level) -> String {
    format!(
        r#"You are an exercise writer. Write practice questions for the module "{module_name}" for a {level} learner.

Rules:
1. Exactly {total} questions: {choice} single-choice questions and {essay} open-response question.
2. Single-choice items have: type="single_choice", question, options, answer, explanation, difficulty=1.
3. Open-response items have: type="essay", question, answer, explanation, difficulty=1.
4. options is an array with at least {min_options} entries and answer is the text of the correct option.
5. Difficulty must suit the {level} level.
6. Output a bare JSON array only: no Markdown, no explanation, no code fence markers.

Example (structure only):
[
    {{"type": "single_choice", "question": "Which of these is not a core trait of cloud computing?", "options": ["On-demand provisioning", "Elastic scaling", "On-premise only", "Resource pooling"], "answer": "On-premise only", "explanation": "Cloud computing is on-demand, elastic and pooled.", "difficulty": 1}},
    {{"type": "essay", "question": "Describe the three cloud service models.", "answer": "IaaS provides infrastructure, PaaS a platform, SaaS finished software.", "explanation": "They differ in what the customer manages.", "difficulty": 1}}
]"#,
        level = level.as_str(),
        total = CHOICE_QUESTIONS + ESSAY_QUESTIONS,
        choice = CHOICE_QUESTIONS,
        essay = ESSAY_QUESTIONS,
        min_options = MIN_OPTIONS,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::generation::tree::parse_tree;

    #[test]
    fn tree_prompt_embeds_parameters_test() {
        let prompt = build_tree_prompt("learn Rust", Level::Novice, Pace::Intensive, ResourcePreference::Video);

        assert!(prompt.contains("Goal: learn Rust"));
        assert!(prompt.contains("(novice)"));
        assert!(prompt.contains("Pace: intensive (2 hours per day"));
        assert!(prompt.contains("Preferred resources: video"));
        assert!(prompt.contains("primary modules make up about 60%"));
    }

    #[test]
    fn tree_prompt_layout_rules_test() {
        let prompt = build_tree_prompt("learn Go", Level::Experienced, Pace::Relaxed, ResourcePreference::Mixed);

        assert!(prompt.contains("exactly 3 tiers"));
        assert!(prompt.contains("2-3 skill modules"));
        assert!(prompt.contains("3-5 core skill points"));
        assert!(prompt.contains("primary modules <= 10 hours"));
        assert!(prompt.contains("intermediate <= 15 hours"));
        assert!(prompt.contains("advanced <= 20 hours"));
        assert!(prompt.contains("level-1 heading (#)"));
        assert!(prompt.contains("numbered level-2 heading (## 1. Name)"));
        assert!(prompt.contains("50% intermediate and 50% advanced"));
    }

    #[test]
    fn tree_prompt_example_is_parseable_test() {
        let prompt = build_tree_prompt("learn the web", Level::Beginner, Pace::Relaxed, ResourcePreference::Document);
        let example = prompt
            .split("# Example layout (structure only, do not copy the content)")
            .nth(1)
            .unwrap();

        let modules = parse_tree(example);
        assert_eq!(modules.len(), 4);
        assert_eq!(modules[1].name, "CSS Basics");
        assert_eq!(modules[1].duration_hours, 10);
        assert_eq!(modules[3].tier, Tier::Advanced);
    }

    #[test]
    fn resource_prompt_test() {
        let prompt = build_resource_prompt("Ownership", Level::Beginner, ResourcePreference::Document);

        assert!(prompt.contains("exactly 2"));
        assert!(prompt.contains("\"Ownership\""));
        assert!(prompt.contains("every resource must be a document"));
        for field in ["title", "url", "source", "type", "tag"] {
            assert!(prompt.contains(field), "missing field {field}");
        }
        assert!(prompt.contains("bare JSON array"));
        assert!(prompt.contains("no code fence markers"));
    }

    #[test]
    fn quiz_prompt_test() {
        let prompt = build_quiz_prompt("Ownership", Level::Novice);

        assert!(prompt.contains("Exactly 4 questions: 3 single-choice questions and 1 open-response"));
        assert!(prompt.contains("at least 4 entries"));
        for field in ["question", "answer", "explanation", "difficulty=1", "options"] {
            assert!(prompt.contains(field), "missing field {field}");
        }
        assert!(prompt.contains("bare JSON array"));
    }

    #[test]
    fn builders_are_deterministic_test() {
        let a = build_quiz_prompt("Traits", Level::Experienced);
        let b = build_quiz_prompt("Traits", Level::Experienced);
        assert_eq!(a, b);
    }
}
