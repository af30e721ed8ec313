//! Normalizes resource and quiz responses into typed drafts.
//!
//! The model is told to answer with a bare JSON array but regularly wraps it in
//! a Markdown code fence anyway. Everything else is parsed strictly: anything
//! that is not an array of objects fails the whole response.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::generation::{ExerciseKind, ResourceKind};

/// Difficulty stamped on every stored exercise.
pub const EXERCISE_DIFFICULTY: i32 = 1;

const FENCE: &str = "```";

pub type ContentResult<T> = std::result::Result<T, ContentError>;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("response is not valid json: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("expected a json array, found {found}")]
    NotAnArray { found: &'static str },
    #[error("array element {index} is not an object")]
    NotAnObject { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceDraft {
    pub title: String,
    pub url: String,
    pub source: String,
    pub kind: ResourceKind,
    pub tag: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseDraft {
    pub kind: ExerciseKind,
    /// For choice items the option list is appended to the question text.
    pub question: String,
    pub answer: String,
    pub explanation: String,
    pub difficulty: i32,
    pub options: Vec<String>,
}

/// Removes a leading ```` ```lang ```` and a trailing ```` ``` ```` if present.
pub fn strip_code_fence(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix(FENCE) {
        body = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    }
    if let Some(rest) = body.strip_suffix(FENCE) {
        body = rest;
    }

    body.trim()
}

pub fn extract_json_array(text: &str) -> ContentResult<Vec<Value>> {
    match serde_json::from_str::<Value>(strip_code_fence(text))? {
        Value::Array(items) => Ok(items),
        other => Err(ContentError::NotAnArray {
            found: json_kind(&other),
        }),
    }
}

/// Array of JSON objects; a single non-object element fails the whole array.
pub fn extract_records(text: &str) -> ContentResult<Vec<Map<String, Value>>> {
    extract_json_array(text)?
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(ContentError::NotAnObject { index }),
        })
        .collect()
}

pub fn resource_drafts(text: &str) -> ContentResult<Vec<ResourceDraft>> {
    let drafts = extract_records(text)?
        .iter()
        .filter_map(|record| {
            let title = string_field(record, &["title"]);
            let url = string_field(record, &["url", "link"]);
            if title.is_empty() && url.is_empty() {
                tracing::warn!("dropping resource without title and url: {:?}", record);
                return None;
            }

            Some(ResourceDraft {
                title,
                url,
                source: string_field(record, &["source"]),
                kind: ResourceKind::from_model_label(&string_field(record, &["type", "kind"])),
                tag: string_field(record, &["tag", "difficulty"]),
            })
        })
        .collect();

    Ok(drafts)
}

pub fn exercise_drafts(text: &str) -> ContentResult<Vec<ExerciseDraft>> {
    let drafts = extract_records(text)?
        .iter()
        .filter_map(|record| {
            let question = string_field(record, &["question"]);
            if question.is_empty() {
                tracing::warn!("dropping exercise without question: {:?}", record);
                return None;
            }

            let options = options_field(record);
            let labelled = string_field(record, &["type", "kind"]).parse::<ExerciseKind>().ok();
            let kind = if options.is_empty() && labelled != Some(ExerciseKind::SingleChoice) {
                ExerciseKind::Essay
            } else {
                ExerciseKind::SingleChoice
            };
            let question = if options.is_empty() {
                question
            } else {
                format!("{}\nOptions: {}", question, options.join(", "))
            };

            Some(ExerciseDraft {
                kind,
                question,
                answer: string_field(record, &["answer"]),
                explanation: string_field(record, &["explanation", "analysis"]),
                difficulty: EXERCISE_DIFFICULTY,
                options,
            })
        })
        .collect();

    Ok(drafts)
}

/// First present key wins; scalars are stringified, anything else is `""`.
fn string_field(record: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .find_map(|key| match record.get(*key)? {
            Value::String(s) => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        })
        .unwrap_or_default()
}

fn options_field(record: &Map<String, Value>) -> Vec<String> {
    match record.get("options") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn fenced_equals_bare_test() {
        let fenced = extract_json_array("```json\n[1,2]\n```").unwrap();
        let bare = extract_json_array("[1,2]").unwrap();
        assert_eq!(fenced, bare);
        assert_eq!(bare, vec![json!(1), json!(2)]);
    }

    #[test]
    fn strip_code_fence_test() {
        assert_eq!(strip_code_fence("```\n[]\n```"), "[]");
        assert_eq!(strip_code_fence("```JSON\n[]```"), "[]");
        assert_eq!(strip_code_fence("  []  "), "[]");
        // only one side fenced
        assert_eq!(strip_code_fence("```json\n[]"), "[]");
        assert_eq!(strip_code_fence("[]\n```"), "[]");
    }

    #[test]
    fn not_an_array_test() {
        assert!(matches!(
            extract_json_array(r#"{"title": "x"}"#),
            Err(ContentError::NotAnArray { found: "object" })
        ));
        assert!(matches!(extract_json_array("\"[]\""), Err(ContentError::NotAnArray { .. })));
    }

    #[test]
    fn malformed_test() {
        assert!(matches!(extract_json_array(""), Err(ContentError::Malformed(_))));
        assert!(matches!(
            extract_json_array("Here are your resources: [{\"title\": \"x\"}]"),
            Err(ContentError::Malformed(_))
        ));
        assert!(matches!(
            extract_json_array("[{\"title\": \"x\"},"),
            Err(ContentError::Malformed(_))
        ));
    }

    #[test]
    fn non_object_element_fails_whole_array_test() {
        let result = extract_records(r#"[{"title": "ok"}, "oops"]"#);
        assert!(matches!(result, Err(ContentError::NotAnObject { index: 1 })));
    }

    #[test]
    fn resource_drafts_test() {
        let text = r#"```json
[
  {"title": "The Rust Book", "url": "https://doc.rust-lang.org/book/", "source": "official docs", "type": "document", "tag": "suits novice"},
  {"title": "Rust in 100 Seconds", "url": "https://www.youtube.com/watch?v=5C_HPTJg5ek", "type": "Video"},
  {"source": "nowhere"}
]
```"#;
        let drafts = resource_drafts(text).unwrap();

        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].kind, ResourceKind::Document);
        assert_eq!(drafts[0].tag, "suits novice");
        assert_eq!(drafts[1].kind, ResourceKind::Video);
        // missing optional fields default to empty
        assert_eq!(drafts[1].source, "");
        assert_eq!(drafts[1].tag, "");
    }

    #[test]
    fn exercise_drafts_test() {
        let text = r#"[
  {"type": "single_choice", "question": "What does `&mut` give you?", "options": ["A shared borrow", "An exclusive borrow", "A move", "A copy"], "answer": "An exclusive borrow", "explanation": "Only one mutable borrow may exist.", "difficulty": 3},
  {"type": "essay", "question": "Explain ownership.", "answer": "Each value has one owner.", "analysis": "Values are dropped with their owner.", "difficulty": 1},
  {"type": "single_choice", "question": "", "options": ["a", "b", "c", "d"], "answer": "a"}
]"#;
        let drafts = exercise_drafts(text).unwrap();
        assert_eq!(drafts.len(), 2);

        let choice = &drafts[0];
        assert_eq!(choice.kind, ExerciseKind::SingleChoice);
        assert_eq!(
            choice.question,
            "What does `&mut` give you?\nOptions: A shared borrow, An exclusive borrow, A move, A copy"
        );
        assert_eq!(choice.options.len(), 4);
        assert_eq!(choice.difficulty, EXERCISE_DIFFICULTY);

        let essay = &drafts[1];
        assert_eq!(essay.kind, ExerciseKind::Essay);
        assert_eq!(essay.question, "Explain ownership.");
        assert!(essay.options.is_empty());
        assert_eq!(essay.explanation, "Values are dropped with their owner.");
    }

    #[test]
    fn exercise_missing_fields_test() {
        let drafts = exercise_drafts(r#"[{"question": "Why?"}]"#).unwrap();
        assert_eq!(drafts[0].answer, "");
        assert_eq!(drafts[0].explanation, "");
        assert_eq!(drafts[0].kind, ExerciseKind::Essay);

        let drafts = exercise_drafts(r#"[{"type": "single_choice", "question": "Pick one"}]"#).unwrap();
        assert_eq!(drafts[0].kind, ExerciseKind::SingleChoice);
        assert_eq!(drafts[0].question, "Pick one");
        assert!(drafts[0].options.is_empty());
    }
}
