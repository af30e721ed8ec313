//! Vocabulary shared by prompts, parsed trees and stored rows.
//!
//! Every enum is stored as its `as_str()` label in TEXT columns and exposed in
//! JSON with the same snake_case label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Novice,
    Beginner,
    Experienced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    Intensive,
    Relaxed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourcePreference {
    Video,
    Document,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Video,
    Document,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Primary,
    Intermediate,
    Advanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    SingleChoice,
    Essay,
}

impl Level {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Novice => "novice",
            Self::Beginner => "beginner",
            Self::Experienced => "experienced",
        }
    }

    /// Wording used inside prompts.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Novice => "complete novice with no prior background",
            Self::Beginner => "beginner who knows the basics",
            Self::Experienced => "experienced learner looking to go deeper",
        }
    }

    /// How the tiers should be weighted for this learner.
    pub fn tier_weighting(&self) -> &'static str {
        match self {
            Self::Novice => "primary modules make up about 60% of the tree, focus on basic understanding",
            Self::Beginner => "about 40% primary and 60% intermediate modules, focus on application",
            Self::Experienced => "about 50% intermediate and 50% advanced modules, focus on real projects",
        }
    }
}

impl Pace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Intensive => "intensive",
            Self::Relaxed => "relaxed",
        }
    }

    pub fn hours_per_day(&self) -> u32 {
        match self {
            Self::Intensive => 2,
            Self::Relaxed => 1,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Self::Intensive => "compress the total duration to the target period",
            Self::Relaxed => "allow a comfortable total duration",
        }
    }
}

impl ResourcePreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
            Self::Mixed => "mixed",
        }
    }

    /// The single kind this preference narrows to, `None` for mixed.
    pub fn kind(&self) -> Option<ResourceKind> {
        match self {
            Self::Video => Some(ResourceKind::Video),
            Self::Document => Some(ResourceKind::Document),
            Self::Mixed => None,
        }
    }
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Document => "document",
        }
    }

    /// Lenient mapping of whatever the model wrote in the `type` field.
    pub fn from_model_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("video") {
            Self::Video
        } else {
            Self::Document
        }
    }
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Primary, Tier::Intermediate, Tier::Advanced];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    /// Heading label as it appears in the generated Markdown.
    pub fn heading(&self) -> &'static str {
        match self {
            Self::Primary => "Primary",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }

    pub fn max_hours(&self) -> u32 {
        match self {
            Self::Primary => 10,
            Self::Intermediate => 15,
            Self::Advanced => 20,
        }
    }
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SingleChoice => "single_choice",
            Self::Essay => "essay",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown label: '{0}'")]
pub struct UnknownLabel(pub String);

macro_rules! impl_label_traits {
    ($($ty:ident { $($variant:ident),+ $(,)? }),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownLabel;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    let label = s.trim().to_lowercase();
                    [$(Self::$variant),+]
                        .into_iter()
                        .find(|v| v.as_str() == label)
                        .ok_or(UnknownLabel(label))
                }
            }

            impl TryFrom<String> for $ty {
                type Error = UnknownLabel;

                fn try_from(value: String) -> Result<Self, Self::Error> {
                    value.parse()
                }
            }
        )+
    };
}

impl_label_traits!(
    Level { Novice, Beginner, Experienced },
    Pace { Intensive, Relaxed },
    ResourcePreference { Video, Document, Mixed },
    ResourceKind { Video, Document },
    Tier { Primary, Intermediate, Advanced },
    ExerciseKind { SingleChoice, Essay },
);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tier_from_str_test() {
        assert_eq!("Primary".parse::<Tier>().unwrap(), Tier::Primary);
        assert_eq!(" ADVANCED ".parse::<Tier>().unwrap(), Tier::Advanced);
        assert!("expert".parse::<Tier>().is_err());
    }

    #[test]
    fn stored_label_test() {
        assert_eq!(Level::try_from(String::from("beginner")).unwrap(), Level::Beginner);
        assert_eq!("single_choice".parse::<ExerciseKind>().unwrap(), ExerciseKind::SingleChoice);
        assert_eq!(ResourcePreference::Mixed.kind(), None);
        assert_eq!(ResourcePreference::Video.kind(), Some(ResourceKind::Video));

        let err = "sprint".parse::<Pace>().unwrap_err();
        assert_eq!(err.to_string(), "unknown label: 'sprint'");
    }

    #[test]
    fn resource_kind_label_test() {
        assert_eq!(ResourceKind::from_model_label("Video"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_model_label("video course"), ResourceKind::Video);
        assert_eq!(ResourceKind::from_model_label("docs"), ResourceKind::Document);
        assert_eq!(ResourceKind::from_model_label(""), ResourceKind::Document);
    }

    #[test]
    fn serde_labels_test() {
        assert_eq!(serde_json::to_string(&Level::Novice).unwrap(), "\"novice\"");
        assert_eq!(
            serde_json::to_string(&ExerciseKind::SingleChoice).unwrap(),
            "\"single_choice\""
        );
        let pace: Pace = serde_json::from_str("\"relaxed\"").unwrap();
        assert_eq!(pace, Pace::Relaxed);
    }
}
