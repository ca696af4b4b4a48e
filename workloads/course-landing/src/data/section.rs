//! Page sections, tagged by `type`.

use serde::{Deserialize, Serialize};

use super::nullable;

/// A block of the product page.
///
/// Types the page does not render decode to `Other` instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Section {
    Instructors(SectionBody<Instructor>),
    Features(SectionBody<Feature>),
    Pointers(SectionBody<Pointer>),
    FeatureExplanations(SectionBody<FeatureExplanation>),
    About(SectionBody<AboutEntry>),
    #[serde(other)]
    Other,
}

impl Section {
    /// The `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Instructors(_) => "instructors",
            Self::Features(_) => "features",
            Self::Pointers(_) => "pointers",
            Self::FeatureExplanations(_) => "feature_explanations",
            Self::About(_) => "about",
            Self::Other => "other",
        }
    }
}

/// Heading and entries of a section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBody<T> {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(
        default = "Vec::new",
        deserialize_with = "nullable",
        bound(deserialize = "T: serde::Deserialize<'de>")
    )]
    pub values: Vec<T>,
}

impl<T> SectionBody<T> {
    pub fn new(name: impl Into<String>, values: Vec<T>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Course instructor. `description` is HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Instructor {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub image: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
    #[serde(deserialize_with = "nullable")]
    pub short_description: String,
    #[serde(deserialize_with = "nullable")]
    pub slug: String,
}

/// Feature card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Feature {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub subtitle: String,
}

/// Bullet point ("what you will learn").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pointer {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub text: String,
    #[serde(deserialize_with = "nullable")]
    pub color: String,
}

/// Feature explained with a checklist and an illustration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureExplanation {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub checklist: Vec<String>,
    #[serde(deserialize_with = "nullable")]
    pub file_url: String,
}

/// Course details accordion entry. `title` and `description` are HTML.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AboutEntry {
    pub id: serde_json::Value,
    #[serde(deserialize_with = "nullable")]
    pub icon: String,
    #[serde(deserialize_with = "nullable")]
    pub title: String,
    #[serde(deserialize_with = "nullable")]
    pub description: String,
}
