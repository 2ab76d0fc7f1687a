//! Curated support resources: restaurants, activities, helplines and quotes.
//!
//! Collections are loaded once by [`ResourceCatalog::load`] and are
//! read-only afterwards, so a catalog can be shared behind an `Arc` without
//! locking.

pub mod catalog;
pub mod format;
pub mod source;

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use catalog::{KindLoad, LoadReport, ResourceCatalog};
pub use format::{format_block, format_resource_block};
pub use source::{DirectorySource, MemorySource, ResourceSource};

/// Default cap on sampled food/activity suggestions.
pub const DEFAULT_MAX_SUGGESTIONS: usize = 3;

/// The four resource collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Restaurant,
    Activity,
    Helpline,
    Quote,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 4] = [
        ResourceKind::Restaurant,
        ResourceKind::Activity,
        ResourceKind::Helpline,
        ResourceKind::Quote,
    ];

    /// Name of the backing collection (`restaurants`, `activities`, ...).
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Restaurant => "restaurants",
            Self::Activity => "activities",
            Self::Helpline => "helplines",
            Self::Quote => "quotes",
        }
    }

    /// Word used in user-facing text.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Restaurant => "food",
            Self::Activity => "activity",
            Self::Helpline => "helpline",
            Self::Quote => "quote",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.collection())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "food" | "restaurant" | "restaurants" => Ok(Self::Restaurant),
            "activity" | "activities" => Ok(Self::Activity),
            "helpline" | "helplines" => Ok(Self::Helpline),
            "quote" | "quotes" => Ok(Self::Quote),
            other => Err(format!("unknown resource kind '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Restaurant {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub mood_tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Helpline {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub issue_tags: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One resource record, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceItem {
    Restaurant(Restaurant),
    Activity(Activity),
    Helpline(Helpline),
    Quote(Quote),
}

impl ResourceItem {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Restaurant(_) => ResourceKind::Restaurant,
            Self::Activity(_) => ResourceKind::Activity,
            Self::Helpline(_) => ResourceKind::Helpline,
            Self::Quote(_) => ResourceKind::Quote,
        }
    }
}

impl From<Restaurant> for ResourceItem {
    fn from(r: Restaurant) -> Self {
        Self::Restaurant(r)
    }
}

impl From<Activity> for ResourceItem {
    fn from(a: Activity) -> Self {
        Self::Activity(a)
    }
}

impl From<Helpline> for ResourceItem {
    fn from(h: Helpline) -> Self {
        Self::Helpline(h)
    }
}

impl From<Quote> for ResourceItem {
    fn from(q: Quote) -> Self {
        Self::Quote(q)
    }
}

/// Tag membership, ignoring case and treating `_`, `-` and spaces alike, so
/// `work_stress` matches a `Work Stress` tag.
pub(crate) fn has_tag(tags: &BTreeSet<String>, wanted: &str) -> bool {
    let wanted = normalize_tag(wanted);
    !wanted.is_empty() && tags.iter().any(|t| normalize_tag(t) == wanted)
}

fn normalize_tag(tag: &str) -> String {
    tag.trim().to_lowercase().replace(['_', '-'], " ")
}
