//! Haven: rule-based emotional-support triage.
//!
//! Given a user's message, Haven classifies the issue being described
//! ([`triage`]), picks a supportive response that takes an external mood
//! signal into account with crisis detection overriding everything
//! ([`dispatch`]), and surfaces curated support resources ([`resources`]).
//! [`SupportEngine`] wires the three together for a single turn.
//!
//! Mood detection, chat transport and message rewriting live outside this
//! crate; only their contracts appear here.

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod resources;
pub mod triage;

pub use config::Config;
pub use dispatch::{ResponseDispatcher, ResponseState};
pub use engine::{SupportEngine, SupportReply};
pub use error::{CatalogError, ConfigError, Error, Result};
pub use resources::{ResourceCatalog, ResourceItem, ResourceKind};
pub use triage::{
    IssueAnalysis, IssueCategory, IssueClassifier, Mood, MoodAnalysis, Severity, Temporal,
    TierScan,
};
