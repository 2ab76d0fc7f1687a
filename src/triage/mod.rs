//! Issue triage: turning a free-text utterance into a structured
//! [`IssueAnalysis`], plus the contract for the external mood signal.

pub mod category;
pub mod classifier;
pub mod matcher;
pub mod mood;

pub use category::IssueCategory;
pub use classifier::{
    IssueAnalysis, IssueClassifier, MAX_SECONDARY_ISSUES, Severity, Temporal, TierScan,
};
pub use mood::{Mood, MoodAnalysis};
