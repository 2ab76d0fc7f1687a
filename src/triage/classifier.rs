//! Deterministic issue classification.
//!
//! The classifier is a pure function of the input text: no I/O, no shared
//! mutable state, no randomness. It runs five ordered rules over fixed phrase
//! tables:
//!
//! 1. Category matching: first matching keyword per category, with that
//!    keyword's occurrence count.
//! 2. Ranking: count descending, ties by category declaration order.
//! 3. Severity tiers `high`, `medium`, `low` (default `medium`).
//! 4. Temporal tiers `new`, `ongoing` (default `new`).
//! 5. Critical keywords, which force `high` severity and immediate attention
//!    and always run last.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::triage::category::IssueCategory;
use crate::triage::matcher::PhraseTable;

/// Maximum number of secondary issues reported.
pub const MAX_SECONDARY_ISSUES: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Temporal {
    New,
    Ongoing,
}

impl Temporal {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Ongoing => "ongoing",
        }
    }
}

impl fmt::Display for Temporal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How severity and temporal tiers are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TierScan {
    /// Stop as soon as the held value equals the tier just evaluated. The
    /// default value coincides with an early tier, so `low` severity and
    /// `ongoing` temporal are never produced.
    #[default]
    Faithful,
    /// First tier with a matching indicator wins; otherwise the default holds.
    Ordered,
}

impl FromStr for TierScan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "faithful" | "reference" => Ok(Self::Faithful),
            "ordered" | "priority" => Ok(Self::Ordered),
            other => Err(format!(
                "unknown tier scan '{other}', expected 'faithful' or 'ordered'"
            )),
        }
    }
}

/// Result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueAnalysis {
    pub primary_issue: Option<IssueCategory>,
    /// Up to [`MAX_SECONDARY_ISSUES`] runners-up; never contains `primary_issue`.
    pub secondary_issues: Vec<IssueCategory>,
    pub severity: Severity,
    pub temporal: Temporal,
    pub needs_immediate_attention: bool,
}

impl IssueAnalysis {
    /// Analysis of a text that matched nothing.
    pub fn unmatched() -> Self {
        Self {
            primary_issue: None,
            secondary_issues: Vec::new(),
            severity: Severity::Medium,
            temporal: Temporal::New,
            needs_immediate_attention: false,
        }
    }

    /// Unmatched analysis with a primary issue set. Handy for callers that
    /// already know the topic.
    pub fn with_primary(issue: IssueCategory) -> Self {
        Self {
            primary_issue: Some(issue),
            ..Self::unmatched()
        }
    }
}

impl Default for IssueAnalysis {
    fn default() -> Self {
        Self::unmatched()
    }
}

const HIGH_SEVERITY: &[&str] = &[
    "can't cope",
    "cannot cope",
    "can't take it",
    "unbearable",
    "hopeless",
    "desperate",
    "falling apart",
    "breaking down",
    "panic attack",
    "overwhelmed",
    "worst",
];

const MEDIUM_SEVERITY: &[&str] = &[
    "stressed",
    "worried",
    "upset",
    "struggling",
    "difficult",
    "frustrated",
    "hard time",
];

const LOW_SEVERITY: &[&str] = &[
    "a bit",
    "a little",
    "slightly",
    "minor",
    "kind of",
    "sort of",
];

const NEW_TEMPORAL: &[&str] = &[
    "just",
    "today",
    "yesterday",
    "recently",
    "last night",
    "last week",
    "this morning",
    "suddenly",
];

const ONGOING_TEMPORAL: &[&str] = &[
    "always",
    "for months",
    "for years",
    "for weeks",
    "constantly",
    "every day",
    "still",
    "keeps happening",
];

const CRITICAL_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "want to die",
    "better off dead",
    "self harm",
    "self-harm",
    "hurt myself",
    "cutting myself",
    "overdose",
    "no reason to live",
    "emergency",
];

struct Tables {
    severity: [(Severity, PhraseTable); 3],
    temporal: [(Temporal, PhraseTable); 2],
    critical: PhraseTable,
}

static TABLES: LazyLock<Tables> = LazyLock::new(|| Tables {
    severity: [
        (Severity::High, PhraseTable::compile(HIGH_SEVERITY)),
        (Severity::Medium, PhraseTable::compile(MEDIUM_SEVERITY)),
        (Severity::Low, PhraseTable::compile(LOW_SEVERITY)),
    ],
    temporal: [
        (Temporal::New, PhraseTable::compile(NEW_TEMPORAL)),
        (Temporal::Ongoing, PhraseTable::compile(ONGOING_TEMPORAL)),
    ],
    critical: PhraseTable::compile(CRITICAL_KEYWORDS),
});

/// Stateless rule-based issue classifier. Cheap to copy and safe to share
/// across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct IssueClassifier {
    tier_scan: TierScan,
}

impl IssueClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tier_scan(tier_scan: TierScan) -> Self {
        Self { tier_scan }
    }

    pub fn tier_scan(&self) -> TierScan {
        self.tier_scan
    }

    /// Classify a user utterance. Accepts any string, including empty.
    pub fn classify(&self, text: &str) -> IssueAnalysis {
        let lowered = text.to_lowercase();
        let tables = &*TABLES;

        let ranked = rank_categories(&lowered);
        let mut ranked = ranked.into_iter().map(|(category, _)| category);
        let primary_issue = ranked.next();
        let secondary_issues: Vec<IssueCategory> = ranked.take(MAX_SECONDARY_ISSUES).collect();

        let mut severity = resolve_tier(&lowered, &tables.severity, Severity::Medium, self.tier_scan);
        let temporal = resolve_tier(&lowered, &tables.temporal, Temporal::New, self.tier_scan);

        let mut needs_immediate_attention = severity == Severity::High && temporal == Temporal::New;

        // Last, and it always wins.
        if tables.critical.any_match(&lowered) {
            severity = Severity::High;
            needs_immediate_attention = true;
        }

        IssueAnalysis {
            primary_issue,
            secondary_issues,
            severity,
            temporal,
            needs_immediate_attention,
        }
    }

    /// True when `text` contains a critical (self-harm or emergency) phrase.
    pub fn has_critical_signal(&self, text: &str) -> bool {
        TABLES.critical.any_match(&text.to_lowercase())
    }
}

/// Matched categories with the occurrence count of their first matching
/// keyword, ordered by count descending. The sort is stable, so equal counts
/// keep declaration order.
fn rank_categories(lowered: &str) -> Vec<(IssueCategory, usize)> {
    let mut matched: Vec<(IssueCategory, usize)> = IssueCategory::ALL
        .into_iter()
        .filter_map(|category| {
            category
                .table()
                .first_match_count(lowered)
                .map(|count| (category, count))
        })
        .collect();
    matched.sort_by(|a, b| b.1.cmp(&a.1));
    matched
}

fn resolve_tier<T: Copy + PartialEq>(
    lowered: &str,
    tiers: &[(T, PhraseTable)],
    default: T,
    scan: TierScan,
) -> T {
    let mut current = default;
    for (tier, indicators) in tiers {
        let matched = indicators.any_match(lowered);
        if matched {
            current = *tier;
        }
        let stop = match scan {
            TierScan::Faithful => current == *tier,
            TierScan::Ordered => matched,
        };
        if stop {
            break;
        }
    }
    current
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(text: &str) -> IssueAnalysis {
        IssueClassifier::new().classify(text)
    }

    #[test]
    fn empty_text_is_all_defaults() {
        let analysis = classify("");
        assert_eq!(analysis, IssueAnalysis::unmatched());
        assert_eq!(analysis.primary_issue, None);
        assert_eq!(analysis.severity, Severity::Medium);
        assert_eq!(analysis.temporal, Temporal::New);
        assert!(!analysis.needs_immediate_attention);
    }

    #[test]
    fn breakup_and_loneliness_tie_on_declaration_order() {
        let analysis = classify("I feel so alone since my girlfriend broke up with me last week");
        assert_eq!(
            analysis.primary_issue,
            Some(IssueCategory::RelationshipConflict)
        );
        assert_eq!(analysis.secondary_issues, vec![IssueCategory::Loneliness]);
        assert_eq!(analysis.severity, Severity::Medium);
        assert_eq!(analysis.temporal, Temporal::New);
        assert!(!analysis.needs_immediate_attention);
    }

    #[test]
    fn higher_count_outranks_declaration_order() {
        // "fight" once vs. "boss" three times.
        let analysis = classify("We had a fight. My boss, my boss, my boss.");
        assert_eq!(analysis.primary_issue, Some(IssueCategory::WorkStress));
        assert_eq!(
            analysis.secondary_issues,
            vec![IssueCategory::RelationshipConflict]
        );
    }

    #[test]
    fn only_first_matching_keyword_is_counted() {
        // "deadline" matches first (once); three "work" mentions are never counted,
        // so grief with two "funeral"s wins.
        let analysis = classify("deadline at work, work, work. The funeral, the funeral.");
        assert_eq!(analysis.primary_issue, Some(IssueCategory::Grief));
        assert_eq!(analysis.secondary_issues, vec![IssueCategory::WorkStress]);
    }

    #[test]
    fn secondary_issues_capped_at_two() {
        let analysis =
            classify("my boss, my debt, my diagnosis, my exam and the funeral, all alone");
        assert_eq!(analysis.primary_issue, Some(IssueCategory::WorkStress));
        assert_eq!(
            analysis.secondary_issues,
            vec![
                IssueCategory::FinancialProblems,
                IssueCategory::HealthConcerns
            ]
        );
    }

    #[test]
    fn high_severity_and_new_needs_attention() {
        let analysis = classify("I just had a panic attack at my desk");
        assert_eq!(analysis.severity, Severity::High);
        assert_eq!(analysis.temporal, Temporal::New);
        assert!(analysis.needs_immediate_attention);
    }

    #[test]
    fn critical_keyword_overrides_everything() {
        let analysis = classify("I want to end my life");
        assert_eq!(analysis.severity, Severity::High);
        assert!(analysis.needs_immediate_attention);
    }

    #[test]
    fn critical_keyword_wins_over_low_indicators_in_ordered_mode() {
        let classifier = IssueClassifier::with_tier_scan(TierScan::Ordered);
        let analysis = classifier.classify("it's a minor thing but I keep thinking about suicide");
        assert_eq!(analysis.severity, Severity::High);
        assert!(analysis.needs_immediate_attention);
    }

    #[test]
    fn faithful_scan_never_reaches_low_or_ongoing() {
        let analysis = classify("It's a minor thing, I've always felt a bit off");
        assert_eq!(analysis.severity, Severity::Medium);
        assert_eq!(analysis.temporal, Temporal::New);
    }

    #[test]
    fn ordered_scan_reaches_low_and_ongoing() {
        let classifier = IssueClassifier::with_tier_scan(TierScan::Ordered);
        let analysis = classifier.classify("It's a minor thing, I've always felt a bit off");
        assert_eq!(analysis.severity, Severity::Low);
        assert_eq!(analysis.temporal, Temporal::Ongoing);
        assert!(!analysis.needs_immediate_attention);
    }

    #[test]
    fn ordered_scan_prefers_higher_tier() {
        let classifier = IssueClassifier::with_tier_scan(TierScan::Ordered);
        let analysis = classifier.classify("a bit stressed, started today but still here");
        assert_eq!(analysis.severity, Severity::Medium);
        assert_eq!(analysis.temporal, Temporal::New);
    }

    #[test]
    fn high_but_ongoing_does_not_need_attention() {
        let classifier = IssueClassifier::with_tier_scan(TierScan::Ordered);
        let analysis = classifier.classify("everything is hopeless, it has been for years");
        assert_eq!(analysis.severity, Severity::High);
        assert_eq!(analysis.temporal, Temporal::Ongoing);
        assert!(!analysis.needs_immediate_attention);
    }

    #[test]
    fn tier_scan_parses() {
        assert_eq!("Ordered".parse::<TierScan>().unwrap(), TierScan::Ordered);
        assert_eq!("faithful".parse::<TierScan>().unwrap(), TierScan::Faithful);
        assert!("strict".parse::<TierScan>().is_err());
    }

    #[test]
    fn analysis_serializes_with_snake_case_labels() {
        let json = serde_json::to_value(classify("my exam is today")).unwrap();
        assert_eq!(json["primary_issue"], "academic_stress");
        assert_eq!(json["severity"], "medium");
        assert_eq!(json["temporal"], "new");
    }
}
