//! The closed issue taxonomy and its keyword tables.

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::triage::matcher::PhraseTable;

/// What the user is describing. Declaration order breaks ranking ties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    RelationshipConflict,
    WorkStress,
    FinancialProblems,
    HealthConcerns,
    Loneliness,
    AcademicStress,
    IdentityCrisis,
    Grief,
}

impl IssueCategory {
    /// Every category, in declaration order.
    pub const ALL: [IssueCategory; 8] = [
        IssueCategory::RelationshipConflict,
        IssueCategory::WorkStress,
        IssueCategory::FinancialProblems,
        IssueCategory::HealthConcerns,
        IssueCategory::Loneliness,
        IssueCategory::AcademicStress,
        IssueCategory::IdentityCrisis,
        IssueCategory::Grief,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RelationshipConflict => "relationship_conflict",
            Self::WorkStress => "work_stress",
            Self::FinancialProblems => "financial_problems",
            Self::HealthConcerns => "health_concerns",
            Self::Loneliness => "loneliness",
            Self::AcademicStress => "academic_stress",
            Self::IdentityCrisis => "identity_crisis",
            Self::Grief => "grief",
        }
    }

    /// Human-readable label used inside rendered templates
    /// (`work_stress` -> `work stress`).
    pub fn display_name(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Keywords for this category, in the order they are tried.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::RelationshipConflict => &[
                "breakup",
                "broke up",
                "divorce",
                "argument",
                "fight",
                "cheated",
                "girlfriend",
                "boyfriend",
                "partner",
                "husband",
                "wife",
                "relationship",
                "marriage",
            ],
            Self::WorkStress => &[
                "deadline",
                "deadlines",
                "boss",
                "overworked",
                "burnout",
                "burned out",
                "fired",
                "laid off",
                "coworker",
                "coworkers",
                "promotion",
                "job",
                "work",
            ],
            Self::FinancialProblems => &[
                "debt",
                "bills",
                "rent",
                "loan",
                "mortgage",
                "bankrupt",
                "paycheck",
                "can't afford",
                "money",
                "savings",
            ],
            Self::HealthConcerns => &[
                "diagnosis",
                "diagnosed",
                "illness",
                "sick",
                "hospital",
                "doctor",
                "surgery",
                "symptoms",
                "pain",
                "health",
            ],
            Self::Loneliness => &[
                "lonely",
                "alone",
                "isolated",
                "no friends",
                "nobody cares",
                "no one cares",
                "left out",
                "by myself",
            ],
            Self::AcademicStress => &[
                "exam",
                "exams",
                "grades",
                "homework",
                "assignment",
                "thesis",
                "professor",
                "failing class",
                "school",
                "university",
                "college",
            ],
            Self::IdentityCrisis => &[
                "who i am",
                "don't know who",
                "identity",
                "lost myself",
                "purpose",
                "meaning of life",
                "don't belong",
                "fit in",
            ],
            Self::Grief => &[
                "passed away",
                "died",
                "death",
                "funeral",
                "grieving",
                "grief",
                "loss of",
                "miss them",
            ],
        }
    }

    /// Compiled keyword table for this category.
    pub(crate) fn table(&self) -> &'static PhraseTable {
        &CATEGORY_TABLES[*self as usize]
    }
}

static CATEGORY_TABLES: LazyLock<Vec<PhraseTable>> = LazyLock::new(|| {
    IssueCategory::ALL
        .iter()
        .map(|c| PhraseTable::compile(c.keywords()))
        .collect()
});

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        IssueCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == normalized)
            .ok_or_else(|| format!("unknown issue category '{s}'"))
    }
}
