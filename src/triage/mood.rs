//! Contract for the mood signal produced by the external mood detector.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Mood signal as delivered by the mood-detection collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodAnalysis {
    pub primary_mood: String,
    #[serde(default)]
    pub is_crisis: bool,
}

impl MoodAnalysis {
    pub fn new(primary_mood: impl Into<String>) -> Self {
        Self {
            primary_mood: primary_mood.into(),
            is_crisis: false,
        }
    }

    /// Mark the signal as a crisis regardless of the mood label.
    pub fn crisis(mut self) -> Self {
        self.is_crisis = true;
        self
    }

    /// Recognized mood, or `None` for labels the dispatcher does not know.
    pub fn mood(&self) -> Option<Mood> {
        Mood::from_label(&self.primary_mood)
    }

    /// True when the external signal demands the crisis path.
    pub fn signals_crisis(&self) -> bool {
        self.is_crisis || self.mood() == Some(Mood::Suicidal)
    }
}

impl Default for MoodAnalysis {
    fn default() -> Self {
        Self::new(Mood::Neutral.as_str())
    }
}

/// Mood labels the dispatcher reacts to. Anything else is treated as neutral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mood {
    Angry,
    Sad,
    Anxious,
    Lonely,
    Hungry,
    Tired,
    Suicidal,
    Positive,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 9] = [
        Mood::Angry,
        Mood::Sad,
        Mood::Anxious,
        Mood::Lonely,
        Mood::Hungry,
        Mood::Tired,
        Mood::Suicidal,
        Mood::Positive,
        Mood::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Angry => "angry",
            Self::Sad => "sad",
            Self::Anxious => "anxious",
            Self::Lonely => "lonely",
            Self::Hungry => "hungry",
            Self::Tired => "tired",
            Self::Suicidal => "suicidal",
            Self::Positive => "positive",
            Self::Neutral => "neutral",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Mood::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(label))
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
