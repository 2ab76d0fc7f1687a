//! Ordered phrase tables and the single matching routine shared by every
//! classification rule.
//!
//! A phrase containing whitespace is a multi-word phrase and matches as a
//! case-insensitive substring. A single word must match on whole-word
//! boundaries, so `"alone"` does not fire inside `"lonely"`.

use regex::Regex;

/// How a phrase is tested against text.
#[derive(Debug)]
enum Matcher {
    /// Lower-cased needle, counted as non-overlapping substrings.
    Substring(String),
    /// Case-insensitive `\b...\b` pattern.
    Word(Regex),
}

/// A single compiled phrase.
#[derive(Debug)]
pub struct Phrase {
    text: &'static str,
    matcher: Matcher,
}

impl Phrase {
    pub fn compile(text: &'static str) -> Self {
        let needle = text.trim().to_lowercase();
        let matcher = if needle.split_whitespace().nth(1).is_some() {
            Matcher::Substring(needle)
        } else {
            let pattern = format!(r"(?i)\b{}\b", regex::escape(&needle));
            match Regex::new(&pattern) {
                Ok(re) => Matcher::Word(re),
                Err(e) => {
                    tracing::warn!(
                        phrase = text,
                        error = %e,
                        "Phrase does not compile to a whole-word pattern, using substring match"
                    );
                    Matcher::Substring(needle)
                }
            }
        };
        Self { text, matcher }
    }

    /// The phrase as declared in its table.
    pub fn text(&self) -> &'static str {
        self.text
    }

    /// Number of occurrences in `lowered`, which must already be lower-cased.
    pub fn occurrences(&self, lowered: &str) -> usize {
        match &self.matcher {
            Matcher::Substring(needle) => lowered.matches(needle.as_str()).count(),
            Matcher::Word(re) => re.find_iter(lowered).count(),
        }
    }

    pub fn is_match(&self, lowered: &str) -> bool {
        match &self.matcher {
            Matcher::Substring(needle) => lowered.contains(needle.as_str()),
            Matcher::Word(re) => re.is_match(lowered),
        }
    }
}

/// An ordered list of phrases. Declaration order is significant: scans stop
/// at the first phrase that matches.
#[derive(Debug)]
pub struct PhraseTable {
    phrases: Vec<Phrase>,
}

impl PhraseTable {
    pub fn compile(phrases: &[&'static str]) -> Self {
        Self {
            phrases: phrases.iter().copied().map(Phrase::compile).collect(),
        }
    }

    /// First phrase, in declaration order, present in `lowered`.
    pub fn first_match(&self, lowered: &str) -> Option<&Phrase> {
        self.phrases.iter().find(|p| p.is_match(lowered))
    }

    /// Occurrence count of the first matching phrase. Later phrases are
    /// never consulted once one has matched.
    pub fn first_match_count(&self, lowered: &str) -> Option<usize> {
        self.first_match(lowered).map(|p| p.occurrences(lowered))
    }

    pub fn any_match(&self, lowered: &str) -> bool {
        self.first_match(lowered).is_some()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}
