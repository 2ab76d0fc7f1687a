//! Response dispatch: crisis override, issue and mood templates, resource
//! prompts and supplemental resource blocks.
//!
//! Every random choice draws from a caller-supplied [`Rng`], so tests can pin
//! outcomes and concurrent callers never share generator state.

use std::sync::Arc;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::dispatch::templates::{
    self, CRISIS_LEADS, CRISIS_RESOURCES, FOLLOW_UP_QUESTIONS, ISSUE_PLACEHOLDER,
    NEUTRAL_TEMPLATES, QUOTES, UNNAMED_ISSUE,
};
use crate::resources::{ResourceCatalog, ResourceItem, ResourceKind, format_block};
use crate::triage::{IssueAnalysis, IssueCategory, Mood, MoodAnalysis, Severity};

/// Which branch of the response state machine handles a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    /// Crisis lead plus the fixed emergency block. Ignores the issue.
    Crisis,
    IssueTemplate(IssueCategory),
    MoodTemplate(Mood),
    NeutralFallback,
}

/// Selects and renders responses. Holds no mutable state; share freely.
#[derive(Debug, Clone, Default)]
pub struct ResponseDispatcher {
    catalog: Option<Arc<ResourceCatalog>>,
}

impl ResponseDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher that can attach supplemental resources from `catalog`.
    pub fn with_catalog(catalog: Arc<ResourceCatalog>) -> Self {
        Self {
            catalog: Some(catalog),
        }
    }

    pub fn catalog(&self) -> Option<&ResourceCatalog> {
        self.catalog.as_deref()
    }

    /// Decide the response state. Crisis always wins; an issue with its own
    /// templates beats the mood; unknown moods land on the neutral fallback.
    pub fn select_state(mood: &MoodAnalysis, issue: &IssueAnalysis) -> ResponseState {
        if mood.signals_crisis() {
            return ResponseState::Crisis;
        }
        if let Some(category) = issue.primary_issue
            && templates::issue_templates(category).is_some()
        {
            return ResponseState::IssueTemplate(category);
        }
        match mood.mood() {
            Some(m) if templates::mood_templates(m).is_some() => ResponseState::MoodTemplate(m),
            _ => ResponseState::NeutralFallback,
        }
    }

    /// Render the reply text for one turn.
    pub fn generate_response<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mood: &MoodAnalysis,
        issue: &IssueAnalysis,
    ) -> String {
        let state = Self::select_state(mood, issue);
        tracing::debug!(
            ?state,
            mood = %mood.primary_mood,
            issue = issue.primary_issue.map(|c| c.as_str()).unwrap_or("none"),
            "Dispatching response"
        );

        let body = match state {
            ResponseState::Crisis => return Self::crisis_message(rng),
            ResponseState::IssueTemplate(category) => {
                pick(rng, templates::issue_templates(category).unwrap_or(NEUTRAL_TEMPLATES))
                    .to_string()
            }
            ResponseState::MoodTemplate(m) => {
                let template = pick(rng, templates::mood_templates(m).unwrap_or(NEUTRAL_TEMPLATES));
                let subject = issue
                    .primary_issue
                    .map(|c| c.display_name())
                    .unwrap_or_else(|| UNNAMED_ISSUE.to_string());
                template.replace(ISSUE_PLACEHOLDER, &subject)
            }
            ResponseState::NeutralFallback => pick(rng, NEUTRAL_TEMPLATES).to_string(),
        };

        format!("{}\n\n{}", body, pick(rng, FOLLOW_UP_QUESTIONS))
    }

    /// One random crisis lead followed by the fixed emergency contacts.
    pub fn crisis_message<R: Rng + ?Sized>(rng: &mut R) -> String {
        format!("{}\n\n{}", pick(rng, CRISIS_LEADS), CRISIS_RESOURCES)
    }

    /// Offer of follow-up resources. First matching rule wins; no randomness.
    pub fn generate_resource_prompt(
        &self,
        mood: &MoodAnalysis,
        issue: &IssueAnalysis,
    ) -> &'static str {
        let label = mood.primary_mood.trim();
        if label.eq_ignore_ascii_case(Mood::Hungry.as_str()) {
            return templates::PROMPT_FOOD;
        }
        if label.eq_ignore_ascii_case(Mood::Lonely.as_str()) {
            return templates::PROMPT_SOCIAL;
        }
        if label.eq_ignore_ascii_case(Mood::Suicidal.as_str()) || mood.is_crisis {
            return templates::PROMPT_CRISIS;
        }
        match issue.primary_issue {
            Some(IssueCategory::RelationshipConflict) => templates::PROMPT_RELATIONSHIP,
            Some(IssueCategory::WorkStress) => templates::PROMPT_WORK,
            Some(IssueCategory::FinancialProblems) => templates::PROMPT_FINANCIAL,
            Some(IssueCategory::HealthConcerns) => templates::PROMPT_HEALTH,
            _ => templates::PROMPT_GENERIC,
        }
    }

    /// A quote from `category` when it is known, otherwise from a random
    /// category.
    pub fn motivational_quote<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<&str>,
    ) -> &'static str {
        let pool = match category.and_then(templates::quotes_for) {
            Some(pool) => pool,
            None => QUOTES.choose(rng).map(|(_, q)| *q).unwrap_or(NEUTRAL_TEMPLATES),
        };
        pick(rng, pool)
    }

    /// A formatted resource block suited to this turn, if a catalog is
    /// attached and the turn calls for one.
    pub fn supplemental_resources<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mood: &MoodAnalysis,
        issue: &IssueAnalysis,
    ) -> Option<String> {
        let catalog = self.catalog()?;
        let issue_label = issue.primary_issue.map(|c| c.as_str());

        let (kind, items): (ResourceKind, Vec<ResourceItem>) = if mood.signals_crisis() {
            (ResourceKind::Helpline, into_items(catalog.helpline_info(issue_label)))
        } else {
            match mood.mood() {
                Some(Mood::Hungry) => (
                    ResourceKind::Restaurant,
                    into_items(catalog.food_suggestions(rng, None)),
                ),
                Some(m @ (Mood::Lonely | Mood::Sad | Mood::Anxious | Mood::Tired)) => (
                    ResourceKind::Activity,
                    into_items(catalog.activity_suggestions(rng, Some(m.as_str()))),
                ),
                _ if issue.severity == Severity::High && issue_label.is_some() => (
                    ResourceKind::Helpline,
                    into_items(catalog.helpline_info(issue_label)),
                ),
                _ => return None,
            }
        };

        Some(format_block(kind, &items))
    }
}

fn into_items<T: Into<ResourceItem>>(records: Vec<T>) -> Vec<ResourceItem> {
    records.into_iter().map(Into::into).collect()
}

/// Uniform choice from a non-empty table.
fn pick<R: Rng + ?Sized>(rng: &mut R, options: &[&'static str]) -> &'static str {
    options.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rand::rngs::mock::StepRng;

    /// Always draws zero, so every choice takes the first option.
    fn first() -> StepRng {
        StepRng::new(0, 0)
    }

    fn seeded() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn crisis_flag_beats_any_issue() {
        let mood = MoodAnalysis::new("positive").crisis();
        let issue = IssueAnalysis::with_primary(IssueCategory::WorkStress);
        assert_eq!(
            ResponseDispatcher::select_state(&mood, &issue),
            ResponseState::Crisis
        );
    }

    #[test]
    fn suicidal_mood_is_crisis() {
        let mood = MoodAnalysis::new("Suicidal");
        assert_eq!(
            ResponseDispatcher::select_state(&mood, &IssueAnalysis::unmatched()),
            ResponseState::Crisis
        );
    }

    #[test]
    fn crisis_response_ends_with_fixed_resources() {
        let dispatcher = ResponseDispatcher::new();
        let mood = MoodAnalysis::new("sad").crisis();
        let issue = IssueAnalysis::with_primary(IssueCategory::Grief);
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let text = dispatcher.generate_response(&mut rng, &mood, &issue);
            assert!(text.ends_with(CRISIS_RESOURCES));
            let lead = text.split("\n\n").next().unwrap();
            assert!(CRISIS_LEADS.contains(&lead));
        }
    }

    #[test]
    fn issue_template_with_follow_up() {
        let dispatcher = ResponseDispatcher::new();
        let issue = IssueAnalysis::with_primary(IssueCategory::Loneliness);
        let text = dispatcher.generate_response(&mut first(), &MoodAnalysis::new("angry"), &issue);
        let expected = format!(
            "{}\n\n{}",
            templates::issue_templates(IssueCategory::Loneliness).unwrap()[0],
            FOLLOW_UP_QUESTIONS[0]
        );
        assert_eq!(text, expected);
    }

    #[test]
    fn mood_template_names_issue_without_underscores() {
        let dispatcher = ResponseDispatcher::new();
        let issue = IssueAnalysis::with_primary(IssueCategory::AcademicStress);
        let mood = MoodAnalysis::new("anxious");
        assert_eq!(
            ResponseDispatcher::select_state(&mood, &issue),
            ResponseState::MoodTemplate(Mood::Anxious)
        );
        let text = dispatcher.generate_response(&mut first(), &mood, &issue);
        assert!(text.starts_with("It sounds like academic stress is making you anxious."));
        assert!(!text.contains(ISSUE_PLACEHOLDER));
    }

    #[test]
    fn mood_template_without_issue_uses_generic_phrase() {
        let dispatcher = ResponseDispatcher::new();
        let text = dispatcher.generate_response(
            &mut first(),
            &MoodAnalysis::new("sad"),
            &IssueAnalysis::unmatched(),
        );
        assert!(text.starts_with("I'm sorry you're feeling down about what you're going through."));
    }

    #[test]
    fn unknown_mood_falls_back_to_neutral() {
        let mood = MoodAnalysis::new("bewildered");
        let issue = IssueAnalysis::with_primary(IssueCategory::IdentityCrisis);
        assert_eq!(
            ResponseDispatcher::select_state(&mood, &issue),
            ResponseState::NeutralFallback
        );
        let text = ResponseDispatcher::new().generate_response(&mut seeded(), &mood, &issue);
        let (body, question) = text.split_once("\n\n").unwrap();
        assert!(NEUTRAL_TEMPLATES.contains(&body));
        assert!(FOLLOW_UP_QUESTIONS.contains(&question));
    }

    #[test]
    fn neutral_mood_has_no_templates_of_its_own() {
        assert_eq!(
            ResponseDispatcher::select_state(&MoodAnalysis::default(), &IssueAnalysis::unmatched()),
            ResponseState::NeutralFallback
        );
    }

    #[test]
    fn resource_prompt_cascade_order() {
        let d = ResponseDispatcher::new();
        let work = IssueAnalysis::with_primary(IssueCategory::WorkStress);

        assert_eq!(
            d.generate_resource_prompt(&MoodAnalysis::new("hungry").crisis(), &work),
            templates::PROMPT_FOOD
        );
        assert_eq!(
            d.generate_resource_prompt(&MoodAnalysis::new("lonely"), &work),
            templates::PROMPT_SOCIAL
        );
        assert_eq!(
            d.generate_resource_prompt(&MoodAnalysis::new("sad").crisis(), &work),
            templates::PROMPT_CRISIS
        );
        assert_eq!(
            d.generate_resource_prompt(&MoodAnalysis::new("sad"), &work),
            templates::PROMPT_WORK
        );
        assert_eq!(
            d.generate_resource_prompt(
                &MoodAnalysis::new("sad"),
                &IssueAnalysis::with_primary(IssueCategory::HealthConcerns)
            ),
            templates::PROMPT_HEALTH
        );
        assert_eq!(
            d.generate_resource_prompt(
                &MoodAnalysis::new("sad"),
                &IssueAnalysis::with_primary(IssueCategory::Grief)
            ),
            templates::PROMPT_GENERIC
        );
    }

    #[test]
    fn quote_from_known_category() {
        let d = ResponseDispatcher::new();
        let quote = d.motivational_quote(&mut seeded(), Some("resilience"));
        assert!(templates::quotes_for("resilience").unwrap().contains(&quote));
    }

    #[test]
    fn quote_from_unknown_category_comes_from_some_pool() {
        let d = ResponseDispatcher::new();
        let quote = d.motivational_quote(&mut seeded(), Some("nonsense"));
        assert!(QUOTES.iter().any(|(_, pool)| pool.contains(&quote)));
    }

    #[test]
    fn no_catalog_means_no_supplemental_block() {
        let d = ResponseDispatcher::new();
        let block = d.supplemental_resources(
            &mut seeded(),
            &MoodAnalysis::new("hungry"),
            &IssueAnalysis::unmatched(),
        );
        assert!(block.is_none());
    }

    #[test]
    fn supplemental_block_follows_mood() {
        let d = ResponseDispatcher::with_catalog(Arc::new(ResourceCatalog::empty()));
        let unmatched = IssueAnalysis::unmatched();

        let crisis = d
            .supplemental_resources(&mut seeded(), &MoodAnalysis::new("suicidal"), &unmatched)
            .unwrap();
        assert!(crisis.contains("988 Suicide & Crisis Lifeline"));

        let food = d
            .supplemental_resources(&mut seeded(), &MoodAnalysis::new("hungry"), &unmatched)
            .unwrap();
        assert!(food.contains("Restaurant suggestions unavailable"));

        let tired = d
            .supplemental_resources(&mut seeded(), &MoodAnalysis::new("tired"), &unmatched)
            .unwrap();
        assert!(tired.contains("Activity suggestions unavailable"));

        assert!(
            d.supplemental_resources(&mut seeded(), &MoodAnalysis::new("positive"), &unmatched)
                .is_none()
        );
    }

    #[test]
    fn high_severity_issue_gets_helplines() {
        let d = ResponseDispatcher::with_catalog(Arc::new(ResourceCatalog::empty()));
        let mut issue = IssueAnalysis::with_primary(IssueCategory::FinancialProblems);
        issue.severity = Severity::High;
        let block = d
            .supplemental_resources(&mut seeded(), &MoodAnalysis::new("angry"), &issue)
            .unwrap();
        assert!(block.contains("Crisis Text Line"));
    }
}
