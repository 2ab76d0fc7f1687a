//! End-to-end turn handling: classify the text, dispatch a response, offer
//! resources.

use std::borrow::Cow;
use std::sync::Arc;

use rand::Rng;
use serde::Serialize;

use crate::config::Config;
use crate::dispatch::{ResponseDispatcher, ResponseState};
use crate::resources::{DirectorySource, LoadReport, ResourceCatalog};
use crate::triage::{IssueAnalysis, IssueClassifier, MoodAnalysis};

/// Everything produced for one user turn.
#[derive(Debug, Clone, Serialize)]
pub struct SupportReply {
    pub analysis: IssueAnalysis,
    /// True when the crisis path produced `response`.
    pub crisis: bool,
    pub response: String,
    pub resource_prompt: String,
    pub resources: Option<String>,
}

/// Classifier and dispatcher wired together. Immutable after construction,
/// so one engine can serve concurrent turns.
#[derive(Debug, Clone)]
pub struct SupportEngine {
    classifier: IssueClassifier,
    dispatcher: ResponseDispatcher,
    attach_resources: bool,
}

impl SupportEngine {
    pub fn new(classifier: IssueClassifier, dispatcher: ResponseDispatcher) -> Self {
        Self {
            classifier,
            dispatcher,
            attach_resources: true,
        }
    }

    /// Build from configuration, loading the catalog from the configured
    /// directory. Missing collections are reported, not fatal.
    pub fn from_config(config: &Config) -> (Self, LoadReport) {
        let source = DirectorySource::new(&config.resources.dir);
        let (catalog, report) = ResourceCatalog::load(&source);
        let catalog = catalog.with_max_suggestions(config.resources.max_suggestions);

        let engine = Self::new(
            IssueClassifier::with_tier_scan(config.triage.tier_scan),
            ResponseDispatcher::with_catalog(Arc::new(catalog)),
        )
        .attach_resources(config.resources.attach_to_replies);
        (engine, report)
    }

    /// Whether replies carry a supplemental resource block.
    pub fn attach_resources(mut self, attach: bool) -> Self {
        self.attach_resources = attach;
        self
    }

    pub fn classifier(&self) -> &IssueClassifier {
        &self.classifier
    }

    pub fn dispatcher(&self) -> &ResponseDispatcher {
        &self.dispatcher
    }

    pub fn classify(&self, text: &str) -> IssueAnalysis {
        self.classifier.classify(text)
    }

    /// Handle one turn. A critical phrase in `text` forces the crisis path
    /// even when the mood signal did not flag it.
    pub fn reply<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        text: &str,
        mood: &MoodAnalysis,
    ) -> SupportReply {
        let analysis = self.classifier.classify(text);

        let mood: Cow<'_, MoodAnalysis> =
            if !mood.signals_crisis() && self.classifier.has_critical_signal(text) {
                tracing::warn!(
                    mood = %mood.primary_mood,
                    "Critical phrase in message, escalating to crisis response"
                );
                Cow::Owned(mood.clone().crisis())
            } else {
                Cow::Borrowed(mood)
            };

        let crisis = ResponseDispatcher::select_state(&mood, &analysis) == ResponseState::Crisis;
        let response = self.dispatcher.generate_response(rng, &mood, &analysis);
        let resource_prompt = self
            .dispatcher
            .generate_resource_prompt(&mood, &analysis)
            .to_string();
        let resources = if self.attach_resources {
            self.dispatcher.supplemental_resources(rng, &mood, &analysis)
        } else {
            None
        };

        SupportReply {
            analysis,
            crisis,
            response,
            resource_prompt,
            resources,
        }
    }
}

impl Default for SupportEngine {
    fn default() -> Self {
        Self::new(IssueClassifier::new(), ResponseDispatcher::new())
    }
}
