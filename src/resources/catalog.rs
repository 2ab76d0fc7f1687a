//! Resource catalog: one-time loading plus filtered, sampled lookups with
//! built-in fallbacks.
//!
//! Every kind is loaded independently. A kind that is missing, unreadable or
//! malformed is logged, recorded in the [`LoadReport`], and left empty; its
//! lookups then serve fallback content. Nothing here ever fails a caller.

use std::fmt;
use std::sync::LazyLock;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;

use crate::error::CatalogError;
use crate::resources::source::ResourceSource;
use crate::resources::{
    Activity, DEFAULT_MAX_SUGGESTIONS, Helpline, Quote, ResourceKind, Restaurant, has_tag,
};

/// Tag marking helplines suitable for anyone.
pub const GENERAL_TAG: &str = "general";

/// Number of helplines returned when nothing is tagged for the request.
const LAST_RESORT_HELPLINES: usize = 3;

/// Outcome of loading one kind.
#[derive(Debug)]
pub struct KindLoad {
    pub kind: ResourceKind,
    /// Number of records loaded, or why the kind is empty.
    pub outcome: Result<usize, CatalogError>,
}

/// Per-kind result of [`ResourceCatalog::load`].
#[derive(Debug)]
pub struct LoadReport {
    pub source: String,
    pub kinds: Vec<KindLoad>,
}

impl LoadReport {
    /// True when every kind loaded without error.
    pub fn is_complete(&self) -> bool {
        self.kinds.iter().all(|k| k.outcome.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CatalogError> {
        self.kinds.iter().filter_map(|k| k.outcome.as_ref().err())
    }

    /// Records loaded for `kind` (zero if it failed).
    pub fn loaded(&self, kind: ResourceKind) -> usize {
        self.kinds
            .iter()
            .find(|k| k.kind == kind)
            .and_then(|k| k.outcome.as_ref().ok().copied())
            .unwrap_or(0)
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "resources from {}:", self.source)?;
        for k in &self.kinds {
            match &k.outcome {
                Ok(n) => write!(f, " {}={}", k.kind, n)?,
                Err(_) => write!(f, " {}=unavailable", k.kind)?,
            }
        }
        Ok(())
    }
}

/// Loaded resource collections. Read-only after construction.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    restaurants: Vec<Restaurant>,
    activities: Vec<Activity>,
    helplines: Vec<Helpline>,
    quotes: Vec<Quote>,
    max_suggestions: usize,
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::empty()
    }
}

impl ResourceCatalog {
    /// A catalog with no loaded data; every lookup serves fallbacks.
    pub fn empty() -> Self {
        Self {
            restaurants: Vec::new(),
            activities: Vec::new(),
            helplines: Vec::new(),
            quotes: Vec::new(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
        }
    }

    /// Load every kind from `source`. Failures are per kind and never abort
    /// the remaining kinds.
    pub fn load(source: &dyn ResourceSource) -> (Self, LoadReport) {
        let mut catalog = Self::empty();
        let mut kinds = Vec::with_capacity(ResourceKind::ALL.len());

        for kind in ResourceKind::ALL {
            let outcome = match kind {
                ResourceKind::Restaurant => {
                    load_kind(source, kind).map(|v| store(&mut catalog.restaurants, v))
                }
                ResourceKind::Activity => {
                    load_kind(source, kind).map(|v| store(&mut catalog.activities, v))
                }
                ResourceKind::Helpline => {
                    load_kind(source, kind).map(|v| store(&mut catalog.helplines, v))
                }
                ResourceKind::Quote => {
                    load_kind(source, kind).map(|v| store(&mut catalog.quotes, v))
                }
            };

            match &outcome {
                Ok(count) => {
                    tracing::debug!(kind = %kind, count, "Loaded resource collection");
                }
                Err(e) => {
                    tracing::warn!(
                        kind = %kind,
                        error = %e,
                        "Resource collection unavailable, serving built-in fallbacks"
                    );
                }
            }
            kinds.push(KindLoad { kind, outcome });
        }

        let report = LoadReport {
            source: source.describe(),
            kinds,
        };
        tracing::info!("Loaded {}", report);
        (catalog, report)
    }

    /// Override the food/activity sample cap (minimum 1).
    pub fn with_max_suggestions(mut self, max: usize) -> Self {
        self.max_suggestions = max.max(1);
        self
    }

    pub fn max_suggestions(&self) -> usize {
        self.max_suggestions
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn helplines(&self) -> &[Helpline] {
        &self.helplines
    }

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    /// Up to `max_suggestions` places to eat, preferring ones whose location
    /// contains `location`. An empty collection yields a single synthetic
    /// "unavailable" entry pointing at a map search.
    pub fn food_suggestions<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        location: Option<&str>,
    ) -> Vec<Restaurant> {
        if self.restaurants.is_empty() {
            return vec![unavailable_restaurant(location)];
        }

        let all: Vec<&Restaurant> = self.restaurants.iter().collect();
        let pool = match location.map(str::trim).filter(|l| !l.is_empty()) {
            Some(wanted) => {
                let wanted = wanted.to_lowercase();
                let nearby: Vec<&Restaurant> = self
                    .restaurants
                    .iter()
                    .filter(|r| {
                        r.location
                            .as_deref()
                            .is_some_and(|l| l.to_lowercase().contains(&wanted))
                    })
                    .collect();
                if nearby.is_empty() { all } else { nearby }
            }
            None => all,
        };

        sample(rng, pool, self.max_suggestions)
    }

    /// Up to `max_suggestions` activities, preferring ones tagged with `mood`.
    pub fn activity_suggestions<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        mood: Option<&str>,
    ) -> Vec<Activity> {
        if self.activities.is_empty() {
            return vec![unavailable_activity(mood)];
        }

        let all: Vec<&Activity> = self.activities.iter().collect();
        let pool = match mood.map(str::trim).filter(|m| !m.is_empty()) {
            Some(wanted) => {
                let tagged: Vec<&Activity> = self
                    .activities
                    .iter()
                    .filter(|a| has_tag(&a.mood_tags, wanted))
                    .collect();
                if tagged.is_empty() { all } else { tagged }
            }
            None => all,
        };

        sample(rng, pool, self.max_suggestions)
    }

    /// Helplines for `issue`. Not sampled and not capped when the issue
    /// matches; otherwise the `general` helplines; otherwise the first few.
    /// An empty collection yields the universal crisis contacts, in order.
    pub fn helpline_info(&self, issue: Option<&str>) -> Vec<Helpline> {
        if self.helplines.is_empty() {
            return fallback_helplines();
        }

        if let Some(issue) = issue {
            let matching: Vec<Helpline> = self
                .helplines
                .iter()
                .filter(|h| has_tag(&h.issue_tags, issue))
                .cloned()
                .collect();
            if !matching.is_empty() {
                return matching;
            }
        }

        let general: Vec<Helpline> = self
            .helplines
            .iter()
            .filter(|h| has_tag(&h.issue_tags, GENERAL_TAG))
            .cloned()
            .collect();
        if !general.is_empty() {
            return general;
        }

        self.helplines
            .iter()
            .take(LAST_RESORT_HELPLINES)
            .cloned()
            .collect()
    }

    /// A random quote from `category`, or from the whole pool when the
    /// category is absent or unknown. Uses a small built-in pool when no
    /// quotes were loaded.
    pub fn motivational_quote<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        category: Option<&str>,
    ) -> Quote {
        let pool: &[Quote] = if self.quotes.is_empty() {
            &FALLBACK_QUOTES
        } else {
            &self.quotes
        };
        pick_quote(rng, pool, category)
    }
}

fn store<T>(slot: &mut Vec<T>, records: Vec<T>) -> usize {
    *slot = records;
    slot.len()
}

fn load_kind<T: DeserializeOwned>(
    source: &dyn ResourceSource,
    kind: ResourceKind,
) -> Result<Vec<T>, CatalogError> {
    let raw = source.read(kind)?;
    serde_json::from_str(&raw).map_err(|e| CatalogError::Parse {
        kind,
        reason: e.to_string(),
    })
}

/// Uniform sample without replacement. Pools at or under the cap are
/// returned whole, in catalog order.
fn sample<T: Clone, R: Rng + ?Sized>(rng: &mut R, pool: Vec<&T>, max: usize) -> Vec<T> {
    if pool.len() <= max {
        return pool.into_iter().cloned().collect();
    }
    pool.choose_multiple(rng, max).map(|&t| t.clone()).collect()
}

fn pick_quote<R: Rng + ?Sized>(rng: &mut R, pool: &[Quote], category: Option<&str>) -> Quote {
    let in_category: Vec<&Quote> = match category.map(str::trim).filter(|c| !c.is_empty()) {
        Some(wanted) => pool
            .iter()
            .filter(|q| {
                q.category
                    .as_deref()
                    .is_some_and(|c| c.trim().eq_ignore_ascii_case(wanted))
            })
            .collect(),
        None => Vec::new(),
    };

    let chosen = if in_category.is_empty() {
        pool.choose(rng)
    } else {
        in_category.choose(rng).copied()
    };
    chosen.cloned().unwrap_or_else(|| FALLBACK_QUOTES[0].clone())
}

fn search_link(base: &str, query: &str) -> String {
    format!("{}{}", base, urlencoding::encode(query))
}

fn unavailable_restaurant(location: Option<&str>) -> Restaurant {
    let query = match location.map(str::trim).filter(|l| !l.is_empty()) {
        Some(l) => format!("restaurants in {l}"),
        None => "restaurants near me".to_string(),
    };
    Restaurant {
        name: "Restaurant suggestions unavailable".to_string(),
        description: "I don't have any curated places to eat right now, but a quick map search \
                      should turn up something good nearby."
            .to_string(),
        link: Some(search_link("https://www.google.com/maps/search/", &query)),
        location: location.map(str::to_string),
    }
}

fn unavailable_activity(mood: Option<&str>) -> Activity {
    let query = match mood.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => format!("things to do when feeling {m}"),
        None => "self care activities".to_string(),
    };
    Activity {
        name: "Activity suggestions unavailable".to_string(),
        description: "I don't have curated activities right now. A short walk, some music, or \
                      reaching out to someone you trust can be a good start."
            .to_string(),
        link: Some(search_link("https://www.google.com/search?q=", &query)),
        mood_tags: Default::default(),
    }
}

/// Universal crisis contacts, always in this order.
pub fn fallback_helplines() -> Vec<Helpline> {
    vec![
        Helpline {
            name: "988 Suicide & Crisis Lifeline".to_string(),
            phone: Some("988".to_string()),
            description: "Free, confidential support for people in distress, 24/7.".to_string(),
            link: Some("https://988lifeline.org".to_string()),
            issue_tags: [GENERAL_TAG.to_string(), "crisis".to_string()].into(),
        },
        Helpline {
            name: "Crisis Text Line".to_string(),
            phone: Some("Text HOME to 741741".to_string()),
            description: "Text with a trained crisis counselor at any hour.".to_string(),
            link: Some("https://www.crisistextline.org".to_string()),
            issue_tags: [GENERAL_TAG.to_string(), "crisis".to_string()].into(),
        },
        Helpline {
            name: "Emergency Services".to_string(),
            phone: Some("911".to_string()),
            description: "Call if you or someone else is in immediate danger.".to_string(),
            link: None,
            issue_tags: ["emergency".to_string()].into(),
        },
    ]
}

static FALLBACK_QUOTES: LazyLock<Vec<Quote>> = LazyLock::new(|| {
    vec![
        Quote {
            text: "Hope is being able to see that there is light despite all of the darkness."
                .to_string(),
            author: Some("Desmond Tutu".to_string()),
            category: Some("hope".to_string()),
        },
        Quote {
            text: "Rock bottom became the solid foundation on which I rebuilt my life."
                .to_string(),
            author: Some("J.K. Rowling".to_string()),
            category: Some("resilience".to_string()),
        },
        Quote {
            text: "Almost everything will work again if you unplug it for a few minutes, \
                   including you."
                .to_string(),
            author: Some("Anne Lamott".to_string()),
            category: Some("self_care".to_string()),
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::MemorySource;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use tracing_test::traced_test;

    const RESTAURANTS: &str = r#"[
        {"name": "Saffron House", "description": "Comfort curries", "location": "Dubai Marina"},
        {"name": "Noodle Bar", "description": "Warm broth", "location": "Downtown Dubai"},
        {"name": "Green Bowl", "description": "Salads", "location": "Abu Dhabi"},
        {"name": "Crumb", "description": "Bakery", "location": "Sharjah"},
        {"name": "Ember", "description": "Grill"}
    ]"#;

    const HELPLINES: &str = r#"[
        {"name": "Family Line", "description": "Relationships", "issue_tags": ["relationship_conflict"]},
        {"name": "Work Line", "description": "Workplace", "issue_tags": ["work_stress"]},
        {"name": "Open Line", "description": "Anyone", "issue_tags": ["general"]},
        {"name": "Money Line", "description": "Debt advice", "issue_tags": ["financial_problems"]}
    ]"#;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn loaded(source: MemorySource) -> ResourceCatalog {
        ResourceCatalog::load(&source).0
    }

    #[test]
    fn empty_catalog_serves_fallback_helplines_in_order() {
        let names: Vec<String> = ResourceCatalog::empty()
            .helpline_info(Some("grief"))
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "988 Suicide & Crisis Lifeline",
                "Crisis Text Line",
                "Emergency Services"
            ]
        );
    }

    #[test]
    fn empty_restaurants_yield_unavailable_entry_with_search_link() {
        let items = ResourceCatalog::empty().food_suggestions(&mut rng(), Some("dubai"));
        assert_eq!(items.len(), 1);
        let link = items[0].link.as_deref().unwrap();
        assert_eq!(
            link,
            "https://www.google.com/maps/search/restaurants%20in%20dubai"
        );
        assert!(items[0].name.contains("unavailable"));
    }

    #[test]
    fn food_filters_on_location_substring() {
        let catalog = loaded(MemorySource::new().with(ResourceKind::Restaurant, RESTAURANTS));
        let items = catalog.food_suggestions(&mut rng(), Some("DUBAI"));
        let names: Vec<&str> = items.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Saffron House", "Noodle Bar"]);
    }

    #[test]
    fn food_falls_back_to_everything_when_location_unmatched() {
        let catalog = loaded(MemorySource::new().with(ResourceKind::Restaurant, RESTAURANTS));
        let items = catalog.food_suggestions(&mut rng(), Some("Reykjavik"));
        assert_eq!(items.len(), 3);
        let mut names: Vec<&str> = items.iter().map(|r| r.name.as_str()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 3, "sampling must not repeat entries");
    }

    #[test]
    fn sample_cap_is_configurable() {
        let catalog = loaded(MemorySource::new().with(ResourceKind::Restaurant, RESTAURANTS))
            .with_max_suggestions(4);
        assert_eq!(catalog.food_suggestions(&mut rng(), None).len(), 4);
        assert_eq!(catalog.clone().with_max_suggestions(0).max_suggestions(), 1);
    }

    #[test]
    fn activities_prefer_mood_tags() {
        let json = r#"[
            {"name": "Walk", "description": "Outside", "mood_tags": ["sad", "anxious"]},
            {"name": "Nap", "description": "Rest", "mood_tags": ["tired"]},
            {"name": "Call a friend", "description": "Connect", "mood_tags": ["lonely", "sad"]}
        ]"#;
        let catalog = loaded(MemorySource::new().with(ResourceKind::Activity, json));
        let tired = catalog.activity_suggestions(&mut rng(), Some("Tired"));
        assert_eq!(tired.len(), 1);
        assert_eq!(tired[0].name, "Nap");

        let unknown = catalog.activity_suggestions(&mut rng(), Some("hungry"));
        assert_eq!(unknown.len(), 3);
    }

    #[test]
    fn empty_activities_yield_unavailable_entry() {
        let items = ResourceCatalog::empty().activity_suggestions(&mut rng(), Some("sad"));
        assert_eq!(items.len(), 1);
        assert!(
            items[0]
                .link
                .as_deref()
                .unwrap()
                .ends_with("things%20to%20do%20when%20feeling%20sad")
        );
    }

    #[test]
    fn helplines_by_issue_then_general_then_first_three() {
        let catalog = loaded(MemorySource::new().with(ResourceKind::Helpline, HELPLINES));

        let work = catalog.helpline_info(Some("work_stress"));
        assert_eq!(work.len(), 1);
        assert_eq!(work[0].name, "Work Line");

        let grief = catalog.helpline_info(Some("grief"));
        assert_eq!(grief.len(), 1);
        assert_eq!(grief[0].name, "Open Line");

        let none = catalog.helpline_info(None);
        assert_eq!(none[0].name, "Open Line");
    }

    #[test]
    fn helplines_last_resort_is_first_three() {
        let json = r#"[
            {"name": "A", "description": "a", "issue_tags": ["x"]},
            {"name": "B", "description": "b"},
            {"name": "C", "description": "c"},
            {"name": "D", "description": "d"}
        ]"#;
        let catalog = loaded(MemorySource::new().with(ResourceKind::Helpline, json));
        let names: Vec<String> = catalog
            .helpline_info(Some("grief"))
            .into_iter()
            .map(|h| h.name)
            .collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn quote_category_filter_with_fallback_pool() {
        let catalog = ResourceCatalog::empty();
        let hope = catalog.motivational_quote(&mut rng(), Some("Hope"));
        assert_eq!(hope.author.as_deref(), Some("Desmond Tutu"));

        let any = catalog.motivational_quote(&mut rng(), Some("no-such-category"));
        assert!(FALLBACK_QUOTES.contains(&any));
    }

    #[test]
    fn quote_comes_from_loaded_pool() {
        let json = r#"[
            {"text": "One step at a time.", "category": "resilience"},
            {"text": "Rest is productive.", "category": "self_care"}
        ]"#;
        let catalog = loaded(MemorySource::new().with(ResourceKind::Quote, json));
        let quote = catalog.motivational_quote(&mut rng(), Some("self_care"));
        assert_eq!(quote.text, "Rest is productive.");
        let any = catalog.motivational_quote(&mut rng(), None);
        assert!(catalog.quotes().contains(&any));
    }

    #[test]
    fn load_is_per_kind_and_never_fatal() {
        let source = MemorySource::new()
            .with(ResourceKind::Restaurant, RESTAURANTS)
            .with(ResourceKind::Quote, "{ not json");
        let (catalog, report) = ResourceCatalog::load(&source);

        assert!(!report.is_complete());
        assert_eq!(report.loaded(ResourceKind::Restaurant), 5);
        assert_eq!(report.loaded(ResourceKind::Quote), 0);
        assert_eq!(catalog.restaurants().len(), 5);
        assert!(catalog.quotes().is_empty());
        assert!(catalog.activities().is_empty());

        let failed: Vec<ResourceKind> = report.failures().map(CatalogError::kind).collect();
        assert_eq!(
            failed,
            vec![
                ResourceKind::Activity,
                ResourceKind::Helpline,
                ResourceKind::Quote
            ]
        );
        assert!(matches!(
            report.kinds[3].outcome,
            Err(CatalogError::Parse { .. })
        ));
    }

    #[test]
    #[traced_test]
    fn missing_kind_logs_a_warning() {
        let _ = ResourceCatalog::load(&MemorySource::new());
        assert!(logs_contain("Resource collection unavailable"));
    }

    #[test]
    fn report_display_summarizes_counts() {
        let source = MemorySource::new().with(ResourceKind::Helpline, HELPLINES);
        let (_, report) = ResourceCatalog::load(&source);
        assert_eq!(
            report.to_string(),
            "resources from memory: restaurants=unavailable activities=unavailable \
             helplines=4 quotes=unavailable"
        );
    }
}
