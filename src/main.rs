//! `haven` command-line adapter.
//!
//! A thin shell over the library for local use: classify a message, run a
//! full support turn, or render resources from the configured catalog.
//! Logs go to stderr so stdout stays pipeable.

use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use haven::resources::{DirectorySource, ResourceItem, ResourceKind, format_resource_block};
use haven::{Config, IssueClassifier, MoodAnalysis, ResourceCatalog, SupportEngine};

#[derive(Parser)]
#[command(name = "haven", about = "Rule-based emotional-support triage", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a message and print the issue analysis as JSON.
    Classify {
        /// The user's message.
        text: String,
    },

    /// Run a full support turn for a message.
    Respond {
        /// The user's message.
        text: String,

        /// Mood label from the mood detector (angry, sad, anxious, lonely,
        /// hungry, tired, suicidal, positive, neutral).
        #[arg(long, default_value = "neutral")]
        mood: String,

        /// Treat the mood signal as a crisis.
        #[arg(long)]
        crisis: bool,

        /// Seed for template selection, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,

        /// Print the whole reply as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Render resources of one kind (food, activity, helpline, quote).
    Resources {
        /// Resource kind.
        kind: String,

        /// Preferred location for food suggestions.
        #[arg(long)]
        location: Option<String>,

        /// Mood tag for activity suggestions.
        #[arg(long)]
        mood: Option<String>,

        /// Issue tag for helplines (e.g. work_stress).
        #[arg(long)]
        issue: Option<String>,

        /// Quote category.
        #[arg(long)]
        category: Option<String>,

        /// Seed for sampling, for reproducible output.
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("haven=info")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Classify { text } => {
            let classifier = IssueClassifier::with_tier_scan(config.triage.tier_scan);
            println!("{}", serde_json::to_string_pretty(&classifier.classify(&text))?);
        }
        Commands::Respond {
            text,
            mood,
            crisis,
            seed,
            json,
        } => {
            let (engine, report) = SupportEngine::from_config(&config);
            if !report.is_complete() {
                tracing::debug!("{}", report);
            }

            let mut mood = MoodAnalysis::new(mood);
            if crisis {
                mood = mood.crisis();
            }
            let reply = engine.reply(&mut rng_from(seed), &text, &mood);

            if json {
                println!("{}", serde_json::to_string_pretty(&reply)?);
            } else {
                println!("{}", reply.response);
                if let Some(resources) = &reply.resources {
                    println!("\n{resources}");
                }
                println!("\n{}", reply.resource_prompt);
            }
        }
        Commands::Resources {
            kind,
            location,
            mood,
            issue,
            category,
            seed,
        } => {
            let source = DirectorySource::new(&config.resources.dir);
            let (catalog, _) = ResourceCatalog::load(&source);
            let catalog = catalog.with_max_suggestions(config.resources.max_suggestions);
            let mut rng = rng_from(seed);

            let items: Vec<ResourceItem> = match kind.parse::<ResourceKind>() {
                Ok(ResourceKind::Restaurant) => catalog
                    .food_suggestions(&mut rng, location.as_deref())
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                Ok(ResourceKind::Activity) => catalog
                    .activity_suggestions(&mut rng, mood.as_deref())
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                Ok(ResourceKind::Helpline) => catalog
                    .helpline_info(issue.as_deref())
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                Ok(ResourceKind::Quote) => {
                    vec![catalog.motivational_quote(&mut rng, category.as_deref()).into()]
                }
                Err(_) => Vec::new(),
            };
            println!("{}", format_resource_block(&kind, &items));
        }
    }

    Ok(())
}
