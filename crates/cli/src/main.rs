//! marketmood CLI
//!
//! Seeds the MarketMood sample datasets into a document store and serves
//! them back: full listings, a random record, the dashboard summary and the
//! canned market assistant.

mod config;
mod progress;
mod render;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use marketmood_assistant::Conversation;
use marketmood_core::dashboard::SentimentSummary;
use marketmood_core::{
    DocumentStore, MemoryStore, QueryService, SeedService, SeededPicker, SledStore,
    SledStoreConfig,
};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

use config::{AppConfig, StoreBackend, StoreConfig};
use progress::SeedProgress;

#[derive(Parser)]
#[command(name = "marketmood")]
#[command(version, about = "Seed and query the MarketMood sample datasets", long_about = None)]
#[command(author = "marketmood")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (YAML or TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Document store backend
    #[arg(long, global = true, value_enum)]
    store: Option<StoreBackend>,

    /// Database directory for the sled backend
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed both collections and print what was written
    Seed,

    /// List every record of a collection
    List {
        #[arg(value_enum)]
        kind: RecordKind,
    },

    /// Show one record picked at random
    Random {
        #[arg(value_enum)]
        kind: RecordKind,

        /// Seed the random pick for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Summarise stored sentiment results
    Dashboard,

    /// Ask the market assistant a question
    Chat {
        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum RecordKind {
    Sentiment,
    FakeNews,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; stdout is reserved for command output
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Completions { shell } => {
            generate_completions(shell);
            return Ok(());
        }
        Commands::Chat { message } => {
            return chat(&message.join(" "), cli.json);
        }
        _ => {}
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .with_overrides(cli.store, cli.db_path.clone());

    let store = open_store(&config.store)?;
    let data = marketmood_formats::load(
        config.dataset.sentiment_path.as_deref(),
        config.dataset.fake_news_path.as_deref(),
    )
    .context("Failed to load seed datasets")?;
    let seeder = SeedService::new(store.clone(), data).with_policy(config.seed.policy);

    let outcome = run(cli.command, cli.json, &store, seeder).await;

    // Flush even when the command failed
    store.flush().await.context("Failed to flush document store")?;
    outcome
}

async fn run(
    command: Commands,
    json_output: bool,
    store: &Arc<dyn DocumentStore>,
    seeder: SeedService,
) -> Result<()> {
    match command {
        Commands::Seed => seed(seeder, store.backend(), json_output).await,
        Commands::List { kind } => {
            seeder.ensure_seeded_or_log().await;
            list(&QueryService::new(store.clone()), kind, json_output).await
        }
        Commands::Random { kind, seed } => {
            seeder.ensure_seeded_or_log().await;
            let query = match seed {
                Some(seed) => {
                    QueryService::with_picker(store.clone(), Arc::new(SeededPicker::new(seed)))
                }
                None => QueryService::new(store.clone()),
            };
            random(&query, kind, json_output).await
        }
        Commands::Dashboard => {
            seeder.ensure_seeded_or_log().await;
            dashboard(&QueryService::new(store.clone()), json_output).await
        }
        Commands::Chat { .. } | Commands::Completions { .. } => Ok(()),
    }
}

fn open_store(config: &StoreConfig) -> Result<Arc<dyn DocumentStore>> {
    let store: Arc<dyn DocumentStore> = match config.backend {
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
        StoreBackend::Sled => Arc::new(
            SledStore::open(SledStoreConfig::at(&config.path))
                .with_context(|| format!("Failed to open store at {}", config.path.display()))?,
        ),
    };
    debug!("Using {} document store", store.backend());
    Ok(store)
}

async fn seed(seeder: SeedService, backend: &str, json_output: bool) -> Result<()> {
    info!("Seeding {} store", backend);

    let report = if json_output {
        seeder.ensure_seeded().await?
    } else {
        let progress = Arc::new(SeedProgress::new()?);
        let result = seeder
            .with_observer(progress.clone())
            .ensure_seeded()
            .await;
        progress.finish();
        result?
    };

    if json_output {
        print_json(&report)?;
    } else {
        progress::print_seed_report(backend, &report);
    }
    Ok(())
}

async fn list(query: &QueryService, kind: RecordKind, json_output: bool) -> Result<()> {
    match kind {
        RecordKind::Sentiment => {
            let results = query.list_sentiment_results().await?;
            info!("Found {} sentiment results", results.len());
            if json_output {
                print_json(&results)?;
            } else {
                results
                    .iter()
                    .for_each(|r| println!("{}", render::sentiment_result(r)));
            }
        }
        RecordKind::FakeNews => {
            let articles = query.list_fake_news_articles().await?;
            info!("Found {} fake news articles", articles.len());
            if json_output {
                print_json(&articles)?;
            } else {
                articles
                    .iter()
                    .for_each(|a| println!("{}", render::fake_news_article(a)));
            }
        }
    }
    Ok(())
}

async fn random(query: &QueryService, kind: RecordKind, json_output: bool) -> Result<()> {
    let rendered = match kind {
        RecordKind::Sentiment => {
            let result = query.get_random_sentiment_result().await?;
            if json_output {
                return print_json(&result);
            }
            result.as_ref().map(render::sentiment_result)
        }
        RecordKind::FakeNews => {
            let article = query.get_random_fake_news_article().await?;
            if json_output {
                return print_json(&article);
            }
            article.as_ref().map(render::fake_news_article)
        }
    };

    match rendered {
        Some(text) => println!("{}", text),
        None => println!("(collection is empty)"),
    }
    Ok(())
}

async fn dashboard(query: &QueryService, json_output: bool) -> Result<()> {
    let results = query.list_sentiment_results().await?;
    let summary = SentimentSummary::from_results(&results);

    if json_output {
        print_json(&summary)?;
    } else {
        println!("{}", render::dashboard(&summary));
    }
    Ok(())
}

fn chat(message: &str, json_output: bool) -> Result<()> {
    let mut conversation = Conversation::default();
    let reply = conversation.send(message)?.content.clone();

    if json_output {
        print_json(&conversation.messages())?;
    } else {
        println!("{}", reply);
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_random_with_seed() {
        let cli = Cli::parse_from(["marketmood", "random", "fake-news", "--seed", "7", "--store", "memory"]);
        assert!(matches!(cli.store, Some(StoreBackend::Memory)));
        match cli.command {
            Commands::Random { kind, seed } => {
                assert!(matches!(kind, RecordKind::FakeNews));
                assert_eq!(seed, Some(7));
            }
            _ => panic!("expected random"),
        }
    }

    #[test]
    fn test_chat_requires_message() {
        assert!(Cli::try_parse_from(["marketmood", "chat"]).is_err());
    }

    #[tokio::test]
    async fn test_memory_store_flow() {
        let store = open_store(&StoreConfig {
            backend: StoreBackend::Memory,
            path: PathBuf::from("unused"),
        })
        .unwrap();
        let seeder = SeedService::new(store.clone(), marketmood_formats::embedded().unwrap());

        let report = seeder.ensure_seeded().await.unwrap();
        assert_eq!(report.written(), 6);

        let query = QueryService::new(store);
        assert_eq!(query.list_sentiment_results().await.unwrap().len(), 3);
        assert!(query.get_random_fake_news_article().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_sled_store_flow() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = StoreConfig {
            backend: StoreBackend::Sled,
            path: dir.path().join("db"),
        };
        {
            let store = open_store(&config).unwrap();
            SeedService::new(store.clone(), marketmood_formats::embedded().unwrap())
                .ensure_seeded()
                .await
                .unwrap();
            store.flush().await.unwrap();
        }

        let store = open_store(&config).unwrap();
        let report = SeedService::new(store, marketmood_formats::embedded().unwrap())
            .ensure_seeded()
            .await
            .unwrap();
        assert_eq!(report.written(), 0);
        assert!(report.sentiment_results.skipped);
    }

    #[test]
    fn test_chat_replies() {
        assert!(chat("what is an etf", false).is_ok());
        assert!(chat("   ", false).is_err());
    }
}
