use marketmood_core::{DocumentStore, QueryService, SeedService, SledStore, SledStoreConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📈 marketmood seed demo\n");

    let store: Arc<dyn DocumentStore> = match std::env::args().nth(1) {
        Some(path) => {
            println!("Store: sled at {}", path);
            Arc::new(SledStore::open(SledStoreConfig::at(path))?)
        }
        None => {
            println!("Store: temporary sled database");
            Arc::new(SledStore::temporary()?)
        }
    };

    let data = marketmood_formats::embedded()?;
    let seeder = SeedService::new(store.clone(), data);

    for run in 1..=2 {
        let report = seeder.ensure_seeded().await?;
        println!(
            "Run {}: wrote {} sentiment results, {} fake news articles",
            run, report.sentiment_results.written, report.fake_news_articles.written
        );
    }

    let query = QueryService::new(store.clone());
    println!("\n🎲 Five random picks:");
    for _ in 0..5 {
        if let Some(result) = query.get_random_sentiment_result().await? {
            println!("  #{} {} ({:.2})", result.id, result.overall, result.score);
        }
    }

    store.flush().await?;
    Ok(())
}
