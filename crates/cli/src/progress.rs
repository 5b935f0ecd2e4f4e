//! Progress reporting for seeding runs

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use marketmood_core::{Collection, CollectionSeed, SeedObserver, SeedReport};

/// Progress bar fed by the seed service, one collection at a time
pub struct SeedProgress {
    bar: ProgressBar,
}

impl SeedProgress {
    pub fn new() -> Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
                .progress_chars("█▓▒░-"),
        );
        Ok(Self { bar })
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl SeedObserver for SeedProgress {
    fn on_start(&self, collection: Collection, total: usize) {
        self.bar.set_length(total as u64);
        self.bar.set_position(0);
        self.bar.set_message(format!("seeding {}", collection));
    }

    fn on_record(&self, _collection: Collection, done: usize) {
        self.bar.set_position(done as u64);
    }

    fn on_finish(&self, collection: Collection, seed: &CollectionSeed) {
        self.bar.println(format!("  {}: {}", collection, describe(seed)));
    }
}

fn describe(seed: &CollectionSeed) -> String {
    if seed.skipped {
        format!(
            "already seeded ({} documents)",
            format_with_commas(seed.existing)
        )
    } else if seed.already_present > 0 {
        format!(
            "wrote {}, {} already present",
            format_with_commas(seed.written),
            format_with_commas(seed.already_present)
        )
    } else {
        format!("wrote {}", format_with_commas(seed.written))
    }
}

/// Print a formatted seed report
pub fn print_seed_report(backend: &str, report: &SeedReport) {
    println!("\n{}", "═".repeat(60));
    println!("Seed-and-Sync Complete");
    println!("{}", "═".repeat(60));
    println!("Store backend:      {}", backend);
    println!(
        "Sentiment results:  {}",
        describe(&report.sentiment_results)
    );
    println!(
        "Fake news articles: {}",
        describe(&report.fake_news_articles)
    );
    println!(
        "Documents written:  {}",
        format_with_commas(report.written())
    );
    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
pub fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
