use st_sentiment::{Pipeline, PipelineConfig};

const SAMPLE: &[(&str, &str)] = &[
    ("$AAPL breaking out, target $190 by friday", "bullish"),
    ("@chartguy agreed, loading more $AAPL calls", "bullish"),
    ("$TSLA down 4% premarket, not touching it", "bearish"),
    ("Sold half at 12.5$ https://t.co/abc", "bearish"),
    ("buy the dip &amp; hold $SPY", "bullish"),
    ("🚀🚀🚀", "bullish"),
    ("earnings miss, guidance cut to 300k units", "bearish"),
    ("$NVDA still the leader, adding on any pullback", "bullish"),
    ("@bears_r_us this is going to $0", "bearish"),
    ("long $AMD at $101.50 with a tight stop", "bullish"),
    ("flat today, watching volume", "neutral"),
    ("$QQQ 2 red days in a row, careful", "bearish"),
];

fn main() -> st_sentiment::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("st_sentiment=debug")),
        )
        .init();

    let config = PipelineConfig {
        seq_len: 8,
        batch_size: 3,
        ..PipelineConfig::default()
    }
    .with_seed(42);
    let prepared = Pipeline::new(config)?.prepare(SAMPLE)?;

    println!("vocabulary size: {}", prepared.vocab.len());
    println!(
        "train/val/test: {}/{}/{}",
        prepared.splits.train.len(),
        prepared.splits.val.len(),
        prepared.splits.test.len()
    );
    for (i, (x, y)) in prepared.train_batches().enumerate() {
        println!("batch {i}:");
        for (row, label) in x.iter().zip(y) {
            println!("  {label} {:?} {:?}", row, prepared.vocab.decode(row)?);
        }
    }
    Ok(())
}
