//! Command-line front end for the sentilens engine.
//!
//! Usage:
//!
//! ```text
//! sentilens <text> [--remote] [--seed N]
//! ```

use std::env;
use std::error::Error;

use sentilens::api::{AnalysisBundle, Analyzer};
use sentilens::noise::seeded_noise;

fn print_usage() {
    eprintln!("Usage: sentilens <text> [--remote] [--seed N]");
    eprintln!();
    eprintln!("  --remote    query the prediction service (local fallback on failure)");
    eprintln!("  --seed N    pin the random draws for reproducible output");
}

fn print_bundle(bundle: &AnalysisBundle) {
    println!("\n===================================================================");
    println!("  Sentiment Analysis");
    println!("===================================================================\n");

    println!(
        "  Random Forest:  {:<8} ({:.1}%)",
        bundle.random_forest.label,
        bundle.random_forest.confidence * 100.0
    );
    println!(
        "  CNN:            {:<8} ({:.1}%)",
        bundle.cnn.label,
        bundle.cnn.confidence * 100.0
    );
    println!(
        "  Hybrid:         {:<8} ({:.1}%)",
        bundle.hybrid.label,
        bundle.hybrid.confidence * 100.0
    );

    println!("\n  Score distribution:");
    println!("    positive: {:.3}", bundle.hybrid.scores.positive);
    println!("    negative: {:.3}", bundle.hybrid.scores.negative);
    println!("    neutral:  {:.3}", bundle.hybrid.scores.neutral);

    println!(
        "\n  Models {}",
        if bundle.hybrid.agreement {
            "agree"
        } else {
            "disagree"
        }
    );
    println!("  Timestamp: {}", bundle.timestamp);
    println!("\n===================================================================\n");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "sentilens=info".into()),
        )
        .init();

    let mut text: Option<String> = None;
    let mut remote = false;
    let mut seed: Option<u64> = None;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--remote" {
            remote = true;
        } else if arg == "--seed" {
            let value = args.next().ok_or("--seed requires a value")?;
            seed = Some(value.parse()?);
        } else if arg == "--help" || arg == "-h" {
            print_usage();
            return Ok(());
        } else if text.is_none() {
            text = Some(arg);
        } else {
            return Err(format!("unexpected argument: {}", arg).into());
        }
    }

    let text = match text {
        Some(t) => t,
        None => {
            print_usage();
            return Err("missing input text".into());
        }
    };

    let analyzer = Analyzer::new();

    let bundle = if remote {
        analyzer.analyze_remote(&text).await
    } else if let Some(seed) = seed {
        analyzer.analyze_with(&text, &mut seeded_noise(seed))
    } else {
        analyzer.analyze(&text)
    };

    print_bundle(&bundle);
    Ok(())
}
