//! pitchcache CLI - browse fixtures and print a full match analysis.
//!
//! Usage:
//!   pitchcache [yesterday|today|tomorrow|YYYY-MM-DD]           list fixtures
//!   pitchcache [yesterday|today|tomorrow|YYYY-MM-DD] <id>      analyze one

use std::io;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pitchcache::analysis::{Analyzer, MatchAnalysis};
use pitchcache::api::ApiClient;
use pitchcache::cache::{CacheManager, FileStore};
use pitchcache::config::Config;
use pitchcache::models::{DateWindow, Fixture};
use pitchcache::narrative::NarrativeGenerator;
use pitchcache::stats::StatsResolver;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn parse_date_arg(arg: Option<&String>) -> Result<NaiveDate> {
    let window = DateWindow::current();
    match arg.map(String::as_str) {
        None | Some("today") => Ok(window.today),
        Some("yesterday") => Ok(window.yesterday),
        Some("tomorrow") => Ok(window.tomorrow),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| anyhow::anyhow!("Invalid date '{}': {}", raw, e)),
    }
}

fn print_fixture_list(fixtures: &[Fixture]) {
    if fixtures.is_empty() {
        println!("No fixtures found.");
        return;
    }
    for fixture in fixtures {
        println!(
            "{:>9}  {:<5} {:>5}  {} vs {}  [{}]",
            fixture.id(),
            fixture.fixture.status.short,
            fixture.kickoff_display(),
            fixture.teams.home.name,
            fixture.teams.away.name,
            fixture.league.name,
        );
    }
}

fn print_analysis(analysis: &MatchAnalysis) {
    let prediction = &analysis.prediction;
    println!(
        "{} vs {}",
        analysis.fixture.teams.home.name, analysis.fixture.teams.away.name
    );
    println!(
        "Prediction: home {} / draw {} / away {}",
        prediction.predictions.percent.home,
        prediction.predictions.percent.draw,
        prediction.predictions.percent.away,
    );
    println!("Advice: {}", prediction.predictions.advice);

    for (label, stats) in [
        ("Home", analysis.home_stats.as_ref()),
        ("Away", analysis.away_stats.as_ref()),
    ] {
        match stats {
            Some(stats) => println!(
                "{} ({}): played {}, W{}-D{}-L{}, goals {}:{}  form {}",
                label,
                stats.team.name,
                stats.matches_played(),
                stats.fixtures.wins.total.unwrap_or(0),
                stats.fixtures.draws.total.unwrap_or(0),
                stats.fixtures.loses.total.unwrap_or(0),
                stats.goals.scored.total.total.unwrap_or(0),
                stats.goals.against.total.total.unwrap_or(0),
                stats.form_display(),
            ),
            None => println!("{}: statistics unavailable", label),
        }
    }

    println!("\nTactical report:\n{}", analysis.narrative.text());

    let h2h = prediction.recent_h2h(3);
    if !h2h.is_empty() {
        println!("\nPrevious encounters:");
        for encounter in h2h {
            println!(
                "  {}  {} {}  {}",
                encounter.fixture.date.format("%Y-%m-%d"),
                encounter.teams.home.name,
                encounter.goals.display(),
                encounter.teams.away.name,
            );
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();
    info!("pitchcache starting");

    let config = Config::load()?;
    let api_key = config
        .football_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("FOOTBALL_API_KEY is not configured"))?;

    let store = Arc::new(FileStore::new(config.cache_dir()?)?);
    let cache = CacheManager::new(store, config.freshness());
    let client = ApiClient::new(api_key, cache.clone())?;
    let narrative = NarrativeGenerator::new(
        config.gemini_api_key.clone(),
        config.gemini_model(),
        cache.clone(),
    )?;
    let analyzer = Analyzer::new(client.clone(), StatsResolver::new(client.clone()), narrative);

    let args: Vec<String> = std::env::args().skip(1).collect();
    let date = parse_date_arg(args.first())?;
    let fixtures = client.fetch_fixtures(date).await;

    match args.get(1).and_then(|raw| raw.parse::<i64>().ok()) {
        Some(fixture_id) => match fixtures.iter().find(|f| f.id() == fixture_id) {
            Some(fixture) => match analyzer.analyze(fixture).await {
                Ok(analysis) => print_analysis(&analysis),
                Err(e) => println!("{}", e),
            },
            None => println!("Fixture {} not found on {}", fixture_id, date),
        },
        None => print_fixture_list(&fixtures),
    }

    info!("pitchcache done");
    Ok(())
}
