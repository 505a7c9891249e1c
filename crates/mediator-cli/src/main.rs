//! mediator-cli - times the registry and dynamic-resolution strategies.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mediator_core::features::{self, GetUserQuery, InMemoryUserRepository, UserRepository};
use mediator_core::{Mediator, RequestType};

mod bench;
mod config;

use bench::StrategyReport;
use config::BenchConfig;

#[derive(Debug, Serialize)]
struct Report {
    generated_at: DateTime<Utc>,
    /// Every strategy produced the same warm-up result.
    results_match: bool,
    strategies: Vec<StrategyReport>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mediator_core=info,mediator_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = BenchConfig::from_env()?;
    tracing::info!(
        iterations = config.iterations,
        concurrency = config.concurrency,
        strategies = ?config.strategies,
        "starting dispatch benchmark"
    );

    // (A) container + registry: repository は singleton, handler は transient
    let repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let mediator = features::install(Mediator::builder(), repository)?
        .expect_requests(&[RequestType::of::<GetUserQuery>()])
        .build()?;
    let mediator = Arc::new(mediator);

    // (B) 戦略ごとに計測
    let cancellation = CancellationToken::new();
    let mut strategies = Vec::with_capacity(config.strategies.len());
    for strategy in &config.strategies {
        strategies.push(bench::run(&mediator, *strategy, &config, &cancellation).await?);
    }

    // (C) 同じ request には同じ結果が返るはず
    let results_match = strategies.windows(2).all(|w| w[0].sample == w[1].sample);
    if !results_match {
        tracing::warn!("strategies returned different results for the same request");
    }

    let report = Report {
        generated_at: Utc::now(),
        results_match,
        strategies,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
