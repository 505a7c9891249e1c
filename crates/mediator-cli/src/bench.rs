//! Times both dispatch strategies against the same mediator.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use rand::Rng;
use serde::Serialize;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use mediator_core::features::{GetUserQuery, UserDto};
use mediator_core::{DispatchStrategy, Mediator};

use crate::config::BenchConfig;

#[derive(Debug, Clone, Serialize)]
pub struct StrategyReport {
    pub strategy: DispatchStrategy,
    /// First call, cold.
    pub warmup_nanos: u64,
    pub iterations: usize,
    pub sequential_total_micros: u64,
    pub sequential_mean_nanos: u64,
    pub concurrent_tasks: usize,
    pub concurrent_dispatches: usize,
    pub concurrent_total_micros: u64,
    pub sample: UserDto,
}

pub async fn run(
    mediator: &Arc<Mediator>,
    strategy: DispatchStrategy,
    config: &BenchConfig,
    cancellation: &CancellationToken,
) -> anyhow::Result<StrategyReport> {
    let query = GetUserQuery { id: config.user_id };

    let started = Instant::now();
    let sample = mediator
        .send(strategy, query, cancellation.clone())
        .await
        .with_context(|| format!("warm-up via {strategy}"))?;
    let warmup = started.elapsed();

    let started = Instant::now();
    for _ in 0..config.iterations {
        mediator.send(strategy, query, cancellation.clone()).await?;
    }
    let sequential = started.elapsed();

    let (concurrent_dispatches, concurrent) =
        run_concurrent(mediator, strategy, config, cancellation).await?;

    let report = StrategyReport {
        strategy,
        warmup_nanos: nanos(warmup),
        iterations: config.iterations,
        sequential_total_micros: micros(sequential),
        sequential_mean_nanos: nanos(sequential) / config.iterations as u64,
        concurrent_tasks: config.concurrency,
        concurrent_dispatches,
        concurrent_total_micros: micros(concurrent),
        sample,
    };
    tracing::info!(
        %strategy,
        mean_ns = report.sequential_mean_nanos,
        concurrent_us = report.concurrent_total_micros,
        "strategy timed"
    );
    Ok(report)
}

/// Spread `iterations` dispatches with random ids over `concurrency` tasks and
/// check every task got back the id it asked for.
async fn run_concurrent(
    mediator: &Arc<Mediator>,
    strategy: DispatchStrategy,
    config: &BenchConfig,
    cancellation: &CancellationToken,
) -> anyhow::Result<(usize, Duration)> {
    let per_task = config.iterations.div_ceil(config.concurrency);
    let batches: Vec<Vec<i32>> = {
        let mut rng = rand::thread_rng();
        (0..config.concurrency)
            .map(|_| (0..per_task).map(|_| rng.gen_range(1..=1_000)).collect())
            .collect()
    };

    let started = Instant::now();
    let mut tasks = JoinSet::new();
    for ids in batches {
        let mediator = Arc::clone(mediator);
        let token = cancellation.clone();
        tasks.spawn(async move {
            for id in &ids {
                let user = mediator
                    .send(strategy, GetUserQuery { id: *id }, token.clone())
                    .await?;
                if user.id != *id {
                    anyhow::bail!("asked for user {id}, got user {}", user.id);
                }
            }
            Ok::<usize, anyhow::Error>(ids.len())
        });
    }

    let mut dispatched = 0;
    while let Some(joined) = tasks.join_next().await {
        dispatched += joined.context("dispatch task panicked")??;
    }
    Ok((dispatched, started.elapsed()))
}

fn nanos(d: Duration) -> u64 {
    u64::try_from(d.as_nanos()).unwrap_or(u64::MAX)
}

fn micros(d: Duration) -> u64 {
    u64::try_from(d.as_micros()).unwrap_or(u64::MAX)
}
