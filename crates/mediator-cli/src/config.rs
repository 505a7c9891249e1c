//! Harness configuration, read from the environment.

use std::fmt::Display;
use std::str::FromStr;

use anyhow::Context;
use mediator_core::DispatchStrategy;

#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Sequential dispatches timed per strategy.
    pub iterations: usize,
    /// Tokio tasks used for the concurrent batch.
    pub concurrency: usize,
    pub strategies: Vec<DispatchStrategy>,
    /// Id sent in the warm-up and sequential runs.
    pub user_id: i32,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            concurrency: 8,
            strategies: DispatchStrategy::ALL.to_vec(),
            user_id: 1,
        }
    }
}

impl BenchConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let iterations = parse_or(&lookup, "MEDIATOR_ITERATIONS", defaults.iterations)?;
        let concurrency = parse_or(&lookup, "MEDIATOR_CONCURRENCY", defaults.concurrency)?;
        let user_id = parse_or(&lookup, "MEDIATOR_USER_ID", defaults.user_id)?;
        let strategies = match lookup("MEDIATOR_STRATEGIES") {
            Some(raw) => raw
                .split(',')
                .filter(|s| !s.trim().is_empty())
                .map(DispatchStrategy::from_str)
                .collect::<Result<Vec<_>, _>>()
                .context("MEDIATOR_STRATEGIES")?,
            None => defaults.strategies,
        };

        if iterations == 0 {
            anyhow::bail!("MEDIATOR_ITERATIONS must be greater than zero");
        }
        if concurrency == 0 {
            anyhow::bail!("MEDIATOR_CONCURRENCY must be greater than zero");
        }
        if strategies.is_empty() {
            anyhow::bail!("MEDIATOR_STRATEGIES must name at least one strategy");
        }

        Ok(Self {
            iterations,
            concurrency,
            strategies,
            user_id,
        })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid {name}={raw:?}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = BenchConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, BenchConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = BenchConfig::from_lookup(lookup_from(&[
            ("MEDIATOR_ITERATIONS", "500"),
            ("MEDIATOR_CONCURRENCY", "2"),
            ("MEDIATOR_STRATEGIES", "dynamic_resolution"),
            ("MEDIATOR_USER_ID", "42"),
        ]))
        .unwrap();
        assert_eq!(config.iterations, 500);
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.strategies, vec![DispatchStrategy::DynamicResolution]);
        assert_eq!(config.user_id, 42);
    }

    #[test]
    fn rejects_bad_number() {
        let err = BenchConfig::from_lookup(lookup_from(&[("MEDIATOR_ITERATIONS", "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains("MEDIATOR_ITERATIONS"));
    }

    #[test]
    fn rejects_unknown_strategy() {
        let lookup = lookup_from(&[("MEDIATOR_STRATEGIES", "registry,pubsub")]);
        let err = BenchConfig::from_lookup(lookup).unwrap_err();
        assert!(format!("{err:#}").contains("pubsub"));
    }

    #[test]
    fn rejects_zero_concurrency() {
        assert!(BenchConfig::from_lookup(lookup_from(&[("MEDIATOR_CONCURRENCY", "0")])).is_err());
    }
}
