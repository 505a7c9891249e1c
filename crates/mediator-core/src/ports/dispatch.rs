//! DispatchStrategy - request を handler に解決する方法の選択
//!
//! - **Registry**: 起動時に作った `HandlerRegistry` を引く（O(1)、動的な型構築なし）
//! - **DynamicResolution**: 実行時に contract を組み立てて container から解決
//!
//! 両者は登録済みの request に対して同じ結果・同じ失敗を返す。違うのはレイテンシだけ。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DispatchStrategy {
    Registry,
    DynamicResolution,
}

impl DispatchStrategy {
    pub const ALL: [DispatchStrategy; 2] = [Self::Registry, Self::DynamicResolution];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::DynamicResolution => "dynamic_resolution",
        }
    }
}

impl fmt::Display for DispatchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown dispatch strategy '{0}' (expected 'registry' or 'dynamic_resolution')")]
pub struct ParseStrategyError(String);

impl FromStr for DispatchStrategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "registry" | "dictionary" => Ok(Self::Registry),
            "dynamic_resolution" | "dynamic" | "reflection" => Ok(Self::DynamicResolution),
            _ => Err(ParseStrategyError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("registry", DispatchStrategy::Registry)]
    #[case(" Dictionary ", DispatchStrategy::Registry)]
    #[case("dynamic_resolution", DispatchStrategy::DynamicResolution)]
    #[case("reflection", DispatchStrategy::DynamicResolution)]
    fn parses_known_names(#[case] input: &str, #[case] expected: DispatchStrategy) {
        assert_eq!(input.parse::<DispatchStrategy>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_name() {
        let err = "pubsub".parse::<DispatchStrategy>().unwrap_err();
        assert!(err.to_string().contains("pubsub"));
    }

    #[test]
    fn display_matches_serde_name() {
        for strategy in DispatchStrategy::ALL {
            let json = serde_json::to_string(&strategy).unwrap();
            assert_eq!(json, format!("\"{strategy}\""));
        }
    }
}
