//! App - Mediator とその構築
//!
//! # 主要コンポーネント
//! - **Mediator**: 二つの解決戦略を公開する dispatch の表面
//! - **MediatorBuilder**: 起動時のワイヤリングと検証（Fail-fast）

pub mod builder;
pub mod mediator;

pub use self::builder::{BuildError, MediatorBuilder};
pub use self::mediator::Mediator;
