//! Impls - ports の実装と二つの解決戦略
//!
//! # 含まれる実装
//! - **ServiceCollection**: インメモリの DI コンテナ（singleton / transient）
//! - **precompiled**: HandlerRegistry を引く戦略
//! - **dynamic**: 実行時に contract を組み立てる戦略

pub mod dynamic;
pub mod precompiled;
pub mod service_collection;

pub use self::service_collection::{Lifetime, ServiceCollection};
