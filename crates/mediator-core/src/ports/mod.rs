//! Ports - 外部コラボレーターとの境界
//!
//! dispatch 層が外部（DI コンテナ）に要求するのは `ServiceResolver::resolve` だけ。
//! lifetime（singleton / transient）はコンテナ側の関心事。

pub mod dispatch;
pub mod service_resolver;

pub use self::dispatch::{DispatchStrategy, ParseStrategyError};
pub use self::service_resolver::{Service, ServiceResolver};
