//! mediator-core
//!
//! In-process request dispatch: a caller sends a typed request, the mediator
//! finds the single handler registered for it and returns the typed result.
//!
//! # モジュール構成
//! - **domain**: 型識別子（RequestType, ResponseType, HandlerContract）, DispatchId, エラー型
//! - **typed**: 型付き API（Request, RequestHandler<R>）, 型消去レイヤー, HandlerRegistry
//! - **ports**: 抽象化レイヤー（ServiceResolver, Service, DispatchStrategy）
//! - **impls**: 実装（ServiceCollection, precompiled / dynamic の二つの解決戦略）
//! - **app**: Mediator と MediatorBuilder
//! - **features**: サンプル機能（GetUserQuery）
//!
//! # 二つの解決戦略
//! - **Registry**: 起動時に構築した関数テーブルを引くだけ（速い）
//! - **DynamicResolution**: 実行時に contract を組み立てて container から解決（遅いが登録表が不要）

pub mod domain;
pub mod typed;
pub mod ports;
pub mod impls;
pub mod app;
pub mod features;

pub use self::app::{BuildError, Mediator, MediatorBuilder};
pub use self::domain::{HandlerContract, MediatorError, RegistryError, RequestType, ResponseType};
pub use self::ports::{DispatchStrategy, Service, ServiceResolver};
pub use self::typed::{HandlerError, HandlerRegistry, Request, RequestHandler};

pub use tokio_util::sync::CancellationToken;
