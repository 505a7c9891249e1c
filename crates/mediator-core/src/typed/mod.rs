//! Typed - 型付き Request API と型消去レイヤー
//!
//! # 二層構造
//! - **表層（Typed）**: `Request` trait, `RequestHandler<R>` trait - 型安全
//! - **内部（Dyn）**: `DynHandler`, `ErasedRequest`, `ErasedResponse` - object-safe, type erasure
//!
//! `HandlerRegistry` は表層の型から起動時に関数ポインタを作って保持する。

pub mod erased;
pub mod handler;
pub mod registry;
pub mod request;

use std::future::Future;
use std::pin::Pin;

pub use self::erased::{ErasedRequest, ErasedResponse};
pub use self::handler::{DynHandler, HandlerError, RequestHandler, TypedHandler};
pub use self::registry::{HandlerEntry, HandlerFn, HandlerRegistry, HandlerRegistryBuilder};
pub use self::request::Request;

/// Boxed, sendable future.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
