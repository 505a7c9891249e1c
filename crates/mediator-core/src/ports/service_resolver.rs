//! ServiceResolver port - contract identity から live instance を解決
//!
//! # Object Safety
//! - `resolve` はジェネリックではない（`HandlerContract` を値として受け取る）
//! - `dyn ServiceResolver` として Mediator に注入できる

use std::any::Any;
use std::sync::Arc;

use crate::domain::HandlerContract;
use crate::typed::DynHandler;

/// An instance held by the container.
///
/// `as_handler` is the lookup of the contract's execute operation: an instance
/// that is not a handler returns `None`.
pub trait Service: Any + Send + Sync {
    fn as_any(&self) -> &dyn Any;

    fn as_handler(&self) -> Option<&dyn DynHandler> {
        None
    }
}

/// Resolves a service instance for a handler contract.
///
/// Must be safe for concurrent use; the mediator calls it from many tasks
/// without synchronization of its own.
pub trait ServiceResolver: Send + Sync {
    fn resolve(&self, contract: &HandlerContract) -> Option<Arc<dyn Service>>;
}

impl<T: ServiceResolver + ?Sized> ServiceResolver for Arc<T> {
    fn resolve(&self, contract: &HandlerContract) -> Option<Arc<dyn Service>> {
        (**self).resolve(contract)
    }
}
