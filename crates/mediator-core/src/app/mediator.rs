//! Mediator - dispatch の表面
//!
//! 二つの解決戦略を同じ引数・同じ戻り値で公開する。
//! 呼び出しごとに `DispatchId` 付きの tracing span を張る。

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::Instrument;

use crate::domain::{DispatchId, MediatorError, RequestType};
use crate::impls::{dynamic, precompiled};
use crate::ports::{DispatchStrategy, ServiceResolver};
use crate::typed::{HandlerRegistry, Request};

use super::builder::MediatorBuilder;

/// Routes a request to its single registered handler.
///
/// Holds only shared references (registry and resolver), so one instance can be
/// cloned or shared across any number of concurrent callers.
#[derive(Clone)]
pub struct Mediator {
    registry: Arc<HandlerRegistry>,
    resolver: Arc<dyn ServiceResolver>,
}

impl Mediator {
    pub fn new(registry: Arc<HandlerRegistry>, resolver: Arc<dyn ServiceResolver>) -> Self {
        Self { registry, resolver }
    }

    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn resolver(&self) -> &dyn ServiceResolver {
        self.resolver.as_ref()
    }

    /// Dispatch through the precompiled registry.
    pub async fn send_via_registry<R: Request>(
        &self,
        request: R,
    ) -> Result<R::Response, MediatorError> {
        self.send(DispatchStrategy::Registry, request, CancellationToken::new())
            .await
    }

    pub async fn send_via_registry_with<R: Request>(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> Result<R::Response, MediatorError> {
        self.send(DispatchStrategy::Registry, request, cancellation).await
    }

    /// Dispatch by building the handler contract at call time.
    pub async fn send_via_dynamic_resolution<R: Request>(
        &self,
        request: R,
    ) -> Result<R::Response, MediatorError> {
        self.send(DispatchStrategy::DynamicResolution, request, CancellationToken::new())
            .await
    }

    pub async fn send_via_dynamic_resolution_with<R: Request>(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> Result<R::Response, MediatorError> {
        self.send(DispatchStrategy::DynamicResolution, request, cancellation)
            .await
    }

    /// Dispatch with an explicit strategy.
    ///
    /// The token is handed to the handler unchanged; the mediator itself never
    /// checks it and applies no timeout or retry.
    pub async fn send<R: Request>(
        &self,
        strategy: DispatchStrategy,
        request: R,
        cancellation: CancellationToken,
    ) -> Result<R::Response, MediatorError> {
        let span = tracing::debug_span!(
            "dispatch",
            id = %DispatchId::new(),
            %strategy,
            request = %RequestType::of::<R>(),
        );

        async move {
            let result = match strategy {
                DispatchStrategy::Registry => {
                    precompiled::dispatch(
                        &self.registry,
                        self.resolver.as_ref(),
                        request,
                        cancellation,
                    )
                    .await
                }
                DispatchStrategy::DynamicResolution => {
                    dynamic::dispatch(self.resolver.as_ref(), request, cancellation).await
                }
            };
            if let Err(err) = &result {
                tracing::warn!(error = %err, "dispatch failed");
            }
            result
        }
        .instrument(span)
        .await
    }
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
