//! Precompiled-delegate strategy.
//!
//! Registry lookup by `RequestType`, then a call through the function pointer
//! captured when the registry was built. No contract identity is built at call
//! time. Handlers registered as `TypedHandler<R>` are called through their
//! typed trait; any other service falls back to its `DynHandler`.

use tokio_util::sync::CancellationToken;

use crate::domain::{HandlerContract, MediatorError, RequestType};
use crate::ports::ServiceResolver;
use crate::typed::{
    BoxFuture, ErasedRequest, ErasedResponse, HandlerRegistry, Request, TypedHandler,
};

/// Entry point stored in every `HandlerEntry` for `R`.
pub fn invoke_handler<R: Request>(
    resolver: &dyn ServiceResolver,
    request: ErasedRequest,
    cancellation: CancellationToken,
) -> BoxFuture<'_, Result<ErasedResponse, MediatorError>> {
    Box::pin(async move {
        let contract = HandlerContract::of::<R>();
        let service = resolver
            .resolve(&contract)
            .ok_or_else(|| MediatorError::not_in_container(contract))?;

        let typed = service.as_any().downcast_ref::<TypedHandler<R>>();
        if let Some(handler) = typed {
            let request = request.downcast::<R>()?;
            let response = handler
                .handler()
                .handle(request, cancellation)
                .await
                .map_err(MediatorError::Handler)?;
            return Ok(ErasedResponse::new(response));
        }

        let handler = service.as_handler().ok_or_else(|| {
            MediatorError::contract_violation(
                contract,
                "resolved service does not expose an execute operation",
            )
        })?;
        handler.handle_dyn(request, cancellation).await
    })
}

pub async fn dispatch<R: Request>(
    registry: &HandlerRegistry,
    resolver: &dyn ServiceResolver,
    request: R,
    cancellation: CancellationToken,
) -> Result<R::Response, MediatorError> {
    let request_type = RequestType::of::<R>();
    let entry = registry
        .get(&request_type)
        .ok_or_else(|| MediatorError::not_registered(request_type))?;

    let response = entry
        .invoke(resolver, ErasedRequest::new(request), cancellation)
        .await?;

    // Typed handlers always match; a DynHandler service may not.
    response.downcast::<R::Response>()
}
