//! Dynamic-resolution strategy.
//!
//! No registry. Per call:
//! 1. build `RequestHandler<request runtime type, expected response>` as a contract
//! 2. resolve it from the container
//! 3. look up the execute operation (`Service::as_handler`)
//! 4. invoke it with erased arguments and await the erased result
//! 5. narrow the result to the expected type
//!
//! Strictly slower than the precompiled strategy; it exists so the two can be
//! measured against each other.

use tokio_util::sync::CancellationToken;

use crate::domain::{HandlerContract, MediatorError, ResponseType};
use crate::ports::ServiceResolver;
use crate::typed::{ErasedRequest, Request};

pub async fn dispatch<R: Request>(
    resolver: &dyn ServiceResolver,
    request: R,
    cancellation: CancellationToken,
) -> Result<R::Response, MediatorError> {
    let request = ErasedRequest::new(request);
    let contract = HandlerContract::new(
        request.request_type(),
        ResponseType::of::<R::Response>(),
    );

    let service = resolver
        .resolve(&contract)
        .ok_or_else(|| MediatorError::not_in_container(contract))?;

    let handler = service.as_handler().ok_or_else(|| {
        MediatorError::contract_violation(
            contract,
            "resolved service does not expose an execute operation",
        )
    })?;

    // Await first, narrow afterwards: the erased future says nothing about the
    // concrete value it will complete with.
    let response = handler.handle_dyn(request, cancellation).await?;
    response.downcast::<R::Response>()
}
