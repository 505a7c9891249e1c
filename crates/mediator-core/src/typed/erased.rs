//! Type-erased request and response values.
//!
//! Both carry a type tag next to the boxed value. Narrowing back to a concrete
//! type checks the tag and returns an error instead of reinterpreting bytes.

use std::any::Any;

use crate::domain::{HandlerContract, MediatorError, RequestType, ResponseType};

use super::request::Request;

pub struct ErasedRequest {
    request_type: RequestType,
    value: Box<dyn Any + Send>,
}

impl ErasedRequest {
    pub fn new<R: Request>(request: R) -> Self {
        Self {
            request_type: RequestType::of::<R>(),
            value: Box::new(request),
        }
    }

    pub fn request_type(&self) -> RequestType {
        self.request_type
    }

    /// Recover the concrete request for a handler of `R`.
    pub fn downcast<R: Request>(self) -> Result<R, MediatorError> {
        let violation = || {
            MediatorError::contract_violation(
                HandlerContract::of::<R>(),
                "request does not match the handler's request type",
            )
        };
        if self.request_type != RequestType::of::<R>() {
            return Err(violation());
        }
        self.value
            .downcast::<R>()
            .map(|boxed| *boxed)
            .map_err(|_| violation())
    }
}

impl std::fmt::Debug for ErasedRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedRequest")
            .field("request_type", &self.request_type)
            .finish_non_exhaustive()
    }
}

pub struct ErasedResponse {
    response_type: ResponseType,
    value: Box<dyn Any + Send>,
}

impl ErasedResponse {
    pub fn new<T: Send + 'static>(value: T) -> Self {
        Self {
            response_type: ResponseType::of::<T>(),
            value: Box::new(value),
        }
    }

    /// Tag of the value actually produced by the handler.
    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }

    /// Narrow to `T`, or fail with `ResultTypeMismatch`.
    pub fn downcast<T: 'static>(self) -> Result<T, MediatorError> {
        let expected = ResponseType::of::<T>();
        let actual = self.response_type;
        let mismatch = || MediatorError::ResultTypeMismatch { expected, actual };
        if actual != expected {
            return Err(mismatch());
        }
        self.value.downcast::<T>().map(|boxed| *boxed).map_err(|_| mismatch())
    }
}

impl std::fmt::Debug for ErasedResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedResponse")
            .field("response_type", &self.response_type)
            .finish_non_exhaustive()
    }
}
