//! Errors - dispatch と登録のエラー型
//!
//! # 分類
//! - `MediatorError`: dispatch 呼び出しの失敗（すべて設定ミスか handler 自身のエラー）
//! - `RegistryError`: 起動時の登録エラー（二重登録）
//!
//! dispatch 層はリトライも握りつぶしもしない。失敗はそのまま呼び出し元へ返す。

use thiserror::Error;

use super::contract::{HandlerContract, RequestType, ResponseType};

#[derive(Debug, Error)]
pub enum MediatorError {
    /// No registry entry or container instance for the request.
    ///
    /// `contract` is set when the failure came from the container (the
    /// dynamic path, or a registry entry whose handler is not in the container).
    #[error("no handler registered for {request}{}", contract_suffix(.contract))]
    HandlerNotRegistered {
        request: RequestType,
        contract: Option<HandlerContract>,
    },

    /// A resolved instance does not expose the execute operation of its contract.
    #[error("handler resolved for {contract} violates its contract: {reason}")]
    HandlerContractViolation {
        contract: HandlerContract,
        reason: &'static str,
    },

    /// The handler's value cannot be narrowed to the caller's expected type.
    #[error("handler result type mismatch: expected {expected}, got {actual}")]
    ResultTypeMismatch {
        expected: ResponseType,
        actual: ResponseType,
    },

    /// Error raised by the handler itself, passed through untouched.
    #[error(transparent)]
    Handler(anyhow::Error),
}

impl MediatorError {
    pub fn not_registered(request: RequestType) -> Self {
        Self::HandlerNotRegistered {
            request,
            contract: None,
        }
    }

    pub fn not_in_container(contract: HandlerContract) -> Self {
        Self::HandlerNotRegistered {
            request: contract.request(),
            contract: Some(contract),
        }
    }

    pub fn contract_violation(contract: HandlerContract, reason: &'static str) -> Self {
        Self::HandlerContractViolation { contract, reason }
    }

    /// Request type carried by `HandlerNotRegistered`, if that is the variant.
    pub fn unregistered_request(&self) -> Option<RequestType> {
        match self {
            Self::HandlerNotRegistered { request, .. } => Some(*request),
            _ => None,
        }
    }
}

fn contract_suffix(contract: &Option<HandlerContract>) -> String {
    contract
        .map(|c| format!(" (contract {c})"))
        .unwrap_or_default()
}

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("handler for request type {0} is already registered")]
    AlreadyRegistered(RequestType),

    #[error("service for {0} is already registered")]
    ServiceAlreadyRegistered(HandlerContract),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lookup;
    struct Found;

    #[test]
    fn not_registered_message_names_request() {
        let err = MediatorError::not_registered(RequestType::of::<Lookup>());
        assert_eq!(err.to_string(), "no handler registered for Lookup");
        assert_eq!(err.unregistered_request(), Some(RequestType::of::<Lookup>()));
    }

    #[test]
    fn not_in_container_message_names_contract() {
        let contract =
            HandlerContract::new(RequestType::of::<Lookup>(), ResponseType::of::<Found>());
        let err = MediatorError::not_in_container(contract);
        assert_eq!(
            err.to_string(),
            "no handler registered for Lookup (contract RequestHandler<Lookup, Found>)"
        );
    }

    #[test]
    fn handler_error_is_transparent() {
        let err = MediatorError::Handler(anyhow::anyhow!("repository offline"));
        assert_eq!(err.to_string(), "repository offline");
        assert_eq!(err.unregistered_request(), None);
    }
}
