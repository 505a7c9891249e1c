//! HandlerRegistry - request type → 事前コンパイル済み呼び出し関数
//!
//! # 学習ポイント
//! - 単相化（monomorphization）された関数ポインタを「事前コンパイル済みデリゲート」として保持
//! - 構築時は可変（builder）、実行時は不変（ロック不要で並行読み取り可能）
//! - 新しい request 型を追加するには entry を一つ足す（自動探索はしない）

use std::collections::HashMap;

use tokio_util::sync::CancellationToken;

use super::BoxFuture;
use super::erased::{ErasedRequest, ErasedResponse};
use super::request::Request;
use crate::domain::{HandlerContract, MediatorError, RegistryError, RequestType};
use crate::impls::precompiled;
use crate::ports::ServiceResolver;

/// Invocation closure captured at registry-build time.
///
/// Resolves the handler instance from the resolver, runs it, and returns the
/// result erased.
pub type HandlerFn = for<'a> fn(
    &'a dyn ServiceResolver,
    ErasedRequest,
    CancellationToken,
) -> BoxFuture<'a, Result<ErasedResponse, MediatorError>>;

#[derive(Clone, Copy)]
pub struct HandlerEntry {
    contract: HandlerContract,
    invoke: HandlerFn,
}

impl HandlerEntry {
    pub fn of<R: Request>() -> Self {
        Self {
            contract: HandlerContract::of::<R>(),
            invoke: precompiled::invoke_handler::<R>,
        }
    }

    /// Contract the entry resolves from the container on every call.
    pub fn contract(&self) -> HandlerContract {
        self.contract
    }

    pub fn invoke<'a>(
        &self,
        resolver: &'a dyn ServiceResolver,
        request: ErasedRequest,
        cancellation: CancellationToken,
    ) -> BoxFuture<'a, Result<ErasedResponse, MediatorError>> {
        (self.invoke)(resolver, request, cancellation)
    }
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("contract", &self.contract)
            .finish_non_exhaustive()
    }
}

/// Builder for [`HandlerRegistry`].
///
/// # 使用例
/// ```ignore
/// let registry = HandlerRegistry::builder()
///     .register::<GetUserQuery>()?
///     .build();
/// ```
#[derive(Debug, Default)]
pub struct HandlerRegistryBuilder {
    entries: HashMap<RequestType, HandlerEntry>,
}

impl HandlerRegistryBuilder {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn register<R: Request>(mut self) -> Result<Self, RegistryError> {
        self.insert(RequestType::of::<R>(), HandlerEntry::of::<R>())?;
        Ok(self)
    }

    /// Insert a prepared entry under an explicit key.
    pub fn insert(
        &mut self,
        request_type: RequestType,
        entry: HandlerEntry,
    ) -> Result<(), RegistryError> {
        if self.entries.contains_key(&request_type) {
            return Err(RegistryError::AlreadyRegistered(request_type));
        }
        self.entries.insert(request_type, entry);
        Ok(())
    }

    pub fn contains(&self, request_type: &RequestType) -> bool {
        self.entries.contains_key(request_type)
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            entries: self.entries,
        }
    }
}

/// Write-once, read-many map from request type to [`HandlerEntry`].
///
/// There is no API to mutate a built registry, so it can be shared behind an
/// `Arc` and read concurrently without locks.
#[derive(Debug, Default)]
pub struct HandlerRegistry {
    entries: HashMap<RequestType, HandlerEntry>,
}

impl HandlerRegistry {
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::new()
    }

    /// An empty registry. Every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn get(&self, request_type: &RequestType) -> Option<&HandlerEntry> {
        self.entries.get(request_type)
    }

    pub fn contains(&self, request_type: &RequestType) -> bool {
        self.entries.contains_key(request_type)
    }

    pub fn registered_types(&self) -> Vec<RequestType> {
        self.entries.keys().copied().collect()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&RequestType, &HandlerEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impls::ServiceCollection;
    use crate::typed::{HandlerError, RequestHandler};
    use async_trait::async_trait;

    struct Square(u32);

    impl Request for Square {
        type Response = u32;
    }

    struct Negate(i32);

    impl Request for Negate {
        type Response = i32;
    }

    struct SquareHandler;

    #[async_trait]
    impl RequestHandler<Square> for SquareHandler {
        async fn handle(
            &self,
            request: Square,
            _cancellation: CancellationToken,
        ) -> Result<u32, HandlerError> {
            Ok(request.0 * request.0)
        }
    }

    #[test]
    fn register_and_get() {
        let registry = HandlerRegistry::builder().register::<Square>().unwrap().build();

        let entry = registry.get(&RequestType::of::<Square>());
        assert!(entry.is_some());
        assert_eq!(entry.unwrap().contract(), HandlerContract::of::<Square>());
        assert!(registry.get(&RequestType::of::<Negate>()).is_none());
    }

    #[test]
    fn double_registration_is_rejected() {
        let result = HandlerRegistry::builder()
            .register::<Square>()
            .unwrap()
            .register::<Square>();
        assert!(matches!(
            result,
            Err(RegistryError::AlreadyRegistered(t)) if t == RequestType::of::<Square>()
        ));
    }

    #[test]
    fn registered_types_lists_every_entry() {
        let registry = HandlerRegistry::builder()
            .register::<Square>()
            .unwrap()
            .register::<Negate>()
            .unwrap()
            .build();

        let mut types = registry.registered_types();
        types.sort_by_key(|t| t.type_name());
        assert_eq!(types.len(), 2);
        assert!(types.contains(&RequestType::of::<Square>()));
        assert!(types.contains(&RequestType::of::<Negate>()));
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_empty());
    }

    #[test]
    fn empty_registry_misses_everything() {
        let registry = HandlerRegistry::empty();
        assert!(registry.is_empty());
        assert!(!registry.contains(&RequestType::of::<Square>()));
    }

    #[tokio::test]
    async fn repeated_lookups_invoke_equivalently() {
        let mut services = ServiceCollection::new();
        services.add_singleton::<Square, _>(SquareHandler).unwrap();
        let registry = HandlerRegistry::builder().register::<Square>().unwrap().build();

        let mut results = Vec::new();
        for _ in 0..3 {
            let entry = registry.get(&RequestType::of::<Square>()).unwrap();
            let response = entry
                .invoke(
                    &services,
                    ErasedRequest::new(Square(7)),
                    CancellationToken::new(),
                )
                .await
                .unwrap();
            results.push(response.downcast::<u32>().unwrap());
        }
        assert_eq!(results, vec![49, 49, 49]);
    }
}
