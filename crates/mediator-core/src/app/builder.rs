//! MediatorBuilder - 起動時のワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）
//! - container 登録と registry 登録を一か所で行う（登録漏れを防ぐ）

use std::sync::Arc;

use crate::domain::{HandlerContract, RegistryError, RequestType};
use crate::impls::ServiceCollection;
use crate::ports::Service;
use crate::typed::{HandlerRegistry, HandlerRegistryBuilder, Request, RequestHandler};

use super::mediator::Mediator;

/// MediatorBuilder は Mediator を構築
///
/// # 使用例
/// ```ignore
/// let mediator = MediatorBuilder::new()
///     .handler::<GetUserQuery, _>(GetUserQueryHandler::new(repository))?
///     .expect_requests(&[RequestType::of::<GetUserQuery>()])
///     .build()?;
/// ```
///
/// # Fail-fast 設計
/// - expect_requests() で期待される request 型を登録
/// - build() 時に「期待集合 ⊆ registry 登録済み集合」をチェック
/// - registry の各 entry が container で解決できるかもチェック
pub struct MediatorBuilder {
    services: ServiceCollection,
    registry: HandlerRegistryBuilder,
    expected_requests: Option<Vec<RequestType>>,
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing request types: {0:?}. These requests were expected but not registered.")]
    MissingRequestTypes(Vec<RequestType>),

    #[error("Registry entries without a container registration: {0:?}")]
    UnresolvableEntries(Vec<HandlerContract>),
}

impl MediatorBuilder {
    pub fn new() -> Self {
        Self {
            services: ServiceCollection::new(),
            registry: HandlerRegistry::builder(),
            expected_requests: None,
        }
    }

    /// Singleton handler, reachable through both strategies.
    pub fn handler<R, H>(mut self, handler: H) -> Result<Self, RegistryError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        self.services.add_singleton::<R, H>(handler)?;
        self.registry = self.registry.register::<R>()?;
        Ok(self)
    }

    /// Transient handler (built on every resolve), reachable through both strategies.
    pub fn transient_handler<R, H, F>(mut self, factory: F) -> Result<Self, RegistryError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        self.services.add_transient::<R, H, F>(factory)?;
        self.registry = self.registry.register::<R>()?;
        Ok(self)
    }

    /// Container-only handler: reachable through dynamic resolution only.
    pub fn dynamic_handler<R, H>(mut self, handler: H) -> Result<Self, RegistryError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        self.services.add_singleton::<R, H>(handler)?;
        Ok(self)
    }

    /// Raw container registration under an explicit contract.
    pub fn service(
        mut self,
        contract: HandlerContract,
        service: Arc<dyn Service>,
    ) -> Result<Self, RegistryError> {
        self.services.add_service(contract, service)?;
        Ok(self)
    }

    /// Registry-only entry. `build()` rejects it unless the container also
    /// has the contract.
    pub fn registry_entry<R: Request>(mut self) -> Result<Self, RegistryError> {
        self.registry = self.registry.register::<R>()?;
        Ok(self)
    }

    pub fn expect_requests(mut self, request_types: &[RequestType]) -> Self {
        self.expected_requests = Some(request_types.to_vec());
        self
    }

    /// # 検証
    /// - expect_requests() で設定された型が全て registry にあるか
    /// - registry の entry が全て container で解決できるか
    pub fn build(self) -> Result<Mediator, BuildError> {
        if let Some(expected) = &self.expected_requests {
            let missing: Vec<RequestType> = expected
                .iter()
                .filter(|t| !self.registry.contains(t))
                .copied()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingRequestTypes(missing));
            }
        }

        let registry = self.registry.build();
        let unresolvable: Vec<HandlerContract> = registry
            .entries()
            .map(|(_, entry)| entry.contract())
            .filter(|contract| !self.services.contains(contract))
            .collect();
        if !unresolvable.is_empty() {
            return Err(BuildError::UnresolvableEntries(unresolvable));
        }

        tracing::info!(
            registry_entries = registry.len(),
            services = self.services.len(),
            "mediator built"
        );
        Ok(Mediator::new(Arc::new(registry), Arc::new(self.services)))
    }
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
