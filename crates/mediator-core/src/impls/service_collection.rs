//! In-memory service container keyed by handler contract.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::{HandlerContract, RegistryError};
use crate::ports::{Service, ServiceResolver};
use crate::typed::{Request, RequestHandler, TypedHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// One instance shared by every resolve.
    Singleton,
    /// A fresh instance per resolve.
    Transient,
}

type Factory = Arc<dyn Fn() -> Arc<dyn Service> + Send + Sync>;

enum Registration {
    Singleton(Arc<dyn Service>),
    Transient(Factory),
}

impl Registration {
    fn lifetime(&self) -> Lifetime {
        match self {
            Self::Singleton(_) => Lifetime::Singleton,
            Self::Transient(_) => Lifetime::Transient,
        }
    }
}

/// Registrations are made during startup through `&mut self`; once shared
/// behind an `Arc` the collection is only read.
#[derive(Default)]
pub struct ServiceCollection {
    services: HashMap<HandlerContract, Registration>,
}

impl ServiceCollection {
    pub fn new() -> Self {
        Self {
            services: HashMap::new(),
        }
    }

    /// Register one shared handler instance under `RequestHandler<R, R::Response>`.
    pub fn add_singleton<R, H>(&mut self, handler: H) -> Result<(), RegistryError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let service: Arc<dyn Service> = Arc::new(TypedHandler::<R>::new(handler));
        self.insert(HandlerContract::of::<R>(), Registration::Singleton(service))
    }

    /// Register a factory that builds a new handler on every resolve.
    pub fn add_transient<R, H, F>(&mut self, factory: F) -> Result<(), RegistryError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
        F: Fn() -> H + Send + Sync + 'static,
    {
        let factory: Factory = Arc::new(move || {
            let service: Arc<dyn Service> = Arc::new(TypedHandler::<R>::new(factory()));
            service
        });
        self.insert(HandlerContract::of::<R>(), Registration::Transient(factory))
    }

    /// Register an arbitrary instance under an explicit contract.
    pub fn add_service(
        &mut self,
        contract: HandlerContract,
        service: Arc<dyn Service>,
    ) -> Result<(), RegistryError> {
        self.insert(contract, Registration::Singleton(service))
    }

    fn insert(
        &mut self,
        contract: HandlerContract,
        registration: Registration,
    ) -> Result<(), RegistryError> {
        if self.services.contains_key(&contract) {
            return Err(RegistryError::ServiceAlreadyRegistered(contract));
        }
        self.services.insert(contract, registration);
        Ok(())
    }

    pub fn contains(&self, contract: &HandlerContract) -> bool {
        self.services.contains_key(contract)
    }

    pub fn lifetime(&self, contract: &HandlerContract) -> Option<Lifetime> {
        self.services.get(contract).map(Registration::lifetime)
    }

    pub fn contracts(&self) -> Vec<HandlerContract> {
        self.services.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

impl ServiceResolver for ServiceCollection {
    fn resolve(&self, contract: &HandlerContract) -> Option<Arc<dyn Service>> {
        match self.services.get(contract)? {
            Registration::Singleton(service) => Some(Arc::clone(service)),
            Registration::Transient(factory) => Some(factory()),
        }
    }
}

impl std::fmt::Debug for ServiceCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.services.iter().map(|(k, v)| (k, v.lifetime())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::Any;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio_util::sync::CancellationToken;

    use crate::domain::{RequestType, ResponseType};
    use crate::typed::HandlerError;

    struct Greet;

    impl Request for Greet {
        type Response = &'static str;
    }

    struct GreetHandler;

    #[async_trait]
    impl RequestHandler<Greet> for GreetHandler {
        async fn handle(
            &self,
            _request: Greet,
            _cancellation: CancellationToken,
        ) -> Result<&'static str, HandlerError> {
            Ok("hello")
        }
    }

    struct Plain;

    impl Service for Plain {
        fn as_any(&self) -> &dyn Any {
            self
        }
    }

    #[test]
    fn singleton_resolves_same_instance() {
        let mut services = ServiceCollection::new();
        services.add_singleton::<Greet, _>(GreetHandler).unwrap();

        let contract = HandlerContract::of::<Greet>();
        let a = services.resolve(&contract).unwrap();
        let b = services.resolve(&contract).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(services.lifetime(&contract), Some(Lifetime::Singleton));
    }

    #[test]
    fn transient_builds_per_resolve() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);

        let mut services = ServiceCollection::new();
        services
            .add_transient::<Greet, _, _>(move || {
                counter.fetch_add(1, Ordering::SeqCst);
                GreetHandler
            })
            .unwrap();

        let contract = HandlerContract::of::<Greet>();
        let a = services.resolve(&contract).unwrap();
        let b = services.resolve(&contract).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(services.lifetime(&contract), Some(Lifetime::Transient));
    }

    #[test]
    fn unknown_contract_resolves_to_none() {
        let services = ServiceCollection::new();
        assert!(services.resolve(&HandlerContract::of::<Greet>()).is_none());
        assert!(services.is_empty());
    }

    #[test]
    fn duplicate_contract_is_rejected() {
        let mut services = ServiceCollection::new();
        services.add_singleton::<Greet, _>(GreetHandler).unwrap();
        let err = services
            .add_service(HandlerContract::of::<Greet>(), Arc::new(Plain))
            .unwrap_err();
        assert!(matches!(
            err,
            RegistryError::ServiceAlreadyRegistered(c) if c == HandlerContract::of::<Greet>()
        ));
        assert_eq!(services.len(), 1);
    }

    #[test]
    fn raw_service_has_no_execute_operation() {
        let contract = HandlerContract::new(RequestType::of::<Greet>(), ResponseType::of::<u8>());
        let mut services = ServiceCollection::new();
        services.add_service(contract, Arc::new(Plain)).unwrap();

        let service = services.resolve(&contract).unwrap();
        assert!(service.as_handler().is_none());
        assert_eq!(services.contracts(), vec![contract]);
    }
}
