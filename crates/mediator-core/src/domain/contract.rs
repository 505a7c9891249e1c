//! Type identities used as registry and container keys.
//!
//! # Phantom Type パターン
//! `TypeIdentity<K>` は `TypeId` と型名を持つ共通実装で、
//! `K` はマーカー型（実行時には使わない）です。
//! `RequestType` と `ResponseType` は同じ表現を持ちますが、
//! 異なる型なので混同できません。

use std::any::{TypeId, type_name};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Marker trait for identity kinds.
pub trait IdentityKind: Send + Sync + 'static {
    /// Prefix used by `Debug` (e.g. "request", "response").
    fn label() -> &'static str;
}

/// Marker for request type identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {}

impl IdentityKind for RequestKind {
    fn label() -> &'static str {
        "request"
    }
}

/// Marker for response type identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseKind {}

impl IdentityKind for ResponseKind {
    fn label() -> &'static str {
        "response"
    }
}

/// A comparable identity for a concrete Rust type.
///
/// Equality and hashing follow `TypeId` only; the name is kept for messages.
pub struct TypeIdentity<K: IdentityKind> {
    id: TypeId,
    name: &'static str,
    _kind: PhantomData<K>,
}

/// Identity of a request's concrete type (registry key).
pub type RequestType = TypeIdentity<RequestKind>;

/// Identity of a handler's result type.
pub type ResponseType = TypeIdentity<ResponseKind>;

impl<K: IdentityKind> TypeIdentity<K> {
    pub fn of<T: ?Sized + 'static>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            _kind: PhantomData,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name, e.g. `mediator_core::features::GetUserQuery`.
    pub fn type_name(&self) -> &'static str {
        self.name
    }

    /// Last path segment of the type name.
    pub fn short_name(&self) -> &'static str {
        let path = self.name.split('<').next().unwrap_or(self.name);
        let start = path.rfind("::").map(|i| i + 2).unwrap_or(0);
        &self.name[start..]
    }
}

impl<K: IdentityKind> Clone for TypeIdentity<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: IdentityKind> Copy for TypeIdentity<K> {}

impl<K: IdentityKind> PartialEq for TypeIdentity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<K: IdentityKind> Eq for TypeIdentity<K> {}

impl<K: IdentityKind> Hash for TypeIdentity<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<K: IdentityKind> fmt::Debug for TypeIdentity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", K::label(), self.name)
    }
}

impl<K: IdentityKind> fmt::Display for TypeIdentity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// The handler-contract identity `RequestHandler<Req, Resp>`.
///
/// This is what the service container is keyed by. The precompiled path
/// builds it statically with [`HandlerContract::of`]; the dynamic path builds
/// it at call time from the request's runtime type with [`HandlerContract::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerContract {
    request: RequestType,
    response: ResponseType,
}

impl HandlerContract {
    pub fn new(request: RequestType, response: ResponseType) -> Self {
        Self { request, response }
    }

    pub fn of<R: crate::typed::Request>() -> Self {
        Self::new(RequestType::of::<R>(), ResponseType::of::<R::Response>())
    }

    pub fn request(&self) -> RequestType {
        self.request
    }

    pub fn response(&self) -> ResponseType {
        self.response
    }
}

impl fmt::Display for HandlerContract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestHandler<{}, {}>", self.request, self.response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Ping;
    struct Pong;

    mod nested {
        pub struct Wrapper<T>(pub T);
    }

    #[test]
    fn same_type_yields_equal_identity() {
        assert_eq!(RequestType::of::<Ping>(), RequestType::of::<Ping>());

        let mut set = HashSet::new();
        set.insert(RequestType::of::<Ping>());
        assert!(set.contains(&RequestType::of::<Ping>()));
    }

    #[test]
    fn distinct_types_yield_distinct_identities() {
        assert_ne!(RequestType::of::<Ping>(), RequestType::of::<Pong>());
    }

    #[test]
    fn short_name_strips_module_path() {
        assert_eq!(RequestType::of::<Ping>().short_name(), "Ping");
        assert_eq!(
            ResponseType::of::<nested::Wrapper<Pong>>().short_name(),
            "Wrapper<mediator_core::domain::contract::tests::Pong>"
        );
    }

    #[test]
    fn contract_display_names_both_sides() {
        let contract = HandlerContract::new(RequestType::of::<Ping>(), ResponseType::of::<Pong>());
        assert_eq!(contract.to_string(), "RequestHandler<Ping, Pong>");
        assert_eq!(contract.request(), RequestType::of::<Ping>());
        assert_eq!(contract.response(), ResponseType::of::<Pong>());
    }

    #[test]
    fn debug_carries_kind_label() {
        let dbg = format!("{:?}", RequestType::of::<Ping>());
        assert!(dbg.starts_with("request("));
        assert!(dbg.ends_with("Ping)"));
    }
}
