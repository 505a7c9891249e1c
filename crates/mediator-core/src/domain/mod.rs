//! Domain model (type identities, dispatch ids, errors).

pub mod contract;
pub mod errors;
pub mod ids;

pub use self::contract::{
    HandlerContract, IdentityKind, RequestKind, RequestType, ResponseKind, ResponseType,
    TypeIdentity,
};
pub use self::errors::{MediatorError, RegistryError};
pub use self::ids::DispatchId;
