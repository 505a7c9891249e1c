//! Sample feature wired through the mediator: look up a user by id.

pub mod get_user;
pub mod user_repository;

use std::sync::Arc;

use crate::app::MediatorBuilder;
use crate::domain::RegistryError;

pub use self::get_user::{Cancelled, GetUserQuery, GetUserQueryHandler};
pub use self::user_repository::{InMemoryUserRepository, UserDto, UserRepository};

/// Register every handler of this module.
///
/// The repository is shared (singleton); the handler is rebuilt on every
/// resolve (transient).
pub fn install(
    builder: MediatorBuilder,
    repository: Arc<dyn UserRepository>,
) -> Result<MediatorBuilder, RegistryError> {
    builder.transient_handler::<GetUserQuery, _, _>(move || {
        GetUserQueryHandler::new(Arc::clone(&repository))
    })
}
