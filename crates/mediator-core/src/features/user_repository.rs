//! ユーザーの読み取り側ポートとインメモリ実装。

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::typed::HandlerError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
}

impl UserDto {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user_by_id(&self, id: i32) -> Result<UserDto, HandlerError>;
}

/// Answers every lookup with the same name.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    name: String,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::with_name("Towers")
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_user_by_id(&self, id: i32) -> Result<UserDto, HandlerError> {
        Ok(UserDto::new(id, self.name.clone()))
    }
}
