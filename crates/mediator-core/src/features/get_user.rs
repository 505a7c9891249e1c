//! `GetUserQuery` とそのハンドラ。
//!
//! リポジトリから id でユーザーを引き、`UserDto` を返す。

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::user_repository::{UserDto, UserRepository};
use crate::typed::{HandlerError, Request, RequestHandler};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GetUserQuery {
    pub id: i32,
}

impl Request for GetUserQuery {
    type Response = UserDto;
}

/// Returned by handlers of this module when the caller cancelled before work started.
#[derive(Debug, thiserror::Error)]
#[error("request was cancelled")]
pub struct Cancelled;

pub struct GetUserQueryHandler {
    repository: Arc<dyn UserRepository>,
}

impl GetUserQueryHandler {
    pub fn new(repository: Arc<dyn UserRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl RequestHandler<GetUserQuery> for GetUserQueryHandler {
    async fn handle(
        &self,
        request: GetUserQuery,
        cancellation: CancellationToken,
    ) -> Result<UserDto, HandlerError> {
        if cancellation.is_cancelled() {
            return Err(Cancelled.into());
        }
        self.repository.get_user_by_id(request.id).await
    }
}
