//! Handler traits - Request を処理する Handler の定義
//!
//! # 学習ポイント
//! - ジェネリック trait (`RequestHandler<R>`)
//! - Object-safe trait (`DynHandler`)
//! - Type erasure パターン (`TypedHandler<R>` → `DynHandler`)

use std::any::Any;
use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::erased::{ErasedRequest, ErasedResponse};
use super::request::Request;
use crate::domain::{HandlerContract, MediatorError};
use crate::ports::Service;

/// Error type returned by handlers. Passed to the caller unchanged.
pub type HandlerError = anyhow::Error;

/// RequestHandler は Request を処理して result を返す
///
/// # 使用例
/// ```ignore
/// struct GetUserQueryHandler;
///
/// #[async_trait]
/// impl RequestHandler<GetUserQuery> for GetUserQueryHandler {
///     async fn handle(
///         &self,
///         request: GetUserQuery,
///         cancellation: CancellationToken,
///     ) -> Result<UserDto, HandlerError> {
///         Ok(UserDto { id: request.id, name: "Towers".into() })
///     }
/// }
/// ```
///
/// Cancellation is cooperative: the token is forwarded as-is and honoring it
/// is up to the handler.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(
        &self,
        request: R,
        cancellation: CancellationToken,
    ) -> Result<R::Response, HandlerError>;
}

/// DynHandler は object-safe な Handler の抽象化
///
/// 動的解決の経路はこの trait 経由で handler を呼ぶ。
/// request も result も型消去されているので、呼び出し側は結果を自分で narrow する。
#[async_trait]
pub trait DynHandler: Send + Sync {
    async fn handle_dyn(
        &self,
        request: ErasedRequest,
        cancellation: CancellationToken,
    ) -> Result<ErasedResponse, MediatorError>;

    fn contract(&self) -> HandlerContract;
}

/// Container-side wrapper around a `RequestHandler<R>`.
///
/// The precompiled path downcasts a resolved service to this concrete type and
/// calls the typed handler directly; the dynamic path only sees it as a
/// `DynHandler`.
pub struct TypedHandler<R: Request> {
    handler: Arc<dyn RequestHandler<R>>,
}

impl<R: Request> TypedHandler<R> {
    pub fn new<H: RequestHandler<R> + 'static>(handler: H) -> Self {
        Self {
            handler: Arc::new(handler),
        }
    }

    pub fn handler(&self) -> &dyn RequestHandler<R> {
        self.handler.as_ref()
    }
}

#[async_trait]
impl<R: Request> DynHandler for TypedHandler<R> {
    async fn handle_dyn(
        &self,
        request: ErasedRequest,
        cancellation: CancellationToken,
    ) -> Result<ErasedResponse, MediatorError> {
        let request = request.downcast::<R>()?;
        let response = self
            .handler
            .handle(request, cancellation)
            .await
            .map_err(MediatorError::Handler)?;
        Ok(ErasedResponse::new(response))
    }

    fn contract(&self) -> HandlerContract {
        HandlerContract::of::<R>()
    }
}

impl<R: Request> Service for TypedHandler<R> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_handler(&self) -> Option<&dyn DynHandler> {
        Some(self)
    }
}
