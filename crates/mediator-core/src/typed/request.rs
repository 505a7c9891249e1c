//! Request trait - request と result 型の対応付け
//!
//! # Trait Bounds
//! - `Send`: dispatch 中にスレッドをまたいで運ばれるため
//! - `'static`: `Box<dyn Any>` に型消去するため（参照を持たない）

/// A request value, statically tied to exactly one result type.
///
/// The request's identity is always `RequestType::of::<Self>()`; there is no
/// per-type hook to change it.
///
/// # 使用例
/// ```ignore
/// struct GetUserQuery {
///     id: i32,
/// }
///
/// impl Request for GetUserQuery {
///     type Response = UserDto;
/// }
/// ```
pub trait Request: Send + 'static {
    type Response: Send + 'static;
}
