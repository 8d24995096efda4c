//! iterate-core
//!
//! ステッピングハンドル（非同期イテレータ）を action として受け付ける store middleware。
//!
//! # モジュール構成
//! - **domain**: Action, Step, エラー型
//! - **ports**: Steppable（ハンドル）, StoreApi（`dispatch` / `get_state`）
//! - **app**: drain ループと middleware 本体
//! - **impls**: ハンドルのアダプタと最小ホスト store
//!
//! # 使用例
//! ```ignore
//! let middleware = iterate();
//! match middleware.handle(&store, |action| reducer(action), action) {
//!     Handled::Forwarded(result) => result,
//!     Handled::Draining(drain) => drain.await?,
//! }
//! ```

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
mod testing;

pub use app::{Handled, IterateMiddleware, create_iterator_middleware, drain, iterate};
pub use domain::{Action, BoxSteps, IterateError, RawStep, Step, StepError};
pub use ports::{Steppable, StoreApi};
