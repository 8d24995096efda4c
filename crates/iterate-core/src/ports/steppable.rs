//! Steppable port - ステッピングハンドルの抽象化
//!
//! 非同期イテレータに相当する。drain ループは 1 ステップずつ `next` を await し、
//! 前のステップが解決するまで次を要求しない。

use async_trait::async_trait;

use crate::domain::{Step, StepError};

/// Steppable は state snapshot を受け取って次のステップを返す
///
/// # 使用例
/// ```ignore
/// struct Countdown(u32);
///
/// #[async_trait]
/// impl Steppable<Counter, CounterAction> for Countdown {
///     async fn next(&mut self, state: Counter) -> Result<Step<Counter, CounterAction>, StepError> {
///         if self.0 == 0 {
///             return Ok(Step::finish());
///         }
///         self.0 -= 1;
///         Ok(Step::plain(CounterAction::Add(-1)))
///     }
/// }
/// ```
#[async_trait]
pub trait Steppable<S, A>: Send {
    async fn next(&mut self, state: S) -> Result<Step<S, A>, StepError>;
}
