//! StreamSteps - `Stream` をステッピングハンドルにする
//!
//! 各要素は値付きの継続ステップ、ストリームの終わりは値なしの終端ステップ。
//! `Err` の要素はそのままステッピング失敗になる。state snapshot は使わない。

use async_trait::async_trait;
use futures_util::stream::{BoxStream, Stream, StreamExt};

use crate::domain::{Action, Step, StepError};
use crate::ports::Steppable;

pub struct StreamSteps<St> {
    stream: St,
}

impl<St> StreamSteps<St> {
    pub fn new(stream: St) -> Self {
        Self { stream }
    }
}

impl<'a, S, A> StreamSteps<BoxStream<'a, Result<Action<S, A>, StepError>>> {
    /// `Unpin` でないストリームを box して包む
    pub fn boxed<St>(stream: St) -> Self
    where
        St: Stream<Item = Result<Action<S, A>, StepError>> + Send + 'a,
    {
        Self::new(stream.boxed())
    }
}

#[async_trait]
impl<S, A, St> Steppable<S, A> for StreamSteps<St>
where
    S: Send + 'static,
    A: Send + 'static,
    St: Stream<Item = Result<Action<S, A>, StepError>> + Send + Unpin,
{
    async fn next(&mut self, _state: S) -> Result<Step<S, A>, StepError> {
        match self.stream.next().await {
            Some(Ok(value)) => Ok(Step::yielded(value)),
            Some(Err(err)) => Err(err),
            None => Ok(Step::finish()),
        }
    }
}
