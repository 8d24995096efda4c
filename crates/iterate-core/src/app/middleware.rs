//! IterateMiddleware - middleware チェーンへの組み込み
//!
//! `({dispatch, getState}) => next => action => result` の形をそのまま
//! `handle(api, next, action)` の 1 メソッドにまとめている。
//!
//! # 分岐
//! - `Action::Steps` → drain ループの future を返す
//! - `Action::Plain` → `next` に 1 回だけ渡し、その結果を返す

use futures_util::future::BoxFuture;
use tracing::trace;

use super::drain::drain;
use crate::domain::{Action, IterateError};
use crate::ports::StoreApi;

/// drain ループが返す future
pub type DrainFuture<'a, S, A> = BoxFuture<'a, Result<Option<Action<S, A>>, IterateError>>;

/// Handled は middleware の処理結果
pub enum Handled<'a, S, A, R> {
    /// 素の action を `next` に渡した結果
    Forwarded(R),

    /// ステッピングハンドルの drain。await すると終端ステップの値が返る
    Draining(DrainFuture<'a, S, A>),
}

impl<'a, S, A, R> Handled<'a, S, A, R> {
    pub fn is_forwarded(&self) -> bool {
        matches!(self, Self::Forwarded(_))
    }

    pub fn into_forwarded(self) -> Option<R> {
        match self {
            Self::Forwarded(result) => Some(result),
            Self::Draining(_) => None,
        }
    }

    pub fn into_draining(self) -> Option<DrainFuture<'a, S, A>> {
        match self {
            Self::Forwarded(_) => None,
            Self::Draining(future) => Some(future),
        }
    }
}

/// IterateMiddleware はステッピングハンドルを drain する middleware
///
/// 設定項目はない。[`create_iterator_middleware`] か [`iterate`] で作る。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IterateMiddleware {
    _private: (),
}

impl IterateMiddleware {
    pub fn new() -> Self {
        Self { _private: () }
    }

    /// action を処理する
    ///
    /// 素の action のときは `dispatch` も `get_state` も呼ばない。
    pub fn handle<'a, S, A, R, N>(
        &self,
        api: &'a dyn StoreApi<S, A>,
        next: N,
        action: Action<S, A>,
    ) -> Handled<'a, S, A, R>
    where
        S: Send + 'static,
        A: Send + 'static,
        N: FnOnce(A) -> R,
    {
        trace!(steppable = action.is_steppable(), "handling action");

        match action {
            Action::Steps(steps) => Handled::Draining(Box::pin(drain(steps, api))),
            Action::Plain(action) => Handled::Forwarded(next(action)),
        }
    }
}

/// 引数なしで middleware を作る
pub fn create_iterator_middleware() -> IterateMiddleware {
    IterateMiddleware::new()
}

/// そのまま使える既定のインスタンス
pub fn iterate() -> IterateMiddleware {
    create_iterator_middleware()
}
