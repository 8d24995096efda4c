//! Action - store に投げ込まれる値
//!
//! 素の値（`Plain`）か、ステップを刻むハンドル（`Steps`）のどちらか。
//! 動的な「`next` を持っているか」判定の代わりに、境界で列挙型として区別する。

use std::fmt;

use crate::ports::Steppable;

/// 所有権付きのステッピングハンドル
pub type BoxSteps<S, A> = Box<dyn Steppable<S, A>>;

/// Action は store に dispatch される値
///
/// - `S`: `get_state` が返す state snapshot の型
/// - `A`: reducer が扱う素の action の型
pub enum Action<S, A> {
    /// 通常の action。middleware チェーンをそのまま流れる
    Plain(A),

    /// ステッピングハンドル。iterate middleware が最後まで drain する
    Steps(BoxSteps<S, A>),
}

impl<S, A> Action<S, A> {
    pub fn plain(action: A) -> Self {
        Self::Plain(action)
    }

    pub fn steps<T>(steps: T) -> Self
    where
        T: Steppable<S, A> + 'static,
    {
        Self::Steps(Box::new(steps))
    }

    /// ステッピングハンドルかどうか
    ///
    /// 構造的な検査は一切しない。`Steps` variant であれば true。
    pub fn is_steppable(&self) -> bool {
        matches!(self, Self::Steps(_))
    }

    pub fn as_plain(&self) -> Option<&A> {
        match self {
            Self::Plain(action) => Some(action),
            Self::Steps(_) => None,
        }
    }

    pub fn into_plain(self) -> Option<A> {
        match self {
            Self::Plain(action) => Some(action),
            Self::Steps(_) => None,
        }
    }
}

impl<S, A> From<A> for Action<S, A> {
    fn from(action: A) -> Self {
        Self::Plain(action)
    }
}

impl<S, A: fmt::Debug> fmt::Debug for Action<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(action) => f.debug_tuple("Plain").field(action).finish(),
            Self::Steps(_) => f.write_str("Steps(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Step, StepError};
    use async_trait::async_trait;

    struct Never;

    #[async_trait]
    impl Steppable<(), i32> for Never {
        async fn next(&mut self, _state: ()) -> Result<Step<(), i32>, StepError> {
            Ok(Step::finish())
        }
    }

    #[test]
    fn plain_action_is_not_steppable() {
        let action: Action<(), i32> = Action::plain(7);
        assert!(!action.is_steppable());
        assert_eq!(action.as_plain(), Some(&7));
    }

    #[test]
    fn steps_action_is_steppable() {
        let action: Action<(), i32> = Action::steps(Never);
        assert!(action.is_steppable());
        assert!(action.into_plain().is_none());
    }

    #[test]
    fn debug_hides_the_handle() {
        let plain: Action<(), i32> = 3.into();
        let steps: Action<(), i32> = Action::steps(Never);
        assert_eq!(format!("{plain:?}"), "Plain(3)");
        assert_eq!(format!("{steps:?}"), "Steps(..)");
    }
}
