//! Step - `Steppable::next` が返す 1 ステップ分の結果
//!
//! # 継続条件
//! 継続するのは done フラグが厳密に `false` のときだけ。
//! 型付きの `Step` では `done: bool` だが、JSON で届く結果（[`RawStep`]）では
//! `null`・欠落・`0`・文字列などすべて終端として扱う。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::action::Action;
use super::errors::StepError;

/// Step はステッピングハンドルの 1 回分の結果
pub struct Step<S, A> {
    /// true なら終端。`value` は dispatch されず呼び出し元に返る
    pub done: bool,

    /// 途中のステップでは dispatch される値。`None` なら dispatch しない
    pub value: Option<Action<S, A>>,
}

impl<S, A> Step<S, A> {
    pub fn new(done: bool, value: Option<Action<S, A>>) -> Self {
        Self { done, value }
    }

    /// 値を 1 つ産出して継続
    pub fn yielded(value: Action<S, A>) -> Self {
        Self::new(false, Some(value))
    }

    /// 素の action を 1 つ産出して継続
    pub fn plain(value: A) -> Self {
        Self::yielded(Action::Plain(value))
    }

    /// 何も産出せずに継続
    pub fn skip() -> Self {
        Self::new(false, None)
    }

    /// 終端。`value` は drain の結果として返る
    pub fn done(value: Option<Action<S, A>>) -> Self {
        Self::new(true, value)
    }

    /// 値なしの終端
    pub fn finish() -> Self {
        Self::done(None)
    }

    pub fn is_terminal(&self) -> bool {
        self.done
    }

    pub fn into_parts(self) -> (bool, Option<Action<S, A>>) {
        (self.done, self.value)
    }
}

impl<S, A: DeserializeOwned> Step<S, A> {
    /// `{ "done": .., "value": .. }` 形式の JSON から Step を作る
    pub fn from_json(json: Value) -> Result<Self, StepError> {
        let raw: RawStep<A> = serde_json::from_value(json)?;
        Ok(raw.into_step())
    }
}

impl<S, A: std::fmt::Debug> std::fmt::Debug for Step<S, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Step")
            .field("done", &self.done)
            .field("value", &self.value)
            .finish()
    }
}

/// RawStep は型なしのステップ結果
///
/// `done` は任意の JSON 値を受け取る。
/// `value` は欠落のときだけ `None`。明示的な `null` は `A` として読み、dispatch の対象になる。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(bound(deserialize = "A: Deserialize<'de>"))]
pub struct RawStep<A> {
    #[serde(default)]
    pub done: Value,

    #[serde(default, deserialize_with = "present")]
    pub value: Option<A>,
}

/// キーがあれば値が `null` でも `Some`
fn present<'de, D, A>(deserializer: D) -> Result<Option<A>, D::Error>
where
    D: Deserializer<'de>,
    A: Deserialize<'de>,
{
    A::deserialize(deserializer).map(Some)
}

impl<A> RawStep<A> {
    /// 厳密に `false` のときだけ継続
    pub fn is_continuing(&self) -> bool {
        matches!(self.done, Value::Bool(false))
    }

    pub fn into_step<S>(self) -> Step<S, A> {
        let done = !self.is_continuing();
        Step::new(done, self.value.map(Action::Plain))
    }
}
