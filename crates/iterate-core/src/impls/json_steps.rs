//! JsonSteps - 型なしのステップ結果を順に返すハンドル
//!
//! `{ "done": .., "value": .. }` の列をそのまま再生する。
//! 継続判定は [`RawStep`](crate::domain::RawStep) に従う（厳密に `false` のときだけ継続）。
//! 列を使い切ったら値なしの終端を返す。

use std::collections::VecDeque;
use std::marker::PhantomData;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::{Step, StepError};
use crate::ports::Steppable;

pub struct JsonSteps<A> {
    results: VecDeque<Value>,
    _marker: PhantomData<fn() -> A>,
}

impl<A> JsonSteps<A> {
    pub fn new(results: impl IntoIterator<Item = Value>) -> Self {
        Self {
            results: results.into_iter().collect(),
            _marker: PhantomData,
        }
    }

    /// JSON 配列の文字列から作る
    pub fn parse(json: &str) -> Result<Self, StepError> {
        let results: Vec<Value> = serde_json::from_str(json)?;
        Ok(Self::new(results))
    }

    pub fn remaining(&self) -> usize {
        self.results.len()
    }
}

#[async_trait]
impl<S, A> Steppable<S, A> for JsonSteps<A>
where
    S: Send + 'static,
    A: DeserializeOwned + Send + 'static,
{
    async fn next(&mut self, _state: S) -> Result<Step<S, A>, StepError> {
        match self.results.pop_front() {
            Some(json) => Step::from_json(json),
            None => Ok(Step::finish()),
        }
    }
}
