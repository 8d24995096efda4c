//! Errors - ステッピング失敗とその伝播
//!
//! エラーの種類は「ステッピング失敗」の 1 つだけ。
//! drain は回復を試みず、そのまま呼び出し元へ返す。

use thiserror::Error;

/// StepError は `Steppable::next` が返す失敗
#[derive(Debug, Error)]
pub enum StepError {
    #[error("step failed: {0}")]
    Failed(String),

    #[error("malformed step result: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StepError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed(message.into())
    }
}

/// IterateError は drain / middleware から返るエラー
#[derive(Debug, Error)]
pub enum IterateError {
    /// `step` 番目（0 始まり）の要求で失敗した
    #[error("stepping failed at step {step}: {source}")]
    Step {
        step: usize,
        #[source]
        source: StepError,
    },
}

impl IterateError {
    /// 失敗したステップの番号
    pub fn step(&self) -> usize {
        match self {
            Self::Step { step, .. } => *step,
        }
    }

    pub fn into_step_error(self) -> StepError {
        match self {
            Self::Step { source, .. } => source,
        }
    }
}
