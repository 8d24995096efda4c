//! Drain - ステッピングハンドルを終端まで回すループ
//!
//! # フロー
//! 1. `get_state()` → `next(state).await`
//! 2. done が false の間: 値があれば `dispatch(value)`、なければ何もしない → 1 に戻る
//! 3. 終端ステップの値をそのまま返す（dispatch しない）

use tracing::{debug, trace, warn};

use crate::domain::{Action, BoxSteps, IterateError, Step};
use crate::ports::StoreApi;

/// ハンドルを終端まで drain する
///
/// 各ステップの直前に `get_state` を 1 回だけ呼ぶ。途中の値の `dispatch` は
/// 次のステップ要求より必ず先に行われる。ステッピングが失敗したら、
/// それ以上 `get_state` も `next` も呼ばずにエラーを返す。
pub async fn drain<S, A>(
    mut steps: BoxSteps<S, A>,
    api: &dyn StoreApi<S, A>,
) -> Result<Option<Action<S, A>>, IterateError>
where
    S: Send + 'static,
    A: Send + 'static,
{
    let mut index = 0;
    let mut step = request(&mut steps, api, index).await?;

    while !step.done {
        match step.value {
            Some(value) => {
                debug!(step = index, "dispatching yielded value");
                api.dispatch(value);
            }
            None => trace!(step = index, "step yielded nothing"),
        }

        index += 1;
        step = request(&mut steps, api, index).await?;
    }

    debug!(steps = index + 1, "steps drained");
    Ok(step.value)
}

async fn request<S, A>(
    steps: &mut BoxSteps<S, A>,
    api: &dyn StoreApi<S, A>,
    index: usize,
) -> Result<Step<S, A>, IterateError>
where
    S: Send + 'static,
    A: Send + 'static,
{
    let state = api.get_state();
    steps.next(state).await.map_err(|source| {
        warn!(step = index, error = %source, "stepping failed");
        IterateError::Step {
            step: index,
            source,
        }
    })
}
