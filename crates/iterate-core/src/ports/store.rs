//! StoreApi port - ホスト store が middleware に渡す能力
//!
//! `dispatch` と `get_state` だけ。state を直接書き換える手段は渡さない。

use crate::domain::Action;

/// StoreApi はホスト store への共有ハンドル
pub trait StoreApi<S, A>: Send + Sync {
    /// action を通常の処理に回す。戻り値はない（middleware は結果を見ない）
    fn dispatch(&self, action: Action<S, A>);

    /// 現在の state snapshot
    fn get_state(&self) -> S;
}
