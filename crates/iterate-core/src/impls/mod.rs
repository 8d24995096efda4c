//! Impls - ports の実装
//!
//! # 含まれる実装
//! - **FnSteps**: 非同期クロージャのステッピングハンドル
//! - **StreamSteps**: `Stream` のステッピングハンドル
//! - **JsonSteps**: 型なしステップ結果の再生
//! - **WatchStore**: tokio の watch/mpsc で組んだ最小ホスト store

pub mod fn_steps;
pub mod json_steps;
pub mod stream_steps;
pub mod watch_store;

pub use self::fn_steps::FnSteps;
pub use self::json_steps::JsonSteps;
pub use self::stream_steps::StreamSteps;
pub use self::watch_store::{Reducer, StoreError, WatchStore};
