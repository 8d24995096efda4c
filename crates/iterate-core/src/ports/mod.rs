//! Ports - 外部との境界
//!
//! - **Steppable**: action として渡されるステッピングハンドル
//! - **StoreApi**: ホスト store が提供する `dispatch` / `get_state`

pub mod steppable;
pub mod store;

pub use self::steppable::Steppable;
pub use self::store::StoreApi;
