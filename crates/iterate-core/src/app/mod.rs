//! App - middleware 本体
//!
//! - **drain**: ステッピングハンドルを終端まで回すループ
//! - **middleware**: 判定と振り分け（チェーンへの組み込み口）

pub mod drain;
pub mod middleware;

pub use self::drain::drain;
pub use self::middleware::{
    DrainFuture, Handled, IterateMiddleware, create_iterator_middleware, iterate,
};
