//! FnSteps - 非同期クロージャをステッピングハンドルにする

use std::future::Future;

use async_trait::async_trait;

use crate::domain::{Step, StepError};
use crate::ports::Steppable;

/// FnSteps は `FnMut(S) -> impl Future<Output = Result<Step, StepError>>` を包む
///
/// クロージャは呼ばれるたびに最新の state snapshot を受け取る。
pub struct FnSteps<F> {
    f: F,
}

impl<F> FnSteps<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<S, A, F, Fut> Steppable<S, A> for FnSteps<F>
where
    S: Send + 'static,
    A: Send + 'static,
    F: FnMut(S) -> Fut + Send,
    Fut: Future<Output = Result<Step<S, A>, StepError>> + Send,
{
    async fn next(&mut self, state: S) -> Result<Step<S, A>, StepError> {
        (self.f)(state).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::drain;
    use crate::testing::RecordingStore;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn closure_sees_fresh_state_each_step() {
        let store = RecordingStore::new();
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();

        // state は dispatch 済みの回数。3 回 dispatch したら終わる
        let steps = FnSteps::new(move |state: usize| {
            seen.fetch_add(1, Ordering::SeqCst);
            async move {
                let step: Step<usize, i32> = if state < 3 {
                    Step::plain(state as i32 * 10)
                } else {
                    Step::finish()
                };
                Ok::<_, StepError>(step)
            }
        });

        let result = drain(Box::new(steps), &store).await.unwrap();

        assert!(result.is_none());
        assert_eq!(store.dispatched(), vec![0, 10, 20]);
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
