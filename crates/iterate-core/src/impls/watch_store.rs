//! WatchStore - tokio ベースの最小ホスト store
//!
//! # 構成
//! - state は `watch` チャネルに置く（`get_state` は現在値の clone）
//! - チェーンは iterate middleware → reducer の 1 段だけ
//! - 素の action の `dispatch` はその場で reducer まで届く
//! - ステッピングハンドルの `dispatch` は `mpsc` キューに積み、
//!   呼び出し中の drain が終わってから順に drain する
//! - どこかの drain が失敗しても、キューは必ず空にしてから返す

use thiserror::Error;
use tokio::sync::{Mutex, mpsc, watch};
use tracing::{debug, error, warn};

use crate::app::{Handled, IterateMiddleware, iterate};
use crate::domain::{Action, IterateError};
use crate::ports::StoreApi;

/// Reducer は state と素の action から次の state を作る
pub trait Reducer<S, A>: Send + Sync {
    fn reduce(&self, state: &S, action: A) -> S;
}

impl<S, A, F> Reducer<S, A> for F
where
    F: Fn(&S, A) -> S + Send + Sync,
{
    fn reduce(&self, state: &S, action: A) -> S {
        self(state, action)
    }
}

/// StoreError は `dispatch_root` / `settle` の失敗
///
/// キューに積まれていたハンドルは、失敗があってもすべて drain 済み。
#[derive(Debug, Error)]
pub enum StoreError {
    /// 投入した action 自身の drain が失敗した
    #[error("root drain failed: {root}")]
    Root {
        #[source]
        root: IterateError,
        nested: Vec<IterateError>,
    },

    /// キューから取り出したハンドルの drain が失敗した
    #[error("{} queued drain(s) failed", .nested.len())]
    Nested { nested: Vec<IterateError> },
}

impl StoreError {
    pub fn root(&self) -> Option<&IterateError> {
        match self {
            Self::Root { root, .. } => Some(root),
            Self::Nested { .. } => None,
        }
    }

    pub fn nested(&self) -> &[IterateError] {
        match self {
            Self::Root { nested, .. } | Self::Nested { nested } => nested,
        }
    }
}

pub struct WatchStore<S, A, R> {
    state: watch::Sender<S>,
    queue_tx: mpsc::UnboundedSender<Action<S, A>>,
    queue_rx: Mutex<mpsc::UnboundedReceiver<Action<S, A>>>,
    reducer: R,
    middleware: IterateMiddleware,
}

impl<S, A, R> WatchStore<S, A, R>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    R: Reducer<S, A>,
{
    pub fn new(initial: S, reducer: R) -> Self {
        let (state, _) = watch::channel(initial);
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        Self {
            state,
            queue_tx,
            queue_rx: Mutex::new(queue_rx),
            reducer,
            middleware: iterate(),
        }
    }

    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<S> {
        self.state.subscribe()
    }

    /// action を処理し、キューが空になるまで後続の dispatch も処理する
    ///
    /// 戻り値は `action` 自身の結果。素の action なら `None`、
    /// ステッピングハンドルなら終端ステップの値。
    pub async fn dispatch_root(
        &self,
        action: Action<S, A>,
    ) -> Result<Option<Action<S, A>>, StoreError> {
        let result = self.process(action).await;
        let (_, nested) = self.drain_queue().await;

        match result {
            Err(root) => Err(StoreError::Root { root, nested }),
            Ok(value) if nested.is_empty() => Ok(value),
            Ok(_) => Err(StoreError::Nested { nested }),
        }
    }

    /// キューに残っているハンドルをすべて drain する
    ///
    /// 途中で失敗しても残りは続けて drain し、失敗はまとめて返す。
    pub async fn settle(&self) -> Result<usize, StoreError> {
        let (processed, nested) = self.drain_queue().await;
        if nested.is_empty() {
            Ok(processed)
        } else {
            Err(StoreError::Nested { nested })
        }
    }

    async fn drain_queue(&self) -> (usize, Vec<IterateError>) {
        let mut processed = 0;
        let mut failures = Vec::new();
        while let Some(action) = self.pop().await {
            match self.process(action).await {
                Ok(Some(_)) => debug!("dropping terminal value of a queued drain"),
                Ok(None) => {}
                Err(err) => {
                    warn!(error = %err, "queued drain failed");
                    failures.push(err);
                }
            }
            processed += 1;
        }
        (processed, failures)
    }

    async fn pop(&self) -> Option<Action<S, A>> {
        self.queue_rx.lock().await.try_recv().ok()
    }

    async fn process(&self, action: Action<S, A>) -> Result<Option<Action<S, A>>, IterateError> {
        let handled = self
            .middleware
            .handle(self, |action| self.reduce(action), action);

        match handled {
            Handled::Forwarded(()) => Ok(None),
            Handled::Draining(drain) => drain.await,
        }
    }

    fn reduce(&self, action: A) {
        self.state.send_modify(|state| {
            let next = self.reducer.reduce(state, action);
            *state = next;
        });
    }
}

impl<S, A, R> StoreApi<S, A> for WatchStore<S, A, R>
where
    S: Clone + Send + Sync + 'static,
    A: Send + 'static,
    R: Reducer<S, A>,
{
    fn dispatch(&self, action: Action<S, A>) {
        match action {
            Action::Plain(action) => self.reduce(action),
            steps @ Action::Steps(_) => {
                debug!("queueing dispatched handle");
                if self.queue_tx.send(steps).is_err() {
                    error!("dispatch queue is closed; handle dropped");
                }
            }
        }
    }

    fn get_state(&self) -> S {
        self.state()
    }
}
