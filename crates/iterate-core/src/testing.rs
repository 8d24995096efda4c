//! テスト用のホスト store とスクリプト化されたステッピングハンドル

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{Action, Step, StepError};
use crate::ports::{Steppable, StoreApi};

/// ホストとハンドルの呼び出しを時系列で記録する
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event {
    GetState,
    Next(usize),
    Dispatch(i32),
    DispatchSteps,
}

pub(crate) type Log = Arc<Mutex<Vec<Event>>>;

/// state は「これまでに dispatch された回数」
pub(crate) struct RecordingStore {
    log: Log,
}

impl RecordingStore {
    pub(crate) fn new() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn log(&self) -> Log {
        self.log.clone()
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.lock().unwrap().clone()
    }

    pub(crate) fn dispatched(&self) -> Vec<i32> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Event::Dispatch(value) => Some(value),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn count(&self, wanted: fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|event| wanted(event)).count()
    }
}

impl StoreApi<usize, i32> for RecordingStore {
    fn dispatch(&self, action: Action<usize, i32>) {
        let event = match action {
            Action::Plain(value) => Event::Dispatch(value),
            Action::Steps(_) => Event::DispatchSteps,
        };
        self.log.lock().unwrap().push(event);
    }

    fn get_state(&self) -> usize {
        let mut log = self.log.lock().unwrap();
        let state = log
            .iter()
            .filter(|event| matches!(event, Event::Dispatch(_) | Event::DispatchSteps))
            .count();
        log.push(Event::GetState);
        state
    }
}

/// 決められた順にステップを返すハンドル
pub(crate) struct ScriptedSteps {
    script: VecDeque<Result<Step<usize, i32>, StepError>>,
    log: Log,
}

impl ScriptedSteps {
    pub(crate) fn new(log: Log, script: Vec<Result<Step<usize, i32>, StepError>>) -> Self {
        Self {
            script: script.into(),
            log,
        }
    }
}

#[async_trait]
impl Steppable<usize, i32> for ScriptedSteps {
    async fn next(&mut self, state: usize) -> Result<Step<usize, i32>, StepError> {
        self.log.lock().unwrap().push(Event::Next(state));
        tokio::task::yield_now().await;
        self.script
            .pop_front()
            .expect("stepped past the end of the script")
    }
}

pub(crate) fn is_get_state(event: &Event) -> bool {
    matches!(event, Event::GetState)
}

pub(crate) fn is_next(event: &Event) -> bool {
    matches!(event, Event::Next(_))
}
