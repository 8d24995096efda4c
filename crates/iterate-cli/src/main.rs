use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::info;
use tracing_subscriber::EnvFilter;

use iterate_core::impls::{JsonSteps, WatchStore};
use iterate_core::{Action, Step, StepError, Steppable};

#[derive(Debug, Parser)]
#[command(name = "iterate", about = "Drive a counter store with stepping actions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// counter を `from` から 0 まで 1 ステップずつ減らす
    Countdown {
        #[arg(long, default_value_t = 5)]
        from: i64,

        /// 各ステップの前に待つミリ秒
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
    },

    /// JSON ファイルのステップ結果を再生する（`[{"done": false, "value": {...}}, ...]`）
    Replay {
        path: PathBuf,

        #[arg(long, default_value_t = 0)]
        start: i64,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
struct Counter {
    value: i64,
    applied: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum CounterAction {
    Add { amount: i64 },
    Set { value: i64 },
}

fn reduce(state: &Counter, action: CounterAction) -> Counter {
    let value = match action {
        CounterAction::Add { amount } => state.value + amount,
        CounterAction::Set { value } => value,
    };
    Counter {
        value,
        applied: state.applied + 1,
    }
}

/// counter が 0 になるまで `Add { amount: -1 }` を産出し、最後に開始値を返す
struct Countdown {
    from: i64,
    delay: Duration,
}

#[async_trait]
impl Steppable<Counter, CounterAction> for Countdown {
    async fn next(&mut self, state: Counter) -> Result<Step<Counter, CounterAction>, StepError> {
        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }
        if state.value > 0 {
            Ok(Step::plain(CounterAction::Add { amount: -1 }))
        } else {
            Ok(Step::done(Some(Action::Plain(CounterAction::Set {
                value: self.from,
            }))))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let (initial, action) = match cli.command {
        Command::Countdown { from, delay_ms } => {
            let steps = Countdown {
                from,
                delay: Duration::from_millis(delay_ms),
            };
            (Counter { value: from, applied: 0 }, Action::steps(steps))
        }
        Command::Replay { path, start } => {
            let json = tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("read {}", path.display()))?;
            let steps = JsonSteps::<CounterAction>::parse(&json)
                .with_context(|| format!("parse {}", path.display()))?;
            (Counter { value: start, applied: 0 }, Action::steps(steps))
        }
    };

    // (A) 遷移ごとに表示する reducer で store を用意
    let store = WatchStore::new(initial, |state: &Counter, action: CounterAction| {
        let label = format!("{action:?}");
        let next = reduce(state, action);
        println!("{label}: value {} -> {}", state.value, next.value);
        next
    });

    // (B) ステッピング action を投入して終端まで回す
    let result = store.dispatch_root(action).await?;
    match result {
        Some(Action::Plain(value)) => println!("terminal value: {}", serde_json::to_string(&value)?),
        Some(Action::Steps(_)) => println!("terminal value: <stepping handle>"),
        None => println!("terminal value: none"),
    }

    let state = store.state();
    info!(value = state.value, applied = state.applied, "drain finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce_counts_applied_actions() {
        let state = reduce(&Counter::default(), CounterAction::Add { amount: 3 });
        let state = reduce(&state, CounterAction::Set { value: -1 });
        assert_eq!(state, Counter { value: -1, applied: 2 });
    }

    #[tokio::test]
    async fn countdown_reaches_zero_and_returns_start() {
        let store = WatchStore::new(Counter { value: 3, applied: 0 }, reduce);
        let steps = Countdown {
            from: 3,
            delay: Duration::ZERO,
        };

        let result = store.dispatch_root(Action::steps(steps)).await.unwrap();

        assert_eq!(
            result.and_then(Action::into_plain),
            Some(CounterAction::Set { value: 3 })
        );
        assert_eq!(store.state(), Counter { value: 0, applied: 3 });
    }

    #[tokio::test]
    async fn replay_decodes_tagged_actions() {
        let store = WatchStore::new(Counter::default(), reduce);
        let steps = JsonSteps::<CounterAction>::parse(
            r#"[
                {"done": false, "value": {"type": "add", "amount": 2}},
                {"done": false},
                {"done": false, "value": {"type": "set", "value": 10}},
                {"done": true, "value": {"type": "add", "amount": 1}}
            ]"#,
        )
        .unwrap();

        let result = store.dispatch_root(Action::steps(steps)).await.unwrap();

        assert_eq!(
            result.and_then(Action::into_plain),
            Some(CounterAction::Add { amount: 1 })
        );
        assert_eq!(store.state(), Counter { value: 10, applied: 2 });
    }
}
