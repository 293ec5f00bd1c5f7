/// Looping product demos: scripted scene cycles advanced on a timer.
///
/// [`scenes`] holds the pure state machine, [`player`] drives it from a
/// cancellable tokio task.
use std::time::Duration;

use thiserror::Error;

pub mod player;
pub mod scenes;

pub use player::DemoPlayer;
pub use scenes::{ALL_DEMOS, DemoScript, SceneCycle, SceneSnapshot, find_demo};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DemoError {
    #[error("unknown demo: {0} (expected one of: scheduling, scribe, coding)")]
    UnknownDemo(String),

    #[error("demo {0} has no scenes")]
    NoScenes(&'static str),

    #[error("demo period must be positive, got {0:?}")]
    InvalidPeriod(Duration),
}
