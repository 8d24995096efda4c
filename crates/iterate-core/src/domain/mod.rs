//! Domain model (action, step, errors).

pub mod action;
pub mod errors;
pub mod step;

pub use self::action::{Action, BoxSteps};
pub use self::errors::{IterateError, StepError};
pub use self::step::{RawStep, Step};
