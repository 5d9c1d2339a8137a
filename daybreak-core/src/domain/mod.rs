//! Domain types shared across the pipeline.

pub mod bar;
pub mod signal;
pub mod state;
pub mod trade;

pub use bar::Bar;
pub use signal::{Direction, Signal};
pub use state::{DayOutcome, RunState};
pub use trade::{ExitReason, Trade};
