//! Platform services: time sources and the frame scheduler.

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, StdClock};
pub use scheduler::{Options, Scheduler, State};
