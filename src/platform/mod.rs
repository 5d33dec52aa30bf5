//! Platform abstraction layer
//!
//! The simulation never polls devices itself. Front ends implement:
//! - `InputSource`: instantaneous key state plus a quit signal
//! - `FrameClock`: blocks until the next frame boundary

pub mod clock;
pub mod input;

pub use clock::{FixedClock, FrameClock};
#[cfg(not(target_arch = "wasm32"))]
pub use clock::SleepClock;
pub use input::{InputLatch, InputSource, Key, KeySnapshot};
