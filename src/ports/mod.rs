//! Ports (trait boundaries) for external collaborators.
//!
//! This module defines the interfaces between the learning core and the
//! outside world: the environment being learned against and the observers
//! that watch training. The traits are owned by the core and implemented
//! by adapters (bundled environments, progress bars, log writers).

pub mod environment;
pub mod observer;

pub use environment::{Environment, Transition};
pub use observer::Observer;
