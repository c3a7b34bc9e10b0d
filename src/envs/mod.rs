//! Bundled environments implementing the `Environment` port

pub mod cliff_walking;

pub use cliff_walking::CliffWalking;
