pub mod evaluate;
pub mod train;

pub use evaluate::EvaluateArgs;
pub use train::TrainArgs;
