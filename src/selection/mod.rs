pub mod engine;
pub mod random;

pub use engine::SelectionEngine;
pub use random::{RandomSource, SeededRandom, ThreadRandom};
