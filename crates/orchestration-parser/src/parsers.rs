pub mod answer;
pub mod classifier;
pub mod rationale;
pub mod tool;
