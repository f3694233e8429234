#![forbid(unsafe_code)]

pub mod model;
pub mod quiz;

pub use quiz::{QuizBrain, QuizError, QuizState};
