//! Validation rules and engine

mod engine;
mod rules;

pub use engine::*;
pub use rules::*;
