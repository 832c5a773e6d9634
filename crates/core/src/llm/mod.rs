//! Remote strategy provider backed by a hosted language model.

pub mod error;
pub mod json;
pub mod openai;
