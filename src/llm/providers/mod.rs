//! Concrete provider backends. One module per backend.

pub mod dummy;
pub mod openai;
