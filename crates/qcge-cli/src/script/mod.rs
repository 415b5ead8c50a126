//! The line-oriented editing script replayed by `qcge run` and `qcge show`.
//!
//! ```text
//! # Bell pair
//! place h
//! move right
//! move down
//! place x
//! ctrl
//! ```

pub mod error;
pub mod lexer;
pub mod parser;

pub use parser::parse;
