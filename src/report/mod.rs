//! Report module - ranking table and JSON export

pub mod export;
pub mod ranking;

pub use export::*;
pub use ranking::*;
