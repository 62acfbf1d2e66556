//! infogain: parallel information gain attribute evaluation
//!
//! Ranks the attributes of a weighted, sparse, nominal dataset by the
//! information gain each one carries about the class attribute. Counting and
//! scoring each run as a fork-join phase over a fixed worker pool.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
