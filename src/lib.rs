pub mod bench;
pub mod chart;
pub mod cli;
pub mod display;
pub mod error;
pub mod genealogy;
pub mod logger;
pub mod sorting;
pub mod timings;

pub use error::Error;
