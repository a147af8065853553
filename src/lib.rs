pub mod cli;
pub mod combat;
pub mod data;
pub mod error;
pub mod parallel;
pub mod trials;

pub use error::{Error, Result};
