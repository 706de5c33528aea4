pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod registry;
pub mod scan;
pub mod stats;
pub mod util;
