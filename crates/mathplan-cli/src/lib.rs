//! Command-line front end for math placement advising.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
