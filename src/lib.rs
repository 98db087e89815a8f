pub mod cli;
pub mod config;
pub mod contributions;
pub mod error;
pub mod fetch;
pub mod model;
pub mod output;
pub mod pulls;
pub mod releases;
pub mod util;
