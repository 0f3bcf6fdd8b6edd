//! CLI command implementations

pub mod configure;
pub mod install;
pub mod list;
pub mod run;
