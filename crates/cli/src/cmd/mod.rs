//! CLI command implementations

pub mod clear;
pub mod config;
pub mod create;
pub mod drop;
pub mod list;
pub mod pop;
pub mod show;
