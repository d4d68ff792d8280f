//! git-mini-commit CLI library
//!
//! Commands live in `cmd`; `main.rs` only parses arguments and dispatches.

pub mod cmd;
pub mod patch_utils;
pub mod system_config;
pub mod util;
