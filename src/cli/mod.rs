//! CLI command implementations

pub mod init;
pub mod mode;
pub mod serve;
