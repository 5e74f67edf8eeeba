pub mod collect;
pub mod config;
pub mod init;
pub mod render;
pub mod set;
pub mod status;
