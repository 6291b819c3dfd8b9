pub mod config;
pub mod init;
pub mod migrate;
pub mod rebuild;
pub mod status;
