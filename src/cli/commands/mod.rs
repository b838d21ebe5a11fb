pub mod checar;
pub mod config;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod persona;
pub mod report;
pub mod status;
