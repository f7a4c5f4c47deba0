pub mod backup;
pub mod clear;
pub mod config;
pub mod db;
pub mod export;
pub mod feed;
pub mod init;
pub mod list;
pub mod log;
pub mod record;
pub mod restore;
pub mod shift;
pub mod today;
