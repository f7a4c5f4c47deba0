pub mod aggregator;
pub mod config;
pub mod feed;
pub mod forecast;
pub mod log;
pub mod record;
pub mod retention;
pub mod sampler;
pub mod views;
