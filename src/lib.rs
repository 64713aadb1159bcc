pub mod analyzer;
pub mod artisan;
pub mod cache;
pub mod config;
pub mod error;
pub mod handler;
pub mod model;
pub mod server;
pub mod util;
