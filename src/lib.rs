//! Blue/Green Deployment Log Watcher Library

pub mod alerts;
pub mod config;
pub mod detector;
pub mod lifecycle;
pub mod observability;
pub mod parser;
pub mod processor;
pub mod source;
pub mod window;

pub use config::schema::WatcherConfig;
pub use lifecycle::Shutdown;
pub use processor::StreamProcessor;
