pub mod cmd;
pub mod config;
pub mod logging;
pub mod migrate;
pub mod progress;
pub mod seed;
pub mod store;
