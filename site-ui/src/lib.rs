pub mod app;
pub mod cli;
pub mod config;
pub mod logging;
pub mod notify;
pub mod render;
pub mod sink;
pub mod state;
pub mod utils;
