pub mod config;
pub mod disk;
pub mod fs;
pub mod logger;
pub mod protocol;
pub mod server;
pub mod shell;
pub mod utils;
