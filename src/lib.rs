pub mod config;
pub mod error;
pub mod extract;
pub mod gnmap;
pub mod logger;
