// src/lib.rs
pub mod config;
pub mod monitor;
pub mod probe;
pub mod server;
pub mod status;
