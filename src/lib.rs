// Globomap client - library root

pub mod auth;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;

pub use client::GmapClient;
pub use error::GmapError;
