//! Core translation engine module

pub mod chunker;
pub mod client;
pub mod config;
pub mod errors;
pub mod extract;
pub mod language;
pub mod models;
pub mod repair;
pub mod session;
pub mod token;
pub mod transport;
