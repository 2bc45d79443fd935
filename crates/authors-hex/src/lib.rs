//! authors-hex: hexagonal Authors API library (core + inbound HTTP)

pub mod config;
pub mod errors;

pub mod application;

pub use authors_types::{domain, ports, wire};

pub mod inbound; // HTTP adapter (server + handlers)
