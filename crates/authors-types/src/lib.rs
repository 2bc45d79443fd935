//! authors-types: domain model, wire format and repository port shared by the workspace

pub mod domain;
pub mod ports;
pub mod wire;
